//! Errores de persistencia.
//! Mapea errores de IO y de formato a variantes semánticas, y de ahí a los
//! errores que entienden los traits del core.

use plan_core::{AuditError, MemoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io failure: {0}")]
    Io(String),
    #[error("corrupt ledger {path} at line {line}: {detail}")]
    Corrupt { path: String, line: usize, detail: String },
    #[error("unsupported ledger format in {path}: {found}")]
    UnsupportedFormat { path: String, found: String },
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<PersistenceError> for MemoryError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io(msg) => MemoryError::Io(msg),
            corrupt => MemoryError::Corrupt(corrupt.to_string()),
        }
    }
}

impl From<PersistenceError> for AuditError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io(msg) => AuditError::Write(msg),
            corrupt => AuditError::Corrupt(corrupt.to_string()),
        }
    }
}
