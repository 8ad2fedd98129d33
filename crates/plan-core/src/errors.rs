//! Errores específicos del core.
//!
//! Todos son serializables porque `StepFailed` los embebe en el log de
//! auditoría, y clonables porque el engine los registra antes de
//! devolverlos al caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::StepName;

/// Errores de la memoria de deduplicación.
///
/// `AlreadyExists` es una señal benigna: el orquestador la consume como
/// dedup hit y nunca la expone al caller. Las otras dos variantes son
/// fatales para el run.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum MemoryError {
    #[error("fingerprint already recorded: {0}")] AlreadyExists(String),
    #[error("memory ledger corrupt: {0}")] Corrupt(String),
    #[error("memory io failure: {0}")] Io(String),
}

/// Errores del log de auditoría. Siempre fatales: un log que no puede
/// escribirse o leerse invalida las garantías de trazabilidad.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum AuditError {
    #[error("audit log write failed: {0}")] Write(String),
    #[error("audit log corrupt: {0}")] Corrupt(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EngineError {
    #[error("run already completed")] RunCompleted,
    #[error("run has failed previously (stop-on-failure invariant)")] RunHasFailed,
    #[error("plan definition out of order: {0}")] OutOfOrderDefinition(String),
    #[error("step {step} is missing its input")] MissingInput { step: StepName },
    #[error("step {step} execution failed: {message}")] StepExecution { step: StepName, message: String },
    #[error("memory store: {0}")] Memory(#[from] MemoryError),
    #[error("audit log: {0}")] Audit(#[from] AuditError),
    #[error("internal: {0}")] Internal(String),
}
