// errors.rs
use std::fmt;
use thiserror::Error;

/// Campo del request al que refiere un error de validación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    Goal,
    Audience,
    Tone,
    Cta,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::Goal => "goal",
            RequestField::Audience => "audience",
            RequestField::Tone => "tone",
            RequestField::Cta => "cta",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error de validación del request: nombra el campo ofensor y la razón.
///
/// Se produce ANTES de crear cualquier run, por lo que un request inválido
/// no deja rastro ni en la memoria ni en el log de auditoría.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: RequestField,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: RequestField, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}
