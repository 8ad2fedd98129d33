use crate::{errors::EngineError, model::Artifact};

/// Resultado abstracto de ejecutar un step. Cada paso produce exactamente
/// un artifact de salida; el hash lo asigna el engine después.
pub enum StepRunResult {
    Success { output: Artifact },
    Failure { error: EngineError },
}
