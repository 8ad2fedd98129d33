//! Run context implementation

use crate::engine::PlanEngine;
use crate::errors::EngineError;
use crate::event::AuditStore;
use crate::memory::MemoryStore;
use crate::repo::{PlanDefinition, RunRepository};
use serde_json::Value;
use uuid::Uuid;

/// Contexto de ejecución para un run específico.
///
/// Proporciona una API ergonómica para avanzar de a un paso (o hasta
/// completar) manteniendo juntos el run id, la definición y los params.
/// La cancelación es cooperativa: soltar el contexto entre pasos deja el
/// run retomable, porque todo lo completado ya quedó en memoria y log.
pub struct RunCtx<'a, M: MemoryStore, A: AuditStore, R: RunRepository> {
    pub engine: &'a mut PlanEngine<M, A, R>,
    pub run_id: Uuid,
    pub definition: &'a PlanDefinition,
    pub params: &'a Value,
}

impl<'a, M: MemoryStore, A: AuditStore, R: RunRepository> RunCtx<'a, M, A, R> {
    /// Crea un nuevo contexto de run.
    #[inline]
    pub fn new(engine: &'a mut PlanEngine<M, A, R>, run_id: Uuid, definition: &'a PlanDefinition, params: &'a Value) -> Self {
        Self { engine,
               run_id,
               definition,
               params }
    }

    /// Ejecuta (o deduplica) el siguiente paso del run.
    #[inline]
    pub fn step(&mut self) -> Result<(), EngineError> {
        self.engine.next_with(self.run_id, self.definition, self.params)
    }

    /// Ejecuta hasta `n` pasos o hasta que ocurra un error terminal.
    #[inline]
    pub fn run_n(&mut self, n: usize) -> Result<(), EngineError> {
        for _ in 0..n {
            match self.step() {
                Ok(()) => continue,
                Err(EngineError::RunCompleted) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Ejecuta pasos hasta que el run complete o ocurra un error terminal.
    #[inline]
    pub fn run_to_completion(&mut self) -> Result<(), EngineError> {
        loop {
            match self.step() {
                Ok(()) => continue,
                Err(EngineError::RunCompleted) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}
