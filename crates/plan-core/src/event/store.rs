use chrono::Utc;
use uuid::Uuid;

use super::{AuditEvent, AuditEventKind};
use crate::errors::AuditError;

/// Almacenamiento de eventos de auditoría append-only.
///
/// `append` es durable antes de retornar en implementaciones persistentes;
/// la variante in-memory comparte el contrato para que los tests puedan
/// sustituirla sin tocar el engine.
pub trait AuditStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts asignados).
    fn append(&mut self, run_id: Uuid, kind: AuditEventKind) -> Result<AuditEvent, AuditError>;
    /// Lista eventos de un run (orden ascendente por seq).
    fn list(&self, run_id: Uuid) -> Result<Vec<AuditEvent>, AuditError>;
    /// Lista todos los eventos en orden global de append.
    fn list_all(&self) -> Result<Vec<AuditEvent>, AuditError>;
}

#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    events: Vec<AuditEvent>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStore for InMemoryAuditStore {
    fn append(&mut self, run_id: Uuid, kind: AuditEventKind) -> Result<AuditEvent, AuditError> {
        let ev = AuditEvent { seq: self.events.len() as u64,
                              run_id,
                              kind,
                              ts: Utc::now() };
        self.events.push(ev.clone());
        Ok(ev)
    }

    fn list(&self, run_id: Uuid) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(self.events.iter().filter(|e| e.run_id == run_id).cloned().collect())
    }

    fn list_all(&self) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(self.events.clone())
    }
}
