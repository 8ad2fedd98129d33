//! Tipos de repositorio: estado reconstruido (RunInstance) y definición
//! (PlanDefinition).
//!
//! El repositorio aplica un replay lineal: consume eventos en orden y
//! actualiza un `RunInstance` por evento. No almacena artifacts completos
//! (solo hashes) para mantener neutralidad: los outputs viven en la
//! memoria de deduplicación.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::event::{AuditEvent, AuditEventKind};
use crate::step::{StepDefinition, StepName, StepStatus};

/// Estado del run a nivel agregado.
///
/// `PartiallyCompleted` queda reservado para planes con pasos no críticos;
/// en la cadena fija actual cada paso alimenta al siguiente, así que un
/// fallo siempre produce `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Initialized,
    Running,
    Completed,
    PartiallyCompleted,
    Failed,
}

#[derive(Debug, Clone)]
pub struct RunInstance {
    pub id: Uuid,
    pub steps: Vec<StepSlot>,
    pub cursor: usize,
    pub status: RunStatus,
    pub started_at: Option<DateTime<Utc>>,
}

/// Estado de un step en la instancia.
#[derive(Debug, Clone)]
pub struct StepSlot {
    pub step: StepName,
    pub status: StepStatus,
    pub fingerprint: Option<String>,
    pub output_hash: Option<String>, // solo el hash; el artifact vive en memoria
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub detail: Option<String>, // mensaje de skip o error, si lo hubo
}

impl StepSlot {
    fn pending(step: StepName) -> Self {
        Self { step,
               status: StepStatus::Pending,
               fingerprint: None,
               output_hash: None,
               started_at: None,
               finished_at: None,
               detail: None }
    }
}

/// Trait para reconstruir (`replay`) el estado de un run a partir de sus
/// eventos. Los slots siempre cubren la secuencia fija completa.
pub trait RunRepository {
    fn load(&self, run_id: Uuid, events: &[AuditEvent]) -> RunInstance;
}

/// Definición inmutable del plan: los cuatro pasos en orden más el hash
/// que identifica la definición en el log.
#[derive(Debug)]
pub struct PlanDefinition {
    pub steps: Vec<Box<dyn StepDefinition>>,
    pub definition_hash: String,
}

impl PlanDefinition {
    pub fn new(steps: Vec<Box<dyn StepDefinition>>, definition_hash: String) -> Self {
        Self { steps, definition_hash }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Verifica el invariante de orden fijo Topics→Posts→Hashtags→Schedule.
    ///
    /// Se chequea antes de emitir cualquier evento: una definición fuera de
    /// orden nunca crea estado.
    pub fn check_order(&self) -> Result<(), EngineError> {
        if self.steps.len() != StepName::ORDERED.len() {
            return Err(EngineError::OutOfOrderDefinition(format!("expected {} steps, found {}",
                                                                 StepName::ORDERED.len(),
                                                                 self.steps.len())));
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.name() != StepName::ORDERED[i] {
                return Err(EngineError::OutOfOrderDefinition(format!("position {} expects {}, found {}",
                                                                     i,
                                                                     StepName::ORDERED[i],
                                                                     step.name())));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct InMemoryRunRepository;
impl InMemoryRunRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InMemoryRunRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RunRepository for InMemoryRunRepository {
    fn load(&self, run_id: Uuid, events: &[AuditEvent]) -> RunInstance {
        let mut steps: Vec<StepSlot> = StepName::ORDERED.iter().map(|s| StepSlot::pending(*s)).collect();
        let mut status = RunStatus::Initialized;
        let mut started_at = None;

        for ev in events {
            match &ev.kind {
                AuditEventKind::RunInitialized { .. } => {
                    started_at = Some(ev.ts);
                }
                AuditEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Running;
                        slot.started_at = Some(ev.ts);
                    }
                    status = RunStatus::Running;
                }
                AuditEventKind::StepCompleted { step_index,
                                                fingerprint,
                                                output_hash,
                                                .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Completed;
                        slot.fingerprint = Some(fingerprint.clone());
                        slot.output_hash = Some(output_hash.clone());
                        slot.finished_at = Some(ev.ts);
                    }
                }
                AuditEventKind::StepSkipped { step_index,
                                              fingerprint,
                                              output_hash,
                                              message,
                                              .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Skipped;
                        slot.fingerprint = Some(fingerprint.clone());
                        slot.output_hash = Some(output_hash.clone());
                        slot.finished_at = Some(ev.ts);
                        slot.detail = Some(message.clone());
                    }
                    status = RunStatus::Running;
                }
                AuditEventKind::StepFailed { step_index, error, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Failed;
                        slot.finished_at = Some(ev.ts);
                        slot.detail = Some(error.to_string());
                    }
                    status = RunStatus::Failed;
                }
                AuditEventKind::RunCompleted { .. } => status = RunStatus::Completed,
            }
        }

        // Un step que quedó en Running (proceso abortado a mitad) se
        // reintenta: el cursor apunta al primer slot no terminal.
        let cursor = steps.iter()
                          .position(|s| !s.status.is_terminal())
                          .unwrap_or(steps.len());
        RunInstance { id: run_id,
                      steps,
                      cursor,
                      status,
                      started_at }
    }
}

/// Construye la definición del plan y su hash identificatorio (hash del
/// arreglo canónico de nombres de pasos).
pub fn build_plan_definition(steps: Vec<Box<dyn StepDefinition>>) -> PlanDefinition {
    use crate::hashing::{hash_str, to_canonical_json};
    use serde_json::json;
    let names: Vec<&str> = steps.iter().map(|s| s.name().as_str()).collect();
    let names_json = json!(names);
    let canonical = to_canonical_json(&names_json);
    let definition_hash = hash_str(&canonical);
    PlanDefinition::new(steps, definition_hash)
}
