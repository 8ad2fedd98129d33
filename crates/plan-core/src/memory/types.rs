//! Registro de la memoria de deduplicación.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Artifact;
use crate::step::StepName;

/// Un resultado ya producido, indexado por fingerprint.
///
/// Invariante de unicidad: a lo sumo un registro por fingerprint; insertar
/// un duplicado falla en lugar de sobrescribir. `run_id` identifica el run
/// que lo produjo, lo que permite rastrear de dónde viene un output
/// reutilizado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub fingerprint: String,
    pub run_id: Uuid,
    pub step: StepName,
    pub output: Artifact,
    pub recorded_at: DateTime<Utc>,
}
