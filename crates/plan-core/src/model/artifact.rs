//! Artifact neutral del flujo.
//!
//! Un `Artifact` es la unidad de datos producida por un paso y consumida
//! por el siguiente. Es neutral:
//! - `payload` es JSON genérico; el motor no interpreta su semántica.
//! - `hash` es calculado por el engine sobre el JSON canonicalizado (ver
//!   `hashing::to_canonical_json`). Sirve como identidad del output dentro
//!   de la memoria y del log de auditoría.
//! - `metadata` permite anotar información auxiliar que no entra al hash.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tipos neutrales de artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// JSON genérico del plan de contenido.
    PlanJson,
}

/// Artifact neutral producido/consumido por Steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub hash: String,            // hash canonical del payload (asignado por engine)
    pub payload: Value,          // contenido neutro JSON
    pub metadata: Option<Value>, // información auxiliar (no entra al hash)
}

impl Artifact {
    /// Constructor interno; preferir crear artifacts a través de
    /// `ArtifactSpec::into_artifact`.
    pub(crate) fn new_unhashed(kind: ArtifactKind, payload: Value, metadata: Option<Value>) -> Self {
        Self { kind,
               hash: String::new(),
               payload,
               metadata }
    }
}
