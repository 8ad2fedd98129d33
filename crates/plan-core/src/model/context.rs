use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Artifact;

/// Contexto de ejecución entregado a `StepDefinition::run`.
pub struct ExecutionContext {
    pub input: Option<Artifact>, // Artifact único encadenado (None primer step)
    pub params: Value,           // params del run (request normalizado)
}

impl ExecutionContext {
    /// Deserializa los params del run al tipo concreto del step.
    pub fn params_as<P: DeserializeOwned>(&self) -> Result<P, serde_json::Error> {
        serde_json::from_value(self.params.clone())
    }
}
