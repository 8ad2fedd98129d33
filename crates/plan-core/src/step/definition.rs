use std::fmt;

use serde::{Deserialize, Serialize};

use super::run_result::StepRunResult;
use crate::model::ExecutionContext;

/// Pasos del plan de contenido, en orden de ejecución.
///
/// El orden no es una conveniencia: cada paso consume el output del
/// anterior (Topics→Posts→Hashtags→Schedule), así que es un invariante
/// duro que `PlanDefinition::check_order` verifica antes de crear estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepName {
    Topics,
    Posts,
    Hashtags,
    Schedule,
}

impl StepName {
    /// Secuencia fija del plan. Toda definición válida la respeta.
    pub const ORDERED: [StepName; 4] = [StepName::Topics, StepName::Posts, StepName::Hashtags, StepName::Schedule];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::Topics => "topics",
            StepName::Posts => "posts",
            StepName::Hashtags => "hashtags",
            StepName::Schedule => "schedule",
        }
    }

    /// Posición del paso dentro de la secuencia fija.
    pub fn index(&self) -> usize {
        match self {
            StepName::Topics => 0,
            StepName::Posts => 1,
            StepName::Hashtags => 2,
            StepName::Schedule => 3,
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind { Source, Transform, Sink }

/// Trait que define un Step. Implementaciones deben ser puras respecto a
/// input + params: mismo contexto, mismo output.
pub trait StepDefinition: fmt::Debug {
    /// Nombre del paso dentro de la secuencia del plan.
    fn name(&self) -> StepName;

    /// Tipo general del step.
    fn kind(&self) -> StepKind;

    /// Ejecución pura del step. Debe usar únicamente input + params.
    fn run(&self, ctx: &ExecutionContext) -> StepRunResult;
}
