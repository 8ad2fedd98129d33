use serde::{de::DeserializeOwned, Serialize};

use super::{StepKind, StepName, StepRunResult};
use crate::errors::EngineError;
use crate::model::ArtifactSpec;

/// Resultado tipado de ejecutar un `TypedStep`.
///
/// Permite trabajar con outputs fuertemente tipados durante la
/// implementación de pasos y convertirlos a la representación neutra que el
/// engine usa.
pub enum StepRunResultTyped<Out: ArtifactSpec + Clone> {
    Success { output: Out },
    Failure { error: EngineError },
}

impl<Out: ArtifactSpec + Clone> StepRunResultTyped<Out> {
    /// Convierte a `StepRunResult` neutro serializando el output a
    /// `Artifact` usando `ArtifactSpec::into_artifact`.
    pub fn into_neutral(self) -> StepRunResult {
        match self {
            StepRunResultTyped::Success { output } => StepRunResult::Success { output: output.into_artifact() },
            StepRunResultTyped::Failure { error } => StepRunResult::Failure { error },
        }
    }
}

/// Interfaz de alto nivel para definir Steps con tipos fuertes
/// (Params / Input / Output).
///
/// Implementadores escriben `run_typed` con tipos concretos; el adaptador
/// de abajo convierte esa ejecución a la interfaz neutra `StepDefinition`.
/// Los params llegan siempre del request del run, por eso no hay defaults.
pub trait TypedStep {
    /// Parámetros deserializables desde los params del run.
    type Params: DeserializeOwned + Serialize + Clone;
    /// Tipo concreto esperado como input (implementa `ArtifactSpec`).
    type Input: ArtifactSpec + Clone;
    /// Tipo concreto producido como output (implementa `ArtifactSpec`).
    type Output: ArtifactSpec + Clone;

    /// Nombre del paso dentro de la secuencia del plan.
    fn name(&self) -> StepName;

    /// Tipo general del step.
    fn kind(&self) -> StepKind;

    /// Ejecución tipada. Para `Source`, `input` será `None`.
    fn run_typed(&self, input: Option<Self::Input>, params: Self::Params) -> StepRunResultTyped<Self::Output>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStep` implementa `StepDefinition` neutro.
// -------------------------------------------------------------
impl<T> crate::step::StepDefinition for T where T: TypedStep + 'static + std::fmt::Debug
{
    fn name(&self) -> StepName {
        <Self as TypedStep>::name(self)
    }

    fn kind(&self) -> StepKind {
        <Self as TypedStep>::kind(self)
    }

    fn run(&self, ctx: &crate::model::ExecutionContext) -> StepRunResult {
        let step = <Self as TypedStep>::name(self);

        // Decodifica los params del run; un request que no deserializa es
        // un fallo del step, no un panic.
        let params: <Self as TypedStep>::Params = match ctx.params_as() {
            Ok(p) => p,
            Err(e) => {
                return StepRunResult::Failure { error: EngineError::StepExecution { step,
                                                                                    message: format!("invalid run params: {e}") } }
            }
        };

        // Decodifica el input si existe.
        let typed_in: Option<<Self as TypedStep>::Input> = match ctx.input.as_ref() {
            None => None,
            Some(a) => match <Self as TypedStep>::Input::from_artifact(a) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    return StepRunResult::Failure { error: EngineError::StepExecution { step,
                                                                                        message: format!("input artifact decode failed: {e:?}") } }
                }
            },
        };

        <Self as TypedStep>::run_typed(self, typed_in, params).into_neutral()
    }
}
