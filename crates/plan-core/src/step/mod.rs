//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad determinista que transforma a lo sumo un
//! `Artifact` de entrada en exactamente un artifact de salida. Este módulo
//! define:
//! - `StepName`: la enumeración cerrada de pasos del plan y su orden fijo.
//! - `StepDefinition`: interfaz neutral usada por el engine.
//! - `TypedStep`: interfaz de alto nivel con tipos fuertes.
//! - `StepRunResult` / `StepRunResultTyped`.
//! - `Pipe` para construir pipelines tipados que validan IO en compilación.

pub mod definition;
pub mod macros; // macros para artifacts y steps tipados
pub mod pipeline;
mod run_result;
mod status;
pub mod typed;

pub use definition::{StepDefinition, StepKind, StepName};
pub use pipeline::{Pipe, SameAs};
pub use run_result::StepRunResult;
pub use status::StepStatus;
pub use typed::{StepRunResultTyped, TypedStep};
