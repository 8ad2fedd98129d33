//! Steps del plan de contenido, en el orden fijo de la cadena.

pub mod hashtags;
pub mod posts;
pub mod schedule;
pub mod topics;

pub use hashtags::AttachHashtagsStep;
pub use posts::DraftPostsStep;
pub use schedule::BuildScheduleStep;
pub use topics::GenerateTopicsStep;

use plan_core::repo::PlanDefinition;
use plan_core::step::Pipe;

/// Definición canónica del plan: Topics→Posts→Hashtags→Schedule.
///
/// El encadenado por `Pipe` verifica en compilación que el output de cada
/// step coincide con el input del siguiente.
pub fn content_plan_definition() -> PlanDefinition {
    Pipe::new(GenerateTopicsStep::new()).then(DraftPostsStep::new())
                                        .then(AttachHashtagsStep::new())
                                        .then(BuildScheduleStep::new())
                                        .build()
}
