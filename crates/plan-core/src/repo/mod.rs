pub mod types;
pub use types::{RunInstance, RunRepository, RunStatus, StepSlot};
pub use types::{build_plan_definition, InMemoryRunRepository, PlanDefinition};
