// plan-domain library entry point
pub mod errors;
pub mod guardrails;
pub mod request;

pub use errors::{RequestField, ValidationError};
pub use request::{ContentRequest, PlanRequest};
