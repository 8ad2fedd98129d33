//! Engine module: orquestación del plan de contenido.
//!
//! Provee el motor (`PlanEngine`), el patrón builder y el contexto de run
//! para ejecución determinista con deduplicación por fingerprint.

pub mod builder;
pub mod core;
pub mod run_ctx;

pub use builder::{EngineBuilder, EngineBuilderInit};
pub use core::PlanEngine;
pub use run_ctx::RunCtx;

pub use crate::event::{AuditEvent, AuditEventKind, AuditStore, InMemoryAuditStore};
pub use crate::memory::{InMemoryMemoryStore, MemoryRecord, MemoryStore};
pub use crate::repo::{InMemoryRunRepository, PlanDefinition, RunRepository, RunStatus};
pub use crate::step::{StepRunResult, StepStatus};
