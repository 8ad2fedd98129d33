//! Definiciones de eventos de auditoría y trait AuditStore.

mod store;
mod types;

pub use store::{AuditStore, InMemoryAuditStore};
pub use types::{output_preview, AuditEvent, AuditEventKind, LogLine};
