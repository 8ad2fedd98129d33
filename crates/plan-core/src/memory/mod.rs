//! Memoria de deduplicación: el ledger de fingerprints y trait MemoryStore.

mod store;
mod types;

pub use store::{InMemoryMemoryStore, MemoryStore};
pub use types::MemoryRecord;
