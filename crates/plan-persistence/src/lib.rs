//! plan-persistence
//!
//! Implementaciones durables (archivos JSONL append-only) de `MemoryStore`
//! y `AuditStore` más utilidades de configuración. El objetivo es paridad
//! 1:1 con los backends en memoria: el replay de eventos debe reconstruir
//! el mismo estado y la deduplicación debe sobrevivir reinicios.
//!
//! Módulos:
//! - `jsonl`: implementaciones sobre archivos JSONL (una línea por registro,
//!   fsync antes de retornar).
//! - `config`: carga de configuración desde .env / variables de entorno.
//! - `error`: mapeo de errores de IO/formato a variantes semánticas.

pub mod config;
pub mod error;
pub mod jsonl;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use jsonl::{open_stores, FileAuditStore, FileMemoryStore};
