//! Carga de configuración desde variables de entorno.
//! Usa convención `PLANFLOW_DATA_DIR` con un directorio por defecto.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

/// Directorio por defecto donde viven los ledgers.
pub const DEFAULT_DATA_DIR: &str = "planflow_data";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let data_dir = env::var("PLANFLOW_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self { data_dir: PathBuf::from(data_dir) }
    }

    /// Config apuntando a un directorio explícito (CLI `--data-dir`, tests).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: dir.into() }
    }

    pub fn memory_path(&self) -> PathBuf {
        self.data_dir.join("memory.jsonl")
    }

    pub fn audit_path(&self) -> PathBuf {
        self.data_dir.join("audit.jsonl")
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
