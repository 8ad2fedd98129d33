//! Implementaciones JSONL de los traits del core.
//!
//! Objetivo general del módulo:
//! - Proveer una capa de persistencia durable (archivos JSONL) con paridad
//!   1:1 respecto al backend en memoria.
//! - Mantener determinismo del motor: el replay de eventos reconstruye el
//!   mismo estado con cualquiera de los dos backends.
//! - Aislar por completo el formato de archivo del `plan-core`.
//!
//! Formato:
//! - Primera línea: cabecera `{"ledger":"<nombre>","version":1}`.
//! - Una línea JSON por registro, en orden de append. Sin updates ni
//!   deletes.
//! - Cada `insert`/`append` escribe la línea y hace fsync antes de retornar.
//!
//! Recuperación al abrir:
//! - Una última línea ilegible es un append abortado (proceso cortado a
//!   mitad de escritura): se recorta con un `warn!` y el resto del ledger
//!   sigue siendo válido.
//! - Una línea ilegible en el medio del archivo es corrupción real: el open
//!   falla con `PersistenceError::Corrupt` y no se toca el archivo.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use plan_core::{AuditError, AuditEvent, AuditEventKind, AuditStore, MemoryError, MemoryRecord, MemoryStore};

use crate::config::StoreConfig;
use crate::error::PersistenceError;

const LEDGER_VERSION: u32 = 1;
const MEMORY_LEDGER: &str = "planflow.memory";
const AUDIT_LEDGER: &str = "planflow.audit";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct LedgerHeader {
    ledger: String,
    version: u32,
}

impl LedgerHeader {
    fn new(ledger: &str) -> Self {
        Self { ledger: ledger.to_string(),
               version: LEDGER_VERSION }
    }
}

/// Serializa `value` como una línea JSONL y la deja en disco (fsync) antes
/// de retornar.
fn write_json_line<T: Serialize>(file: &mut File, value: &T) -> Result<(), PersistenceError> {
    let mut line = serde_json::to_string(value).map_err(|e| PersistenceError::Io(format!("serialize: {e}")))?;
    line.push('\n');
    file.write_all(line.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Abre un ledger: valida la cabecera, carga los registros legibles y deja
/// un handle en modo append listo para escribir.
///
/// El recorte de una cola ilegible (append abortado) ocurre acá, de modo que
/// las escrituras posteriores nunca se concatenen con bytes a medio escribir.
fn open_ledger<T: DeserializeOwned>(path: &Path, ledger: &str) -> Result<(File, Vec<T>), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut records = Vec::new();
    let mut needs_header = true;
    let mut valid_len = 0usize; // bytes del prefijo válido del archivo
    let mut missing_final_newline = false;
    let mut truncate_to: Option<usize> = None;

    if path.exists() {
        let content = fs::read_to_string(path)?;
        let segments: Vec<&str> = content.split_inclusive('\n').collect();
        let last_index = segments.len().saturating_sub(1);

        for (i, segment) in segments.iter().enumerate() {
            let line = segment.strip_suffix('\n').unwrap_or(segment);

            if i == 0 {
                match serde_json::from_str::<LedgerHeader>(line) {
                    Ok(header) if header.ledger != ledger => {
                        return Err(PersistenceError::UnsupportedFormat { path: path.display().to_string(),
                                                                         found: header.ledger });
                    }
                    Ok(header) if header.version != LEDGER_VERSION => {
                        return Err(PersistenceError::UnsupportedFormat { path: path.display().to_string(),
                                                                         found: format!("version {}", header.version) });
                    }
                    Ok(_) => {
                        needs_header = false;
                        valid_len += segment.len();
                        missing_final_newline = !segment.ends_with('\n');
                    }
                    Err(e) if i == last_index => {
                        // Cabecera a medio escribir y sin datos detrás:
                        // el archivo se trata como recién creado.
                        warn!("ledger {}: torn header, starting fresh ({e})", path.display());
                        truncate_to = Some(0);
                    }
                    Err(e) => {
                        return Err(PersistenceError::Corrupt { path: path.display().to_string(),
                                                               line: 1,
                                                               detail: format!("unreadable header: {e}") });
                    }
                }
                continue;
            }

            match serde_json::from_str::<T>(line) {
                Ok(record) => {
                    records.push(record);
                    valid_len += segment.len();
                    missing_final_newline = !segment.ends_with('\n');
                }
                Err(e) if i == last_index => {
                    warn!("ledger {}: dropping torn trailing line {} ({e})", path.display(), i + 1);
                    truncate_to = Some(valid_len);
                }
                Err(e) => {
                    return Err(PersistenceError::Corrupt { path: path.display().to_string(),
                                                           line: i + 1,
                                                           detail: e.to_string() });
                }
            }
        }
    }

    if let Some(len) = truncate_to {
        let trim = OpenOptions::new().write(true).open(path)?;
        trim.set_len(len as u64)?;
        trim.sync_all()?;
        missing_final_newline = false;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        write_json_line(&mut file, &LedgerHeader::new(ledger))?;
    } else if missing_final_newline {
        // Última línea válida pero sin salto (fsync ganado a medias):
        // se completa para que el próximo append arranque limpio.
        file.write_all(b"\n")?;
        file.sync_all()?;
    }

    debug!("open ledger {} records={}", path.display(), records.len());
    Ok((file, records))
}

/// `MemoryStore` durable sobre un archivo JSONL con índice en memoria.
///
/// El índice completo se carga al abrir; `lookup` nunca toca el disco y
/// `insert` es compare-and-insert con la línea ya fsynceada antes de
/// retornar Ok.
#[derive(Debug)]
pub struct FileMemoryStore {
    path: PathBuf,
    file: File,
    index: HashMap<String, MemoryRecord>,
}

impl FileMemoryStore {
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let (file, records) = open_ledger::<MemoryRecord>(path, MEMORY_LEDGER)?;
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            if index.contains_key(&record.fingerprint) {
                // El contrato at-most-once se rompió fuera del proceso.
                return Err(PersistenceError::Corrupt { path: path.display().to_string(),
                                                       line: i + 2,
                                                       detail: format!("duplicate fingerprint {}", record.fingerprint) });
            }
            index.insert(record.fingerprint.clone(), record);
        }
        Ok(Self { path: path.to_path_buf(),
                  file,
                  index })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoryStore for FileMemoryStore {
    fn lookup(&self, fingerprint: &str) -> Result<Option<MemoryRecord>, MemoryError> {
        Ok(self.index.get(fingerprint).cloned())
    }

    fn insert(&mut self, record: MemoryRecord) -> Result<(), MemoryError> {
        if self.index.contains_key(&record.fingerprint) {
            return Err(MemoryError::AlreadyExists(record.fingerprint));
        }
        write_json_line(&mut self.file, &record)?;
        debug!("memory insert fingerprint={} step={}", record.fingerprint, record.step);
        self.index.insert(record.fingerprint.clone(), record);
        Ok(())
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

/// `AuditStore` durable sobre un archivo JSONL.
///
/// El `seq` es global al archivo y continúa desde el último evento cargado,
/// de modo que el orden total sobrevive reinicios del proceso.
#[derive(Debug)]
pub struct FileAuditStore {
    path: PathBuf,
    file: File,
    events: Vec<AuditEvent>,
    next_seq: u64,
}

impl FileAuditStore {
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let (file, events) = open_ledger::<AuditEvent>(path, AUDIT_LEDGER)?;
        for (i, pair) in events.windows(2).enumerate() {
            if pair[1].seq <= pair[0].seq {
                return Err(PersistenceError::Corrupt { path: path.display().to_string(),
                                                       line: i + 3,
                                                       detail: format!("seq {} after {}", pair[1].seq, pair[0].seq) });
            }
        }
        let next_seq = events.last().map(|e| e.seq + 1).unwrap_or(0);
        Ok(Self { path: path.to_path_buf(),
                  file,
                  events,
                  next_seq })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditStore for FileAuditStore {
    fn append(&mut self, run_id: Uuid, kind: AuditEventKind) -> Result<AuditEvent, AuditError> {
        let ev = AuditEvent { seq: self.next_seq,
                              run_id,
                              kind,
                              ts: chrono::Utc::now() };
        write_json_line(&mut self.file, &ev)?;
        debug!("audit append seq={} run_id={} status={}", ev.seq, run_id, ev.kind.status_label());
        self.next_seq += 1;
        self.events.push(ev.clone());
        Ok(ev)
    }

    fn list(&self, run_id: Uuid) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(self.events.iter().filter(|e| e.run_id == run_id).cloned().collect())
    }

    fn list_all(&self) -> Result<Vec<AuditEvent>, AuditError> {
        Ok(self.events.clone())
    }
}

/// Abre (creando si hace falta) los dos ledgers bajo el directorio de la
/// config.
pub fn open_stores(config: &StoreConfig) -> Result<(FileMemoryStore, FileAuditStore), PersistenceError> {
    fs::create_dir_all(&config.data_dir)?;
    let memory = FileMemoryStore::open(&config.memory_path())?;
    let audit = FileAuditStore::open(&config.audit_path())?;
    Ok((memory, audit))
}
