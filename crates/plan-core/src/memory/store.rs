use std::collections::HashMap;

use super::MemoryRecord;
use crate::errors::MemoryError;

/// Ledger de deduplicación del plan.
///
/// Contrato:
/// - `lookup` es una lectura pura.
/// - `insert` es compare-and-insert: falla con `AlreadyExists` si el
///   fingerprint ya está registrado. En implementaciones durables el
///   registro queda en disco antes de retornar Ok.
/// - No hay eviction: los registros se conservan indefinidamente.
pub trait MemoryStore {
    fn lookup(&self, fingerprint: &str) -> Result<Option<MemoryRecord>, MemoryError>;
    fn insert(&mut self, record: MemoryRecord) -> Result<(), MemoryError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMemoryStore {
    inner: HashMap<String, MemoryRecord>,
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryStore for InMemoryMemoryStore {
    fn lookup(&self, fingerprint: &str) -> Result<Option<MemoryRecord>, MemoryError> {
        Ok(self.inner.get(fingerprint).cloned())
    }

    fn insert(&mut self, record: MemoryRecord) -> Result<(), MemoryError> {
        if self.inner.contains_key(&record.fingerprint) {
            return Err(MemoryError::AlreadyExists(record.fingerprint));
        }
        self.inner.insert(record.fingerprint.clone(), record);
        Ok(())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Artifact, ArtifactKind};
    use crate::step::StepName;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn record(fp: &str) -> MemoryRecord {
        MemoryRecord { fingerprint: fp.to_string(),
                       run_id: Uuid::new_v4(),
                       step: StepName::Topics,
                       output: Artifact { kind: ArtifactKind::PlanJson,
                                          hash: "h".into(),
                                          payload: json!({"topics": []}),
                                          metadata: None },
                       recorded_at: Utc::now() }
    }

    #[test]
    fn insert_then_lookup_round_trips() {
        let mut store = InMemoryMemoryStore::new();
        store.insert(record("fp-1")).expect("first insert should succeed");
        let found = store.lookup("fp-1").expect("lookup should not fail");
        assert!(found.is_some());
        assert_eq!(found.unwrap().fingerprint, "fp-1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_insert_fails_without_overwrite() {
        let mut store = InMemoryMemoryStore::new();
        let first = record("fp-dup");
        let original_run = first.run_id;
        store.insert(first).expect("first insert should succeed");

        let err = store.insert(record("fp-dup")).unwrap_err();
        assert!(matches!(err, MemoryError::AlreadyExists(fp) if fp == "fp-dup"));

        // El registro original sobrevive intacto
        let kept = store.lookup("fp-dup").unwrap().unwrap();
        assert_eq!(kept.run_id, original_run);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let store = InMemoryMemoryStore::new();
        assert!(store.lookup("missing").unwrap().is_none());
        assert!(store.is_empty());
    }
}
