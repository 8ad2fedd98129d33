//! Integridad del orden total del log: `seq` global, estrictamente
//! creciente, que continúa tras reabrir el archivo.

use plan_adapters::steps::hashtags::AttachHashtagsStep;
use plan_adapters::steps::posts::DraftPostsStep;
use plan_adapters::steps::schedule::BuildScheduleStep;
use plan_adapters::steps::topics::GenerateTopicsStep;
use plan_core::{AuditStore, InMemoryRunRepository, PlanEngine};
use plan_persistence::{open_stores, FileAuditStore, FileMemoryStore, PersistenceError, StoreConfig};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn file_engine(config: &StoreConfig) -> PlanEngine<FileMemoryStore, FileAuditStore, InMemoryRunRepository> {
    let (memory, audit) = open_stores(config).expect("open stores");
    PlanEngine::builder(memory, audit, InMemoryRunRepository::new()).first_step(GenerateTopicsStep::new())
                                                                    .add_step(DraftPostsStep::new())
                                                                    .add_step(AttachHashtagsStep::new())
                                                                    .add_step(BuildScheduleStep::new())
                                                                    .build()
}

fn params_for(goal: &str) -> serde_json::Value {
    json!({
        "goal": goal,
        "audience": "solo founders",
        "tone": "practical",
        "cta": "Reply GROW",
    })
}

#[test]
fn seq_continues_across_reopen() {
    let dir = TempDir::new().expect("tempdir");
    let config = StoreConfig::with_dir(dir.path());

    {
        let mut engine = file_engine(&config);
        engine.run_plan(&params_for("Grow the newsletter")).expect("first run ok");
    }

    // Proceso nuevo, mismos archivos: el seq no arranca de cero.
    let mut engine = file_engine(&config);
    engine.run_plan(&params_for("Launch the podcast")).expect("second run ok");

    let all = engine.audit().list_all().expect("list_all");
    let seqs: Vec<u64> = all.iter().map(|e| e.seq).collect();
    let expected: Vec<u64> = (0..all.len() as u64).collect();
    assert_eq!(seqs, expected, "seq global contiguo tras reabrir");
    assert_eq!(all.len(), 20, "dos corridas completas sin dedup");

    for pair in all.windows(2) {
        assert!(pair[0].ts <= pair[1].ts, "timestamps nunca retroceden");
    }
}

#[test]
fn out_of_order_seq_is_rejected_at_open() {
    let dir = TempDir::new().expect("tempdir");
    let config = StoreConfig::with_dir(dir.path());
    {
        let mut engine = file_engine(&config);
        engine.run_plan(&params_for("Grow the newsletter")).expect("run ok");
    }

    // Intercambiar dos líneas de eventos rompe el orden total.
    let raw = fs::read_to_string(config.audit_path()).expect("read audit");
    let mut lines: Vec<&str> = raw.lines().collect();
    lines.swap(2, 3);
    let mangled = lines.join("\n") + "\n";
    fs::write(config.audit_path(), mangled).expect("write mangled audit");

    let err = FileAuditStore::open(&config.audit_path()).unwrap_err();
    assert!(matches!(err, PersistenceError::Corrupt { .. }));
}
