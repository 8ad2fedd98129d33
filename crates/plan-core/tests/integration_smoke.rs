use plan_core::repo::{InMemoryRunRepository, RunRepository};
use plan_core::{AuditEventKind, AuditStore, InMemoryAuditStore, RunStatus, StepStatus};
use uuid::Uuid;

#[test]
fn integration_smoke_inmemory_store_and_replay() {
    // InMemory audit store should allow append and list deterministically
    let mut store = InMemoryAuditStore::default();
    let run_id = Uuid::new_v4();

    let ev = store.append(run_id,
                          AuditEventKind::RunInitialized { definition_hash: "h1".to_string(),
                                                           step_count: 4,
                                                           engine_version: "P1.0".to_string() })
                  .expect("append ok");
    assert_eq!(ev.seq, 0);

    // Replay of a freshly initialized run leaves the four slots Pending
    let repo = InMemoryRunRepository::new();
    let events = store.list(run_id).expect("list ok");
    let instance = repo.load(run_id, &events);
    assert_eq!(instance.cursor, 0);
    assert_eq!(instance.steps.len(), 4);
    assert!(instance.steps.iter().all(|s| s.status == StepStatus::Pending));
    assert_eq!(instance.status, RunStatus::Initialized);
    assert!(events.iter().any(|e| matches!(e.kind, AuditEventKind::RunInitialized { .. })),
            "RunInitialized missing");
}

#[test]
fn list_filters_by_run_and_keeps_global_seq() {
    let mut store = InMemoryAuditStore::default();
    let run_a = Uuid::new_v4();
    let run_b = Uuid::new_v4();

    for run_id in [run_a, run_b, run_a] {
        store.append(run_id, AuditEventKind::RunCompleted { dedup_hits: 0 })
             .expect("append ok");
    }

    let all = store.list_all().expect("list_all ok");
    let seqs: Vec<u64> = all.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2], "seq refleja el orden global de append");

    let only_a = store.list(run_a).expect("list ok");
    assert_eq!(only_a.len(), 2);
    assert!(only_a.iter().all(|e| e.run_id == run_a));
}
