//! plan-core: Motor lineal determinista del plan de contenido
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod memory;
pub mod model;
pub mod repo;
pub mod report;
pub mod step;

pub use engine::{EngineBuilder, EngineBuilderInit, PlanEngine, RunCtx};
pub use errors::{AuditError, EngineError, MemoryError};
pub use event::{output_preview, AuditEvent, AuditEventKind, AuditStore, InMemoryAuditStore, LogLine};
pub use memory::{InMemoryMemoryStore, MemoryRecord, MemoryStore};
pub use model::{step_fingerprint, Artifact, ArtifactKind, ArtifactSpec, ExecutionContext};
pub use repo::{build_plan_definition, InMemoryRunRepository, PlanDefinition, RunInstance, RunRepository, RunStatus, StepSlot};
pub use report::{Report, StepReport};
pub use step::{Pipe, SameAs, StepDefinition, StepKind, StepName, StepRunResult, StepRunResultTyped, StepStatus, TypedStep};

// Las macros typed_artifact!/typed_step! se exportan vía #[macro_export].

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Artifact y steps mínimos para ejercitar el motor sin la capa de
    // adaptadores real. Cada stub respeta el nombre/orden del plan.
    typed_artifact!(NoteSpec { note: String });

    typed_step! {
        source TopicsStub {
            name: StepName::Topics,
            output: NoteSpec,
            params: serde_json::Value,
            run(_me, _p) {
                Ok(NoteSpec { note: "topics".to_string(), schema_version: 1 })
            }
        }
    }

    typed_step! {
        step PostsStub {
            name: StepName::Posts,
            kind: StepKind::Transform,
            input: NoteSpec,
            output: NoteSpec,
            params: serde_json::Value,
            run(_me, inp, _p) {
                Ok(NoteSpec { note: format!("{}>posts", inp.note), schema_version: 1 })
            }
        }
    }

    typed_step! {
        step HashtagsStub {
            name: StepName::Hashtags,
            kind: StepKind::Transform,
            input: NoteSpec,
            output: NoteSpec,
            params: serde_json::Value,
            run(_me, inp, _p) {
                Ok(NoteSpec { note: format!("{}>hashtags", inp.note), schema_version: 1 })
            }
        }
    }

    typed_step! {
        step ScheduleStub {
            name: StepName::Schedule,
            kind: StepKind::Sink,
            input: NoteSpec,
            output: NoteSpec,
            params: serde_json::Value,
            run(_me, inp, _p) {
                Ok(NoteSpec { note: format!("{}>schedule", inp.note), schema_version: 1 })
            }
        }
    }

    fn demo_engine() -> PlanEngine<InMemoryMemoryStore, InMemoryAuditStore, InMemoryRunRepository> {
        PlanEngine::in_memory().first_step(TopicsStub::new())
                               .add_step(PostsStub::new())
                               .add_step(HashtagsStub::new())
                               .add_step(ScheduleStub::new())
                               .build()
    }

    fn demo_params() -> serde_json::Value {
        json!({
            "goal": "Ship the v1 launch series",
            "audience": "indie developers",
            "tone": "casual",
            "cta": "Join the beta",
        })
    }

    #[test]
    fn full_run_completes_and_records_memory() {
        let mut engine = demo_engine();
        let run_id = engine.run_plan(&demo_params()).expect("run should complete");

        let variants = engine.event_variants(run_id).expect("events should list");
        assert_eq!(variants, vec!["I", "S", "F", "S", "F", "S", "F", "S", "F", "C"]);
        assert_eq!(engine.memory().len(), 4);

        let report = engine.report_for(run_id).expect("report should derive");
        assert_eq!(report.steps.len(), 4);
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Completed));
        assert_eq!(report.dedup_count, 0);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn identical_rerun_skips_every_step() {
        let mut engine = demo_engine();
        let first = engine.run_plan(&demo_params()).expect("first run should complete");
        let second = engine.run_plan(&demo_params()).expect("second run should complete");
        assert_ne!(first, second, "each run gets its own id");

        let variants = engine.event_variants(second).expect("events should list");
        assert_eq!(variants, vec!["I", "K", "K", "K", "K", "C"]);
        assert_eq!(engine.memory().len(), 4, "rerun must not add memory records");

        let report = engine.report_for(second).expect("report should derive");
        assert_eq!(report.dedup_count, 4);
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Skipped));

        // Los eventos de skip citan al run que produjo el output original
        let events = engine.events_for(second).expect("events");
        for ev in &events {
            if let AuditEventKind::StepSkipped { source_run, .. } = &ev.kind {
                assert_eq!(*source_run, first);
            }
        }
    }

    #[test]
    fn case_variant_request_still_deduplicates() {
        let mut engine = demo_engine();
        engine.run_plan(&demo_params()).expect("first run");

        let shouty = json!({
            "goal": "SHIP THE V1 LAUNCH SERIES",
            "audience": "Indie Developers",
            "tone": "Casual",
            "cta": "JOIN THE BETA",
        });
        let second = engine.run_plan(&shouty).expect("second run");
        let report = engine.report_for(second).expect("report");
        assert_eq!(report.dedup_count, 4, "dedup ignores request casing");
        assert_eq!(engine.memory().len(), 4);
    }

    #[test]
    fn changed_request_invalidates_the_whole_chain() {
        let mut engine = demo_engine();
        engine.run_plan(&demo_params()).expect("first run");

        let mut changed = demo_params();
        changed["cta"] = json!("Preorder today");
        let second = engine.run_plan(&changed).expect("second run");

        let report = engine.report_for(second).expect("report");
        assert_eq!(report.dedup_count, 0, "any field change re-executes all steps");
        assert_eq!(engine.memory().len(), 8);
    }

    #[test]
    fn out_of_order_definition_never_touches_state() {
        let mut engine = PlanEngine::new_with_stores(InMemoryMemoryStore::new(),
                                                     InMemoryAuditStore::new(),
                                                     InMemoryRunRepository::new());
        let steps: Vec<Box<dyn StepDefinition>> = vec![Box::new(PostsStub::new()),
                                                       Box::new(TopicsStub::new()),
                                                       Box::new(HashtagsStub::new()),
                                                       Box::new(ScheduleStub::new())];
        engine.set_default_definition(build_plan_definition(steps));

        let err = engine.run_plan(&demo_params()).unwrap_err();
        assert!(matches!(err, EngineError::OutOfOrderDefinition(_)));
        assert!(engine.audit().list_all().expect("list_all").is_empty(),
                "invalid definition must not emit events");
        assert!(engine.memory().is_empty());
    }

    #[test]
    fn aborted_run_resumes_where_it_left() {
        let mut engine = PlanEngine::new_with_stores(InMemoryMemoryStore::new(),
                                                     InMemoryAuditStore::new(),
                                                     InMemoryRunRepository::new());
        let definition = Pipe::new(TopicsStub::new()).then(PostsStub::new())
                                                     .then(HashtagsStub::new())
                                                     .then(ScheduleStub::new())
                                                     .build();
        let params = demo_params();
        let run_id = uuid::Uuid::new_v4();

        // Primer tramo: dos pasos y abandono cooperativo entre pasos.
        {
            let mut ctx = RunCtx::new(&mut engine, run_id, &definition, &params);
            ctx.run_n(2).expect("partial run should advance");
        }
        let halfway = engine.instance_for(run_id).expect("instance");
        assert_eq!(halfway.cursor, 2);
        assert_eq!(halfway.status, RunStatus::Running);

        // Retomar el mismo run: los pasos hechos no se repiten.
        {
            let mut ctx = RunCtx::new(&mut engine, run_id, &definition, &params);
            ctx.run_to_completion().expect("resume should complete");
        }
        let variants = engine.event_variants(run_id).expect("events");
        assert_eq!(variants, vec!["I", "S", "F", "S", "F", "S", "F", "S", "F", "C"]);
        assert_eq!(engine.memory().len(), 4);
    }
}
