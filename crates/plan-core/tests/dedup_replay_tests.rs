//! Escenario completo del plan con los steps reales de plan-adapters:
//! primera corrida ejecuta todo, la idéntica siguiente deduplica todo, y un
//! step que falla corta la cadena dejando el resto Pending.

use plan_adapters::steps::hashtags::AttachHashtagsStep;
use plan_adapters::steps::posts::DraftPostsStep;
use plan_adapters::steps::schedule::BuildScheduleStep;
use plan_adapters::steps::topics::GenerateTopicsStep;
use plan_core::repo::build_plan_definition;
use plan_core::step::StepKind;
use plan_core::{typed_step, EngineError, InMemoryAuditStore, InMemoryMemoryStore, InMemoryRunRepository, MemoryStore,
                PlanEngine, RunStatus, StepDefinition, StepName, StepStatus};
use plan_domain::{ContentRequest, PlanRequest};
use serde_json::Value;
use uuid::Uuid;

use plan_adapters::artifacts::{PostDraftsArtifact, TopicListArtifact};

// Step de redacción que falla siempre, con el mismo nombre/posición que el
// real para respetar el orden fijo de la cadena.
typed_step! {
    step ExplodingPostsStep {
        name: StepName::Posts,
        kind: StepKind::Transform,
        input: TopicListArtifact,
        output: PostDraftsArtifact,
        params: Value,
        run(_me, _inp, _p) {
            Err(EngineError::StepExecution { step: StepName::Posts,
                                             message: "draft service unavailable".to_string() })
        }
    }
}

fn plan_engine() -> PlanEngine<InMemoryMemoryStore, InMemoryAuditStore, InMemoryRunRepository> {
    PlanEngine::in_memory().first_step(GenerateTopicsStep::new())
                           .add_step(DraftPostsStep::new())
                           .add_step(AttachHashtagsStep::new())
                           .add_step(BuildScheduleStep::new())
                           .build()
}

fn brand_request_params() -> Value {
    let raw = ContentRequest::new("Build trust by documenting my journey learning AI agents from zero",
                                  "busy entrepreneurs who want to level up",
                                  "direct, practical, supportive",
                                  "Comment 'PLAN' and I will share the next steps.");
    PlanRequest::from_raw(&raw).expect("request valido").params()
}

#[test]
fn first_run_executes_everything_and_rerun_skips_everything() {
    let mut engine = plan_engine();
    let params = brand_request_params();

    let first = engine.run_plan(&params).expect("first run ok");
    let first_instance = engine.instance_for(first).expect("instance");
    assert_eq!(first_instance.status, RunStatus::Completed);
    assert!(first_instance.steps.iter().all(|s| s.status == StepStatus::Completed));
    assert_eq!(engine.memory().len(), 4);

    let second = engine.run_plan(&params).expect("second run ok");
    assert_eq!(engine.event_variants(second).expect("variants"),
               vec!["I", "K", "K", "K", "K", "C"]);
    assert_eq!(engine.memory().len(), 4, "la memoria no crece en la recorrida");

    let report = engine.report_for(second).expect("report");
    assert_eq!(report.dedup_count, 4);
    assert!(report.errors.is_empty());
}

#[test]
fn failing_step_stops_the_chain_and_marks_the_run_failed() {
    let definition = build_plan_definition(vec![Box::new(GenerateTopicsStep::new()) as Box<dyn StepDefinition>,
                                                Box::new(ExplodingPostsStep::new()),
                                                Box::new(AttachHashtagsStep::new()),
                                                Box::new(BuildScheduleStep::new())]);
    let mut engine = PlanEngine::new_with_stores(InMemoryMemoryStore::new(),
                                                 InMemoryAuditStore::new(),
                                                 InMemoryRunRepository::new());
    let params = brand_request_params();
    let run_id = Uuid::new_v4();

    let err = engine.run_to_completion(run_id, &definition, &params).unwrap_err();
    assert!(matches!(err, EngineError::StepExecution { step: StepName::Posts, .. }));

    let instance = engine.instance_for(run_id).expect("instance");
    assert_eq!(instance.status, RunStatus::Failed);
    assert_eq!(instance.steps[0].status, StepStatus::Completed);
    assert_eq!(instance.steps[1].status, StepStatus::Failed);
    assert_eq!(instance.steps[2].status, StepStatus::Pending, "los pasos posteriores no se intentan");
    assert_eq!(instance.steps[3].status, StepStatus::Pending);
    assert_eq!(engine.event_variants(run_id).expect("variants"),
               vec!["I", "S", "F", "S", "X"]);

    // Un run fallido no se retoma.
    let retry = engine.run_to_completion(run_id, &definition, &params).unwrap_err();
    assert!(matches!(retry, EngineError::RunHasFailed));

    // Un run nuevo con el mismo request deduplica lo que sí quedó en
    // memoria (Topics) y vuelve a fallar en Posts.
    let second = Uuid::new_v4();
    let err = engine.run_to_completion(second, &definition, &params).unwrap_err();
    assert!(matches!(err, EngineError::StepExecution { .. }));
    assert_eq!(engine.event_variants(second).expect("variants"),
               vec!["I", "K", "S", "X"]);
    assert_eq!(engine.memory().len(), 1, "solo Topics quedó registrado");
}

#[test]
fn audit_trail_is_ordered_and_timestamps_never_go_back() {
    let mut engine = plan_engine();
    let params = brand_request_params();
    let run_id = engine.run_plan(&params).expect("run ok");

    let events = engine.events_for(run_id).expect("events");
    for pair in events.windows(2) {
        assert!(pair[0].seq < pair[1].seq, "seq estrictamente creciente");
        assert!(pair[0].ts <= pair[1].ts, "timestamps nunca retroceden");
    }

    // El orden de steps en el log respeta la cadena fija.
    let started: Vec<StepName> = events.iter()
                                       .filter_map(|e| match e.kind {
                                           plan_core::AuditEventKind::StepStarted { step, .. } => Some(step),
                                           _ => None,
                                       })
                                       .collect();
    assert_eq!(started, vec![StepName::Topics, StepName::Posts, StepName::Hashtags, StepName::Schedule]);
}
