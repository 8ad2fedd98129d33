use plan_adapters::{render_deliverables, AttachHashtagsStep, BuildScheduleStep, DraftPostsStep, GenerateTopicsStep, TaggedPostsArtifact, TopicListArtifact, WeeklyScheduleArtifact};
use plan_core::{ArtifactSpec, MemoryStore, PlanEngine, StepName, StepStatus};
use plan_domain::{ContentRequest, PlanRequest};
use serde_json::to_string_pretty;

fn main() {
    // Cargar variables de entorno desde .env si existe (antes de leer PLANFLOW_DATA_DIR)
    let _ = dotenvy::dotenv();

    // Request de ejemplo: el escenario de marca documentado del sistema.
    let raw = ContentRequest::new("Build trust by documenting my journey learning AI agents from zero",
                                  "busy entrepreneurs who want to level up",
                                  "direct, practical, supportive",
                                  "Comment 'PLAN' and I will share the next steps.");
    let request = PlanRequest::from_raw(&raw).expect("el request del demo pasa guardrails");
    let params = request.params();

    // Motor en memoria con la cadena canónica de cuatro pasos.
    let mut engine = PlanEngine::in_memory().first_step(GenerateTopicsStep::new())
                                            .add_step(DraftPostsStep::new())
                                            .add_step(AttachHashtagsStep::new())
                                            .add_step(BuildScheduleStep::new())
                                            .build();

    println!("--- Run A: ejecución completa ---");
    let run_a = engine.run_plan(&params).expect("run A ok");
    let variants_a = engine.event_variants(run_a).unwrap_or_default();
    println!("Eventos run A: {:?}", variants_a);

    // Entregables del plan recién generado.
    let topics = engine.output_for(StepName::Topics)
                       .and_then(|a| TopicListArtifact::from_artifact(a).ok());
    let posts = engine.output_for(StepName::Hashtags)
                      .and_then(|a| TaggedPostsArtifact::from_artifact(a).ok());
    let schedule = engine.output_for(StepName::Schedule)
                         .and_then(|a| WeeklyScheduleArtifact::from_artifact(a).ok());
    if let (Some(topics), Some(posts), Some(schedule)) = (topics, posts, schedule) {
        println!();
        print!("{}", render_deliverables(&topics, &posts, &schedule));
    }

    let events_a = engine.events_for(run_a).expect("eventos run A");
    let report_a = engine.report_for(run_a).expect("reporte run A");
    println!();
    println!("{}", report_a.summary(&events_a, 10));
    assert_eq!(report_a.dedup_count, 0, "run A no debe reutilizar nada");
    assert!(report_a.steps.iter().all(|s| s.status == StepStatus::Completed),
            "los cuatro pasos de run A deben completar");

    println!();
    println!("--- Run B: mismo request, todo deduplicado ---");
    let run_b = engine.run_plan(&params).expect("run B ok");
    let variants_b = engine.event_variants(run_b).unwrap_or_default();
    println!("Eventos run B: {:?}", variants_b);
    let report_b = engine.report_for(run_b).expect("reporte run B");
    println!("Reporte run B: {}", to_string_pretty(&report_b).unwrap_or_default());
    assert_eq!(report_b.dedup_count, 4, "run B debe reutilizar los cuatro pasos");
    assert!(report_b.steps.iter().all(|s| s.status == StepStatus::Skipped),
            "ningún paso de run B debe re-ejecutarse");
    assert_eq!(engine.memory().len(), 4, "la memoria no crece en un rerun idéntico");
    println!("!Dedup OK: run B reutilizó los 4 outputs de run A sin re-ejecutar");

    // Demo durable opt-in: misma corrida contra stores JSONL en disco.
    if std::env::var("PLANFLOW_RUN_FILE_DEMO").ok().as_deref() == Some("1") {
        run_file_demo(&params);
    } else {
        eprintln!("[FILE DEMO] Omitido (exporta PLANFLOW_RUN_FILE_DEMO=1 para habilitarlo)");
    }
}

/// Corre el mismo plan contra stores JSONL en PLANFLOW_DATA_DIR. En una
/// segunda invocación del binario los cuatro pasos salen de memoria: el
/// dedup sobrevive al proceso.
fn run_file_demo(params: &serde_json::Value) {
    use plan_adapters::content_plan_definition;
    use plan_core::InMemoryRunRepository;
    use plan_persistence::{open_stores, StoreConfig};

    let config = StoreConfig::from_env();
    let (memory, audit) = match open_stores(&config) {
        Ok(stores) => stores,
        Err(e) => {
            eprintln!("[FILE DEMO] Error abriendo stores: {e}");
            return;
        }
    };
    let mut engine = PlanEngine::new_with_stores(memory, audit, InMemoryRunRepository::new());
    engine.set_default_definition(content_plan_definition());

    match engine.run_plan(params) {
        Ok(run_id) => {
            let variants = engine.event_variants(run_id).unwrap_or_default();
            println!("[FILE DEMO] Eventos: {:?}", variants);
            if let Ok(report) = engine.report_for(run_id) {
                println!("[FILE DEMO] {report}");
                println!("[FILE DEMO] Registros en memoria durable: {}", engine.memory().len());
                if report.dedup_count == 4 {
                    println!("[FILE DEMO] Rerun detectado: el plan completo salió de la memoria durable");
                }
            }
        }
        Err(e) => eprintln!("[FILE DEMO] Error: {e}"),
    }
}
