use plan_adapters::{content_plan_definition, render_deliverables, TaggedPostsArtifact, TopicListArtifact, WeeklyScheduleArtifact};
use plan_core::{ArtifactSpec, InMemoryRunRepository, PlanEngine, StepName};
use plan_domain::{ContentRequest, PlanRequest};
use plan_persistence::{open_stores, FileAuditStore, FileMemoryStore, StoreConfig};
use uuid::Uuid;

type FileEngine = PlanEngine<FileMemoryStore, FileAuditStore, InMemoryRunRepository>;

fn main() {
    // Cargar .env si existe para obtener PLANFLOW_DATA_DIR
    let _ = dotenvy::dotenv();
    // CLI: `plan-cli run --goal <TXT> --audience <TXT> --tone <TXT> --cta <TXT> [--data-dir <DIR>] [--json]`
    //      `plan-cli report --run <UUID> [--data-dir <DIR>] [--json]`
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "run" {
        let mut goal: Option<String> = None;
        let mut audience: Option<String> = None;
        let mut tone: Option<String> = None;
        let mut cta: Option<String> = None;
        let mut data_dir: Option<String> = None;
        let mut as_json = false;
        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--goal" => { i += 1; if i < args.len() { goal = Some(args[i].clone()); } }
                "--audience" => { i += 1; if i < args.len() { audience = Some(args[i].clone()); } }
                "--tone" => { i += 1; if i < args.len() { tone = Some(args[i].clone()); } }
                "--cta" => { i += 1; if i < args.len() { cta = Some(args[i].clone()); } }
                "--data-dir" => { i += 1; if i < args.len() { data_dir = Some(args[i].clone()); } }
                "--json" => { as_json = true; }
                _ => {}
            }
            i += 1;
        }

        if let (Some(goal), Some(audience), Some(tone), Some(cta)) = (goal, audience, tone, cta) {
            // Guardrails antes de abrir stores: un request inválido no deja rastro.
            let raw = ContentRequest::new(goal, audience, tone, cta);
            let request = match PlanRequest::from_raw(&raw) {
                Ok(r) => r,
                Err(e) => { eprintln!("[plan-cli run] request inválido: {e}"); std::process::exit(1); }
            };

            let config = match data_dir {
                Some(dir) => StoreConfig::with_dir(dir),
                None => StoreConfig::from_env(),
            };
            let (memory, audit) = match open_stores(&config) {
                Ok(stores) => stores,
                Err(e) => { eprintln!("[plan-cli run] stores: {e}"); std::process::exit(2); }
            };

            let mut engine: FileEngine = PlanEngine::new_with_stores(memory, audit, InMemoryRunRepository::new());
            engine.set_default_definition(content_plan_definition());

            let run_id = Uuid::new_v4();
            let params = request.params();
            let outcome = engine.run_plan_with_id(run_id, &params);

            let events = match engine.events_for(run_id) {
                Ok(ev) => ev,
                Err(e) => { eprintln!("[plan-cli run] audit: {e}"); std::process::exit(2); }
            };
            let report = match engine.report_for(run_id) {
                Ok(r) => r,
                Err(e) => { eprintln!("[plan-cli run] reporte: {e}"); std::process::exit(2); }
            };

            match outcome {
                Ok(()) => {
                    if as_json {
                        match serde_json::to_string_pretty(&report) {
                            Ok(s) => println!("{s}"),
                            Err(e) => { eprintln!("[plan-cli run] reporte: {e}"); std::process::exit(2); }
                        }
                    } else {
                        print_deliverables(&engine);
                        println!("{}", report.summary(&events, 10));
                    }
                    std::process::exit(0);
                }
                Err(e) => {
                    if as_json {
                        if let Ok(s) = serde_json::to_string_pretty(&report) { println!("{s}"); }
                    } else {
                        println!("{}", report.summary(&events, 10));
                    }
                    eprintln!("[plan-cli run] fallo: {e}");
                    std::process::exit(2);
                }
            }
        } else {
            eprintln!("Uso: plan-cli run --goal <TXT> --audience <TXT> --tone <TXT> --cta <TXT> [--data-dir <DIR>] [--json]");
            std::process::exit(2);
        }
    } else if args.len() >= 2 && args[1] == "report" {
        let mut run: Option<Uuid> = None;
        let mut data_dir: Option<String> = None;
        let mut as_json = false;
        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--run" => { i += 1; if i < args.len() { run = Uuid::parse_str(&args[i]).ok(); } }
                "--data-dir" => { i += 1; if i < args.len() { data_dir = Some(args[i].clone()); } }
                "--json" => { as_json = true; }
                _ => {}
            }
            i += 1;
        }

        if let Some(run_id) = run {
            let config = match data_dir {
                Some(dir) => StoreConfig::with_dir(dir),
                None => StoreConfig::from_env(),
            };
            let (memory, audit) = match open_stores(&config) {
                Ok(stores) => stores,
                Err(e) => { eprintln!("[plan-cli report] stores: {e}"); std::process::exit(2); }
            };

            let engine: FileEngine = PlanEngine::new_with_stores(memory, audit, InMemoryRunRepository::new());
            let events = match engine.events_for(run_id) {
                Ok(ev) => ev,
                Err(e) => { eprintln!("[plan-cli report] audit: {e}"); std::process::exit(2); }
            };
            if events.is_empty() { eprintln!("[plan-cli report] run no encontrado: {run_id}"); std::process::exit(2); }

            let report = match engine.report_for(run_id) {
                Ok(r) => r,
                Err(e) => { eprintln!("[plan-cli report] reporte: {e}"); std::process::exit(2); }
            };
            if as_json {
                match serde_json::to_string_pretty(&report) {
                    Ok(s) => println!("{s}"),
                    Err(e) => { eprintln!("[plan-cli report] reporte: {e}"); std::process::exit(2); }
                }
            } else {
                println!("{}", report.summary(&events, 10));
            }
            std::process::exit(0);
        } else {
            eprintln!("Uso: plan-cli report --run <UUID> [--data-dir <DIR>] [--json]");
            std::process::exit(2);
        }
    } else {
        eprintln!("plan-cli: use los subcomandos 'run' o 'report'");
        std::process::exit(2);
    }
}

/// Imprime los artefactos del run recién completado. Si la cache no tiene
/// los tres artefactos finales (no debería pasar tras un run completo) el
/// bloque se omite y queda el reporte como salida.
fn print_deliverables(engine: &FileEngine) {
    let topics = engine.output_for(StepName::Topics)
                       .and_then(|a| TopicListArtifact::from_artifact(a).ok());
    let posts = engine.output_for(StepName::Hashtags)
                      .and_then(|a| TaggedPostsArtifact::from_artifact(a).ok());
    let schedule = engine.output_for(StepName::Schedule)
                         .and_then(|a| WeeklyScheduleArtifact::from_artifact(a).ok());
    if let (Some(topics), Some(posts), Some(schedule)) = (topics, posts, schedule) {
        print!("{}", render_deliverables(&topics, &posts, &schedule));
        println!();
    }
}
