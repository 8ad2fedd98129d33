//! Core PlanEngine implementation

use crate::engine::EngineBuilderInit;
use crate::errors::{EngineError, MemoryError};
use crate::event::{output_preview, AuditEventKind, AuditStore};
use crate::hashing::hash_value;
use crate::memory::{MemoryRecord, MemoryStore};
use crate::model::{step_fingerprint, Artifact, ExecutionContext};
use crate::repo::{PlanDefinition, RunRepository, RunStatus};
use crate::report::Report;
use crate::step::{StepName, StepRunResult};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Motor de ejecución del plan de contenido.
///
/// Orquesta la secuencia fija de pasos: por cada paso calcula su
/// fingerprint, consulta la memoria de deduplicación, ejecuta u omite,
/// registra el resultado en memoria y deja rastro en el log de auditoría.
/// Es dueño exclusivo del ciclo de vida del run; memoria y log solo se
/// tocan a través de sus traits.
#[derive(Debug)]
pub struct PlanEngine<M, A, R>
    where M: MemoryStore,
          A: AuditStore,
          R: RunRepository
{
    memory: M,
    audit: A,
    repository: R,
    outputs: HashMap<StepName, Artifact>,
    default_definition: Option<PlanDefinition>,
}

impl<M, A, R> PlanEngine<M, A, R>
    where M: MemoryStore,
          A: AuditStore,
          R: RunRepository
{
    /// Crea un nuevo builder para configurar el engine con stores propios.
    #[inline]
    pub fn builder(memory: M, audit: A, repository: R) -> EngineBuilderInit<M, A, R> {
        EngineBuilderInit { memory, audit, repository }
    }

    /// Crea un nuevo motor con los stores proporcionados.
    pub fn new_with_stores(memory: M, audit: A, repository: R) -> Self {
        Self { memory,
               audit,
               repository,
               outputs: HashMap::new(),
               default_definition: None }
    }

    /// Configura la definición por defecto del plan.
    pub fn set_default_definition(&mut self, definition: PlanDefinition) {
        self.default_definition = Some(definition);
    }

    /// Acceso de lectura a la memoria de deduplicación.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Acceso de lectura al log de auditoría.
    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Output de un paso disponible en la cache del run actual.
    pub fn output_for(&self, step: StepName) -> Option<&Artifact> {
        self.outputs.get(&step)
    }

    /// Ejecuta el plan completo para un request y retorna el run id.
    ///
    /// # Ejemplo
    /// ```ignore
    /// let run_id = engine.run_plan(&request.params())?;
    /// ```
    pub fn run_plan(&mut self, params: &Value) -> Result<Uuid, EngineError> {
        let run_id = Uuid::new_v4();
        self.run_plan_with_id(run_id, params)?;
        Ok(run_id)
    }

    /// Ejecuta el plan completo bajo un run id provisto por el caller.
    /// Útil cuando el caller necesita el id aunque el run termine en error.
    pub fn run_plan_with_id(&mut self, run_id: Uuid, params: &Value) -> Result<(), EngineError> {
        let def = self.default_definition
                      .take()
                      .ok_or_else(|| EngineError::Internal("no plan definition configured".into()))?;

        let result = self.run_to_completion(run_id, &def, params);
        self.default_definition = Some(def);
        result
    }

    /// Ejecuta pasos hasta que el run complete o falle.
    pub fn run_to_completion(&mut self, run_id: Uuid, definition: &PlanDefinition, params: &Value) -> Result<(), EngineError> {
        loop {
            match self.next_with(run_id, definition, params) {
                Ok(()) => continue,
                Err(EngineError::RunCompleted) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    /// Garantiza el evento RunInitialized y devuelve los eventos actuales
    /// del run (incluido el RunInitialized recién emitido si hizo falta).
    fn load_or_init(&mut self, run_id: Uuid, definition: &PlanDefinition) -> Result<Vec<crate::event::AuditEvent>, EngineError> {
        // Invariante de orden: se verifica antes de emitir cualquier evento.
        definition.check_order()?;

        let mut events = self.audit.list(run_id)?;
        let has_init = events.iter().any(|e| matches!(e.kind, AuditEventKind::RunInitialized { .. }));
        if !has_init {
            let ev = self.audit
                         .append(run_id,
                                 AuditEventKind::RunInitialized { definition_hash: definition.definition_hash.clone(),
                                                                  step_count: definition.len(),
                                                                  engine_version: crate::constants::ENGINE_VERSION.to_string() })?;
            events.push(ev);
            // Run nuevo: la cache de outputs del run anterior ya no aplica.
            self.outputs.clear();
        }
        Ok(events)
    }

    /// Ejecuta (o deduplica) el siguiente paso pendiente del run.
    pub(crate) fn next_with(&mut self, run_id: Uuid, definition: &PlanDefinition, params: &Value) -> Result<(), EngineError> {
        let events = self.load_or_init(run_id, definition)?;
        let instance = self.repository.load(run_id, &events);

        match instance.status {
            RunStatus::Completed => return Err(EngineError::RunCompleted),
            RunStatus::Failed => return Err(EngineError::RunHasFailed),
            _ => {}
        }

        let cursor = instance.cursor;
        if cursor >= definition.len() {
            // Todos los pasos terminaron pero el evento de cierre no llegó a
            // escribirse (proceso abortado justo antes). Cerramos acá.
            self.complete_run(run_id)?;
            return Err(EngineError::RunCompleted);
        }

        let step_def = &definition.steps[cursor];
        let step = step_def.name();
        let fingerprint = step_fingerprint(params, step);

        // Dedup: la memoria se consulta antes de ejecutar.
        if let Some(record) = self.memory.lookup(&fingerprint)? {
            return self.handle_step_skip(run_id, cursor, step, record, definition);
        }

        let input = self.resolve_input(cursor, definition, params)?;
        let ctx = ExecutionContext { input,
                                     params: params.clone() };

        let _started = self.audit.append(run_id,
                                         AuditEventKind::StepStarted { step_index: cursor,
                                                                       step })?;

        match step_def.run(&ctx) {
            StepRunResult::Success { output } => self.handle_step_success(run_id, cursor, step, fingerprint, output, definition),
            StepRunResult::Failure { error } => self.handle_step_failure(run_id, cursor, step, error),
        }
    }

    /// Input del paso actual: el output del paso anterior.
    ///
    /// Primero se busca en la cache del run; si el proceso se reinició a
    /// mitad de un run, el output previo se recupera desde la memoria
    /// durable y se repuebla la cache.
    fn resolve_input(&mut self, cursor: usize, definition: &PlanDefinition, params: &Value) -> Result<Option<Artifact>, EngineError> {
        if cursor == 0 {
            return Ok(None);
        }
        let prev = definition.steps[cursor - 1].name();
        if let Some(artifact) = self.outputs.get(&prev) {
            return Ok(Some(artifact.clone()));
        }
        let prev_fp = step_fingerprint(params, prev);
        if let Some(record) = self.memory.lookup(&prev_fp)? {
            self.outputs.insert(prev, record.output.clone());
            return Ok(Some(record.output));
        }
        Err(EngineError::MissingInput { step: definition.steps[cursor].name() })
    }

    fn handle_step_skip(&mut self,
                        run_id: Uuid,
                        cursor: usize,
                        step: StepName,
                        record: MemoryRecord,
                        definition: &PlanDefinition)
                        -> Result<(), EngineError> {
        self.outputs.insert(step, record.output.clone());

        let message = format!("already completed for this request; reusing output from run {}", record.run_id);
        let _skipped = self.audit.append(run_id,
                                         AuditEventKind::StepSkipped { step_index: cursor,
                                                                       step,
                                                                       fingerprint: record.fingerprint.clone(),
                                                                       output_hash: record.output.hash.clone(),
                                                                       source_run: record.run_id,
                                                                       message })?;

        if cursor + 1 == definition.len() {
            self.complete_run(run_id)?;
        }
        Ok(())
    }

    fn handle_step_success(&mut self,
                           run_id: Uuid,
                           cursor: usize,
                           step: StepName,
                           fingerprint: String,
                           mut output: Artifact,
                           definition: &PlanDefinition)
                           -> Result<(), EngineError> {
        output.hash = hash_value(&output.payload);
        self.outputs.insert(step, output.clone());

        let record = MemoryRecord { fingerprint: fingerprint.clone(),
                                    run_id,
                                    step,
                                    output: output.clone(),
                                    recorded_at: Utc::now() };

        match self.memory.insert(record) {
            Ok(()) => {
                let message = output_preview(&output.payload);
                let _finished = self.audit.append(run_id,
                                                  AuditEventKind::StepCompleted { step_index: cursor,
                                                                                  step,
                                                                                  output_hash: output.hash.clone(),
                                                                                  fingerprint,
                                                                                  message })?;
            }
            Err(MemoryError::AlreadyExists(_)) => {
                // Carrera benigna: otro run registró el mismo fingerprint
                // primero. Convergemos al registro ganador como dedup hit.
                let record = self.memory
                                 .lookup(&fingerprint)?
                                 .ok_or_else(|| EngineError::Internal(format!("fingerprint {fingerprint} reported as existing but lookup found nothing")))?;
                return self.handle_step_skip(run_id, cursor, step, record, definition);
            }
            Err(e) => {
                let error = EngineError::from(e);
                let _ = self.audit.append(run_id,
                                          AuditEventKind::StepFailed { step_index: cursor,
                                                                       step,
                                                                       error: error.clone() });
                return Err(error);
            }
        }

        if cursor + 1 == definition.len() {
            self.complete_run(run_id)?;
        }
        Ok(())
    }

    fn handle_step_failure(&mut self, run_id: Uuid, cursor: usize, step: StepName, error: EngineError) -> Result<(), EngineError> {
        // Registro best-effort: el error del step es el que se propaga.
        let _ = self.audit.append(run_id,
                                  AuditEventKind::StepFailed { step_index: cursor,
                                                               step,
                                                               error: error.clone() });
        Err(error)
    }

    fn complete_run(&mut self, run_id: Uuid) -> Result<(), EngineError> {
        let events = self.audit.list(run_id)?;
        let dedup_hits = events.iter()
                               .filter(|e| matches!(e.kind, AuditEventKind::StepSkipped { .. }))
                               .count();
        let _completed = self.audit.append(run_id, AuditEventKind::RunCompleted { dedup_hits })?;
        Ok(())
    }

    /// Lista los eventos registrados para un run.
    pub fn events_for(&self, run_id: Uuid) -> Result<Vec<crate::event::AuditEvent>, EngineError> {
        Ok(self.audit.list(run_id)?)
    }

    /// Reconstruye el estado del run por replay de sus eventos.
    pub fn instance_for(&self, run_id: Uuid) -> Result<crate::repo::RunInstance, EngineError> {
        let events = self.audit.list(run_id)?;
        Ok(self.repository.load(run_id, &events))
    }

    /// Deriva el reporte del run desde su log.
    pub fn report_for(&self, run_id: Uuid) -> Result<Report, EngineError> {
        let events = self.audit.list(run_id)?;
        Ok(Report::from_events(run_id, &events))
    }

    /// Variante compacta de los eventos de un run, útil para asserts.
    pub fn event_variants(&self, run_id: Uuid) -> Result<Vec<&'static str>, EngineError> {
        let events = self.audit.list(run_id)?;
        Ok(events.iter()
                 .map(|e| match e.kind {
                     AuditEventKind::RunInitialized { .. } => "I",
                     AuditEventKind::StepStarted { .. } => "S",
                     AuditEventKind::StepCompleted { .. } => "F",
                     AuditEventKind::StepSkipped { .. } => "K",
                     AuditEventKind::StepFailed { .. } => "X",
                     AuditEventKind::RunCompleted { .. } => "C",
                 })
                 .collect())
    }
}

impl PlanEngine<crate::memory::InMemoryMemoryStore, crate::event::InMemoryAuditStore, crate::repo::InMemoryRunRepository> {
    /// Crea un builder con stores en memoria, pensado para tests y demos.
    #[inline]
    pub fn in_memory() -> EngineBuilderInit<crate::memory::InMemoryMemoryStore,
                                            crate::event::InMemoryAuditStore,
                                            crate::repo::InMemoryRunRepository> {
        EngineBuilderInit { memory: crate::memory::InMemoryMemoryStore::new(),
                            audit: crate::event::InMemoryAuditStore::new(),
                            repository: crate::repo::InMemoryRunRepository::new() }
    }
}
