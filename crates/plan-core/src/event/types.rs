//! Tipos de evento de auditoría y estructura `AuditEvent`.
//!
//! Rol en el flujo:
//! - Cada ejecución del `PlanEngine` emite eventos a un `AuditStore`
//!   append-only; no existe operación de update ni delete.
//! - Estos eventos permiten reconstruir el estado del run (replay) sin
//!   depender de estructuras mutables, y derivar el `Report`.
//! - El enum `AuditEventKind` define el contrato observable y estable del
//!   motor.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::constants::OUTPUT_PREVIEW_LIMIT;
use crate::errors::EngineError;
use crate::step::StepName;

/// Tipos de eventos soportados.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuditEventKind {
    /// Emisión inicial de un run: fija la `definition_hash`, la cantidad de
    /// steps y la versión del motor. Invariante: debe ser el primer evento
    /// de un `run_id`.
    RunInitialized {
        definition_hash: String,
        step_count: usize,
        engine_version: String,
    },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step: StepName },
    /// Un step terminó correctamente; su output quedó registrado en memoria
    /// bajo `fingerprint`. El `message` lleva el preview del output.
    StepCompleted {
        step_index: usize,
        step: StepName,
        output_hash: String,
        fingerprint: String,
        message: String,
    },
    /// Un step se omitió porque la memoria ya tenía un registro para su
    /// fingerprint. `source_run` identifica el run que lo produjo.
    StepSkipped {
        step_index: usize,
        step: StepName,
        fingerprint: String,
        output_hash: String,
        source_run: Uuid,
        message: String,
    },
    /// Un step terminó con error terminal. El run no continúa
    /// (stop-on-failure).
    StepFailed {
        step_index: usize,
        step: StepName,
        error: EngineError,
    },
    /// Evento de cierre del run, con el total de pasos deduplicados.
    RunCompleted { dedup_hits: usize },
}

impl AuditEventKind {
    /// Etiqueta corta de estado, la misma que viaja en el `LogLine`.
    pub fn status_label(&self) -> &'static str {
        match self {
            AuditEventKind::RunInitialized { .. } => "initialized",
            AuditEventKind::StepStarted { .. } => "started",
            AuditEventKind::StepCompleted { .. } => "completed",
            AuditEventKind::StepSkipped { .. } => "skipped",
            AuditEventKind::StepFailed { .. } => "failed",
            AuditEventKind::RunCompleted { .. } => "run_completed",
        }
    }

    /// Paso al que refiere el evento, si aplica.
    pub fn step(&self) -> Option<StepName> {
        match self {
            AuditEventKind::StepStarted { step, .. }
            | AuditEventKind::StepCompleted { step, .. }
            | AuditEventKind::StepSkipped { step, .. }
            | AuditEventKind::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub seq: u64, // asignado por el AuditStore (orden global de append)
    pub run_id: Uuid,
    pub kind: AuditEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}

impl AuditEvent {
    /// Vista plana del evento: {timestamp, run, step, status, message}.
    pub fn log_line(&self) -> LogLine {
        let message = match &self.kind {
            AuditEventKind::RunInitialized { step_count, .. } => {
                format!("plan run initialized ({step_count} steps)")
            }
            AuditEventKind::StepStarted { .. } => "executing".to_string(),
            AuditEventKind::StepCompleted { message, .. } => message.clone(),
            AuditEventKind::StepSkipped { message, .. } => message.clone(),
            AuditEventKind::StepFailed { error, .. } => error.to_string(),
            AuditEventKind::RunCompleted { dedup_hits } => {
                format!("run completed ({dedup_hits} steps deduplicated)")
            }
        };
        LogLine { ts: self.ts,
                  run_id: self.run_id,
                  step: self.kind.step(),
                  status: self.kind.status_label(),
                  message }
    }
}

/// Entrada plana del log, lista para imprimir o asertar en tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub ts: DateTime<Utc>,
    pub run_id: Uuid,
    pub step: Option<StepName>,
    pub status: &'static str,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.step.map(|s| s.as_str()).unwrap_or("-");
        write!(f,
               "{} | {} | {} | {}",
               self.ts.to_rfc3339_opts(SecondsFormat::Secs, true),
               self.status,
               step,
               self.message)
    }
}

/// Preview acotado del payload de un output para el log. Corta por
/// caracteres (no bytes) para no partir UTF-8.
pub fn output_preview(payload: &Value) -> String {
    let text = payload.to_string();
    if text.chars().count() <= OUTPUT_PREVIEW_LIMIT {
        text
    } else {
        let cut: String = text.chars().take(OUTPUT_PREVIEW_LIMIT).collect();
        format!("{cut}...(truncated)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preview_keeps_short_payloads_whole() {
        let p = json!({"topics": ["a", "b"]});
        assert_eq!(output_preview(&p), p.to_string());
    }

    #[test]
    fn preview_truncates_long_payloads() {
        let long = "x".repeat(500);
        let p = json!({ "body": long });
        let preview = output_preview(&p);
        assert!(preview.ends_with("...(truncated)"));
        assert_eq!(preview.chars().count(), OUTPUT_PREVIEW_LIMIT + "...(truncated)".len());
    }

    #[test]
    fn log_line_prints_dash_for_run_level_events() {
        let ev = AuditEvent { seq: 0,
                              run_id: Uuid::new_v4(),
                              kind: AuditEventKind::RunCompleted { dedup_hits: 4 },
                              ts: Utc::now() };
        let line = ev.log_line();
        assert_eq!(line.step, None);
        assert!(line.to_string().contains(" | run_completed | - | "));
    }

    #[test]
    fn events_round_trip_through_serde() {
        let ev = AuditEvent { seq: 7,
                              run_id: Uuid::new_v4(),
                              kind: AuditEventKind::StepCompleted { step_index: 0,
                                                                    step: StepName::Topics,
                                                                    output_hash: "abc".into(),
                                                                    fingerprint: "def".into(),
                                                                    message: "preview".into() },
                              ts: Utc::now() };
        let json = serde_json::to_string(&ev).expect("serialize event");
        let back: AuditEvent = serde_json::from_str(&json).expect("deserialize event");
        assert_eq!(back.seq, 7);
        assert!(matches!(back.kind, AuditEventKind::StepCompleted { step: StepName::Topics, .. }));
    }
}
