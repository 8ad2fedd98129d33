//! Generación de reportes derivados del log de auditoría.
//!
//! El `Report` es una función pura de los eventos de un run: mismo log,
//! mismo reporte. Se usa tanto para el resumen humano como para asserts en
//! tests, y puede recomputarse en cualquier momento desde el estado
//! persistido.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::event::{AuditEvent, AuditEventKind};
use crate::step::{StepName, StepStatus};

/// Estado final de un paso dentro del reporte.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: StepName,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub run_id: Uuid,
    pub steps: Vec<StepReport>,
    pub dedup_count: usize,
    pub errors: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Deriva el reporte desde los eventos de un run.
    pub fn from_events(run_id: Uuid, events: &[AuditEvent]) -> Report {
        let mut statuses: Vec<StepStatus> = vec![StepStatus::Pending; StepName::ORDERED.len()];
        let mut dedup_count = 0;
        let mut errors = Vec::new();

        for ev in events {
            match &ev.kind {
                AuditEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = statuses.get_mut(*step_index) {
                        *slot = StepStatus::Running;
                    }
                }
                AuditEventKind::StepCompleted { step_index, .. } => {
                    if let Some(slot) = statuses.get_mut(*step_index) {
                        *slot = StepStatus::Completed;
                    }
                }
                AuditEventKind::StepSkipped { step_index, .. } => {
                    if let Some(slot) = statuses.get_mut(*step_index) {
                        *slot = StepStatus::Skipped;
                    }
                    dedup_count += 1;
                }
                AuditEventKind::StepFailed { step_index, step, error } => {
                    if let Some(slot) = statuses.get_mut(*step_index) {
                        *slot = StepStatus::Failed;
                    }
                    errors.push(format!("{step}: {error}"));
                }
                _ => {}
            }
        }

        let steps = StepName::ORDERED.iter()
                                     .zip(statuses)
                                     .map(|(name, status)| StepReport { name: *name, status })
                                     .collect();

        Report { run_id,
                 steps,
                 dedup_count,
                 errors,
                 generated_at: Utc::now() }
    }

    /// Resumen humano al estilo del log de trabajo: totales por estado y
    /// las últimas `last_n` acciones del log.
    pub fn summary(&self, events: &[AuditEvent], last_n: usize) -> String {
        use std::fmt::Write as _;

        let completed = events.iter()
                              .filter(|e| matches!(e.kind, AuditEventKind::StepCompleted { .. }))
                              .count();
        let skipped = self.dedup_count;
        let failed = self.errors.len();

        let mut out = String::new();
        let _ = writeln!(out, "RUN REPORT");
        let _ = writeln!(out, "{}", "=".repeat(50));
        let _ = writeln!(out, "Run: {}", self.run_id);
        let step_line = self.steps
                            .iter()
                            .map(|s| format!("{}={}", s.name, s.status))
                            .collect::<Vec<_>>()
                            .join(" | ");
        let _ = writeln!(out, "Steps: {step_line}");
        let _ = writeln!(out, "Total log entries: {}", events.len());
        let _ = writeln!(out, "Completed: {completed} | Skipped: {skipped} | Failed: {failed}");
        if !self.errors.is_empty() {
            let _ = writeln!(out, "Errors:");
            for e in &self.errors {
                let _ = writeln!(out, "- {e}");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Last {last_n} actions:");
        let _ = writeln!(out, "{}", "-".repeat(50));
        let start = events.len().saturating_sub(last_n);
        for ev in &events[start..] {
            let _ = writeln!(out, "{}", ev.log_line());
        }
        let _ = write!(out, "{}", "-".repeat(50));
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run {} [", self.run_id)?;
        for (i, s) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", s.name, s.status)?;
        }
        write!(f, "] dedup={} errors={}", self.dedup_count, self.errors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;

    fn ev(run_id: Uuid, seq: u64, kind: AuditEventKind) -> AuditEvent {
        AuditEvent { seq, run_id, kind, ts: Utc::now() }
    }

    #[test]
    fn report_always_lists_the_four_steps() {
        let run_id = Uuid::new_v4();
        let report = Report::from_events(run_id, &[]);
        assert_eq!(report.steps.len(), 4);
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Pending));
    }

    #[test]
    fn skipped_steps_feed_dedup_count() {
        let run_id = Uuid::new_v4();
        let events = vec![ev(run_id, 0, AuditEventKind::RunInitialized { definition_hash: "d".into(),
                                                                         step_count: 4,
                                                                         engine_version: "P1.0".into() }),
                          ev(run_id, 1, AuditEventKind::StepSkipped { step_index: 0,
                                                                      step: StepName::Topics,
                                                                      fingerprint: "f0".into(),
                                                                      output_hash: "h0".into(),
                                                                      source_run: run_id,
                                                                      message: "m".into() }),
                          ev(run_id, 2, AuditEventKind::StepSkipped { step_index: 1,
                                                                      step: StepName::Posts,
                                                                      fingerprint: "f1".into(),
                                                                      output_hash: "h1".into(),
                                                                      source_run: run_id,
                                                                      message: "m".into() })];
        let report = Report::from_events(run_id, &events);
        assert_eq!(report.dedup_count, 2);
        assert_eq!(report.steps[0].status, StepStatus::Skipped);
        assert_eq!(report.steps[2].status, StepStatus::Pending);
    }

    #[test]
    fn failed_step_lands_in_errors() {
        let run_id = Uuid::new_v4();
        let events = vec![ev(run_id, 0, AuditEventKind::StepFailed { step_index: 1,
                                                                     step: StepName::Posts,
                                                                     error: EngineError::StepExecution { step: StepName::Posts,
                                                                                                         message: "no topics".into() } })];
        let report = Report::from_events(run_id, &events);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("posts"));
        assert_eq!(report.steps[1].status, StepStatus::Failed);
    }

    #[test]
    fn summary_renders_header_and_tail() {
        let run_id = Uuid::new_v4();
        let events = vec![ev(run_id, 0, AuditEventKind::RunCompleted { dedup_hits: 0 })];
        let report = Report::from_events(run_id, &events);
        let text = report.summary(&events, 10);
        assert!(text.starts_with("RUN REPORT\n"));
        assert!(text.contains(&"=".repeat(50)));
        assert!(text.contains("Total log entries: 1"));
    }
}
