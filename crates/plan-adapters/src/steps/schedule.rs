//! BuildScheduleStep (Sink)
//!
//! Distribuye los posts etiquetados en un calendario semanal Mon..Fri. Con
//! más de cinco posts los días rotan; el orden de los posts se preserva.

use plan_core::step::StepKind;
use plan_core::typed_step;
use plan_core::{EngineError, StepName};

use crate::artifacts::{ScheduleEntry, TaggedPostsArtifact, WeeklyScheduleArtifact};
use crate::params::RequestParams;

const DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

typed_step! {
    step BuildScheduleStep {
        name: StepName::Schedule,
        kind: StepKind::Sink,
        input: TaggedPostsArtifact,
        output: WeeklyScheduleArtifact,
        params: RequestParams,
        run(_me, inp, _p) {
            if inp.posts.is_empty() {
                Err(EngineError::StepExecution { step: StepName::Schedule,
                                                 message: "no posts to schedule".to_string() })
            } else {
                let entries = inp.posts
                                 .iter()
                                 .enumerate()
                                 .map(|(i, post)| ScheduleEntry { day: DAYS[i % DAYS.len()].to_string(),
                                                                  topic: post.topic.clone() })
                                 .collect();
                Ok(WeeklyScheduleArtifact { entries, schema_version: 1 })
            }
        }
    }
}
