//! GenerateTopicsStep (Source determinista)
//!
//! - Deriva cinco temas a partir del goal del request, con plantillas fijas
//!   en orden estable.
//! - No accede a IO externo; el mismo request produce el mismo payload y por
//!   lo tanto el mismo hash.

use plan_core::typed_step;
use plan_core::StepName;

use crate::artifacts::TopicListArtifact;
use crate::params::RequestParams;

/// Sufijos de tema aplicados al goal, en orden estable.
const TOPIC_PATTERNS: [&str; 5] = [": 3 mistakes to avoid",
                                   ": the step-by-step beginner roadmap",
                                   ": what I wish I knew earlier",
                                   ": tools and resources I actually use",
                                   ": quick wins you can do this week"];

typed_step! {
    source GenerateTopicsStep {
        name: StepName::Topics,
        output: TopicListArtifact,
        params: RequestParams,
        run(_me, p) {
            let topics = TOPIC_PATTERNS.iter()
                                       .map(|suffix| format!("{}{}", p.goal, suffix))
                                       .collect();
            Ok(TopicListArtifact { topics, schema_version: 1 })
        }
    }
}
