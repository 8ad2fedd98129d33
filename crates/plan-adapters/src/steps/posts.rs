//! DraftPostsStep (Transform)
//!
//! Redacta un borrador por cada tema recibido, en el mismo orden. La
//! plantilla es fija (gancho, tres puntos clave, tono y CTA) para mantener
//! el payload determinista.

use plan_core::step::StepKind;
use plan_core::typed_step;
use plan_core::{EngineError, StepName};

use crate::artifacts::{PostDraft, PostDraftsArtifact, TopicListArtifact};
use crate::params::RequestParams;

/// Cuerpo del post para un tema dado.
fn draft_body(topic: &str, p: &RequestParams) -> String {
    format!("Hook: {}\n\nFor {}:\n- Key point 1: Keep it simple and consistent.\n- Key point 2: Focus on one clear takeaway.\n- Key point 3: Take one action today.\n\nTone: {}\nCTA: {}\n",
            topic, p.audience, p.tone, p.cta)
}

typed_step! {
    step DraftPostsStep {
        name: StepName::Posts,
        kind: StepKind::Transform,
        input: TopicListArtifact,
        output: PostDraftsArtifact,
        params: RequestParams,
        run(_me, inp, p) {
            if inp.topics.is_empty() {
                Err(EngineError::StepExecution { step: StepName::Posts,
                                                 message: "no topics to draft from".to_string() })
            } else {
                let posts = inp.topics
                               .iter()
                               .map(|topic| PostDraft { topic: topic.clone(),
                                                        body: draft_body(topic, &p) })
                               .collect();
                Ok(PostDraftsArtifact { posts, schema_version: 1 })
            }
        }
    }
}
