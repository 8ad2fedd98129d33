//! AttachHashtagsStep (Transform)
//!
//! Adjunta a cada borrador una lista base de hashtags más extras según el
//! nicho detectado en goal + audience, con tope de 12 tags por post.

use plan_core::step::StepKind;
use plan_core::typed_step;
use plan_core::{EngineError, StepName};

use crate::artifacts::{PostDraftsArtifact, TaggedPost, TaggedPostsArtifact};
use crate::params::RequestParams;

const BASE_TAGS: [&str; 5] = ["#contentstrategy", "#creator", "#marketing", "#smallbusiness", "#consistency"];
const AI_TAGS: [&str; 5] = ["#ai", "#aiautomation", "#aigent", "#promptengineering", "#futureofwork"];
const REAL_ESTATE_TAGS: [&str; 5] = ["#realestate", "#realtor", "#houstonrealestate", "#investing", "#homebuyers"];
const MAX_TAGS: usize = 12;

/// Tags para el nicho expresado en el texto del request (ya en minúsculas).
///
/// "ai" se busca como token aislado para no disparar con palabras que lo
/// contienen ("maintain", "said"); "real estate" como frase completa.
fn niche_tags(niche_text: &str) -> Vec<String> {
    let mut tags: Vec<String> = BASE_TAGS.iter().map(|t| t.to_string()).collect();
    let has_ai = niche_text.split(|c: char| !c.is_alphanumeric())
                           .any(|token| token == "ai");
    if has_ai {
        tags.extend(AI_TAGS.iter().map(|t| t.to_string()));
    }
    if niche_text.contains("real estate") {
        tags.extend(REAL_ESTATE_TAGS.iter().map(|t| t.to_string()));
    }
    tags.truncate(MAX_TAGS);
    tags
}

typed_step! {
    step AttachHashtagsStep {
        name: StepName::Hashtags,
        kind: StepKind::Transform,
        input: PostDraftsArtifact,
        output: TaggedPostsArtifact,
        params: RequestParams,
        run(_me, inp, p) {
            if inp.posts.is_empty() {
                Err(EngineError::StepExecution { step: StepName::Hashtags,
                                                 message: "no drafts to tag".to_string() })
            } else {
                let niche = format!("{} {}", p.goal, p.audience).to_lowercase();
                let tags = niche_tags(&niche);
                let posts = inp.posts
                               .into_iter()
                               .map(|draft| TaggedPost { topic: draft.topic,
                                                         body: draft.body,
                                                         hashtags: tags.clone() })
                               .collect();
                Ok(TaggedPostsArtifact { posts, schema_version: 1 })
            }
        }
    }
}
