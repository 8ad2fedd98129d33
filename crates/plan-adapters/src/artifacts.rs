//! Artifacts tipados neutrales usados por los steps del plan.
//!
//! Estos tipos no introducen semántica en el core; sólo definen la forma del
//! `payload` JSON que se serializa a `plan_core::Artifact` con
//! `ArtifactKind::PlanJson` y un `schema_version` estable. El hash lo calcula
//! el engine a partir del payload canónico.

use plan_core::typed_artifact;

// Lista de temas derivados del goal (un tema por post a redactar).
typed_artifact!(TopicListArtifact { topics: Vec<String> });

// Borrador individual incluido dentro del artifact agregado
// `PostDraftsArtifact` (un único artifact fluye entre steps).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PostDraft {
    pub topic: String,
    pub body: String,
}

// Un borrador por tema, en el mismo orden que la lista de temas.
typed_artifact!(PostDraftsArtifact { posts: Vec<PostDraft> });

// Borrador con sus hashtags ya adjuntos.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TaggedPost {
    pub topic: String,
    pub body: String,
    pub hashtags: Vec<String>,
}

typed_artifact!(TaggedPostsArtifact { posts: Vec<TaggedPost> });

// Celda del calendario semanal.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub topic: String,
}

// Calendario final: una entrada por post, días Mon..Fri en rotación.
typed_artifact!(WeeklyScheduleArtifact { entries: Vec<ScheduleEntry> });
