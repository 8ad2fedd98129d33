//! plan-adapters: Capa de adaptación Dominio ↔ Core
//!
//! Este crate provee:
//! - Artifacts tipados neutrales (sin semántica en el core).
//! - Los cuatro steps de la cadena fija: `GenerateTopicsStep` (Source),
//!   `DraftPostsStep` y `AttachHashtagsStep` (Transforms) y
//!   `BuildScheduleStep` (Sink).
//! - `content_plan_definition()` con la cadena canónica ya armada.
//! - Render en texto de los entregables para los binarios.
//!
//! Nota: el core sólo ve `Artifact` neutros con `ArtifactKind::PlanJson`;
//! la forma concreta de cada payload vive acá, en structs que las macros
//! del core convierten en artifacts y steps tipados.

pub mod artifacts;
pub mod params;
pub mod render;
pub mod steps;

pub use artifacts::{PostDraft, PostDraftsArtifact, ScheduleEntry, TaggedPost, TaggedPostsArtifact, TopicListArtifact, WeeklyScheduleArtifact};
pub use params::RequestParams;
pub use render::render_deliverables;
pub use steps::{content_plan_definition, AttachHashtagsStep, BuildScheduleStep, DraftPostsStep, GenerateTopicsStep};
