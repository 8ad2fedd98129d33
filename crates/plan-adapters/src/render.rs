//! Render en texto plano de los entregables de un plan completado.
//!
//! Lo usan los binarios (CLI y demo) para mostrar los artefactos tipados
//! sin que cada uno duplique el formato.

use std::fmt::Write as _;

use crate::artifacts::{TaggedPostsArtifact, TopicListArtifact, WeeklyScheduleArtifact};

/// Bloque `DELIVERABLES`: topics, posts con sus hashtags y la agenda
/// semanal. Termina con salto de línea, pensado para `print!`.
pub fn render_deliverables(topics: &TopicListArtifact,
                           posts: &TaggedPostsArtifact,
                           schedule: &WeeklyScheduleArtifact)
                           -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DELIVERABLES");
    let _ = writeln!(out, "{}", "=".repeat(50));

    let _ = writeln!(out);
    let _ = writeln!(out, "Topics:");
    for topic in &topics.topics {
        let _ = writeln!(out, "- {topic}");
    }

    for (i, post) in posts.posts.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "POST {}:", i + 1);
        let _ = writeln!(out, "{}", post.body);
        let _ = writeln!(out, "{}", post.hashtags.join(" "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Weekly Schedule:");
    for entry in &schedule.entries {
        let _ = writeln!(out, "{}: {}", entry.day, entry.topic);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{ScheduleEntry, TaggedPost};

    #[test]
    fn renders_every_section_in_order() {
        let topics = TopicListArtifact { topics: vec!["Launch week".to_string()],
                                         schema_version: 1 };
        let posts = TaggedPostsArtifact { posts: vec![TaggedPost { topic: "Launch week".to_string(),
                                                                   body: "Hook: Launch week".to_string(),
                                                                   hashtags: vec!["#contentmarketing".to_string(),
                                                                                  "#socialmedia".to_string()] }],
                                          schema_version: 1 };
        let schedule = WeeklyScheduleArtifact { entries: vec![ScheduleEntry { day: "Mon".to_string(),
                                                                              topic: "Launch week".to_string() }],
                                                schema_version: 1 };

        let text = render_deliverables(&topics, &posts, &schedule);
        assert!(text.starts_with("DELIVERABLES\n"));
        assert!(text.contains(&"=".repeat(50)));

        let topics_at = text.find("Topics:").unwrap();
        let post_at = text.find("POST 1:").unwrap();
        let tags_at = text.find("#contentmarketing #socialmedia").unwrap();
        let schedule_at = text.find("Weekly Schedule:").unwrap();
        assert!(topics_at < post_at);
        assert!(post_at < tags_at);
        assert!(tags_at < schedule_at);
        assert!(text.ends_with("Mon: Launch week\n"));
    }
}
