//! Feed renderer
//!
//! Renders both streams to markdown. Recommendations list their reasons in
//! ranked order; both sections show phase and errors.

use crate::app::{StreamPhase, StreamView};
use crate::domain::entities::{ContentItem, RecommendationEntry};

/// Render the friends and recommended streams
pub fn render_feed(
    friends: &StreamView<ContentItem>,
    recommended: &StreamView<RecommendationEntry>,
) -> String {
    let mut buf = String::new();

    buf.push_str("# Feed\n\n");

    buf.push_str("## Friends\n\n");
    buf.push_str(&render_status(friends.phase, friends.items.len(), friends.total));
    buf.push_str(&render_errors(
        friends.last_error.as_deref(),
        friends.action_error.as_deref(),
    ));
    if friends.items.is_empty() {
        buf.push_str("_No posts from friends._\n\n");
    } else {
        for item in &friends.items {
            buf.push_str(&render_item(item));
            buf.push('\n');
        }
        buf.push('\n');
    }

    buf.push_str("## Recommended\n\n");
    buf.push_str(&render_status(
        recommended.phase,
        recommended.items.len(),
        recommended.total,
    ));
    buf.push_str(&render_errors(
        recommended.last_error.as_deref(),
        recommended.action_error.as_deref(),
    ));
    if recommended.items.is_empty() {
        buf.push_str("_No recommendations._\n\n");
    } else {
        for entry in &recommended.items {
            buf.push_str(&render_entry(entry));
            buf.push('\n');
        }
        buf.push('\n');
    }

    buf
}

fn render_status(phase: StreamPhase, loaded: usize, total: u64) -> String {
    match phase {
        StreamPhase::Idle => "_Not loaded._\n\n".to_string(),
        StreamPhase::Loading => "_Loading..._\n\n".to_string(),
        StreamPhase::Loaded => format!("_{} of {} loaded, more available._\n\n", loaded, total),
        StreamPhase::Exhausted => format!("_{} of {} loaded._\n\n", loaded, total),
        StreamPhase::Error => String::new(),
    }
}

fn render_errors(last_error: Option<&str>, action_error: Option<&str>) -> String {
    let mut buf = String::new();
    if let Some(error) = last_error {
        buf.push_str(&format!("[ERROR] {}\n\n", error));
    }
    if let Some(error) = action_error {
        buf.push_str(&format!("[ACTION FAILED] {}\n\n", error));
    }
    buf
}

fn render_item(item: &ContentItem) -> String {
    let mut line = format!("- `{}` by {}: {}", item.id, item.author_id, item.text);

    if !item.hashtags.is_empty() {
        line.push_str(&format!(" ({})", item.hashtags_display()));
    }

    line.push_str(&format!(
        " | {} likes, {} reports",
        item.like_count, item.report_count
    ));

    if let Some(created) = item.created_at() {
        line.push_str(&format!(" | {}", created.format("%Y-%m-%d %H:%M")));
    }

    line
}

fn render_entry(entry: &RecommendationEntry) -> String {
    let mut line = format!("{} | score {}", render_item(&entry.item), entry.score);
    if !entry.reasons.is_empty() {
        line.push_str(&format!("\n  why: {}", entry.reasons.join(", ")));
    }
    line
}
