//! Command handlers
//!
//! Each command acts on an already initialized aggregator and returns the text
//! to print. Feed state, including errors, is always rendered at the end.

use feedline::render::render_feed;
use feedline::{ActionOutcome, HttpFeedAggregator, ItemId, PageOutcome};

use crate::Command;

pub(crate) async fn run(aggregator: &HttpFeedAggregator, command: Command) -> String {
    let mut notes = Vec::new();

    match command {
        Command::Feed => {}
        Command::More { pages } => {
            for _ in 0..pages {
                match aggregator.load_more_friends().await {
                    PageOutcome::Appended { received } => {
                        notes.push(format!("Loaded {} more posts.", received));
                    }
                    PageOutcome::Skipped => {
                        notes.push(skipped_note(aggregator.actor().is_some()).to_string());
                        break;
                    }
                    PageOutcome::Stale | PageOutcome::Failed => break,
                }
            }
        }
        Command::Recommended { limit } => {
            aggregator.refresh_recommended(limit).await;
        }
        Command::Like { id, from } => {
            let outcome = aggregator.apply_like(&ItemId::from(id), from.into()).await;
            notes.push(describe(&outcome));
        }
        Command::Report { id, reason, from } => {
            let outcome = aggregator
                .apply_report(
                    &ItemId::from(id),
                    reason.as_deref().unwrap_or_default(),
                    from.into(),
                )
                .await;
            notes.push(describe(&outcome));
        }
    }

    let mut buf = String::new();
    for note in notes {
        buf.push_str(&note);
        buf.push('\n');
    }
    if !buf.is_empty() {
        buf.push('\n');
    }
    buf.push_str(&render_feed(&aggregator.friends(), &aggregator.recommended()));
    buf
}

/// Paging is skipped either for lack of an actor or because the stream ended
fn skipped_note(signed_in: bool) -> &'static str {
    if signed_in {
        "No more posts to load."
    } else {
        "No user signed in; set FEEDLINE_USER_ID or pass --user."
    }
}

fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Applied {
            item,
            friends_updated,
            recommended_updated,
        } => {
            let mut places = Vec::new();
            if *friends_updated {
                places.push("friends");
            }
            if *recommended_updated {
                places.push("recommended");
            }
            let places = if places.is_empty() {
                "no loaded stream".to_string()
            } else {
                places.join(" and ")
            };
            format!(
                "Post {} now has {} likes and {} reports (updated in {}).",
                item.id, item.like_count, item.report_count, places
            )
        }
        ActionOutcome::Accepted => "Report sent.".to_string(),
        ActionOutcome::Failed { message } => format!("Failed: {}", message),
    }
}
