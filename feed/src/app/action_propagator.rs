//! Action propagator
//!
//! Runs like/report through the action executor and writes the server's
//! returned item into every stream copy, matched by item id. Counters are never
//! bumped locally; without an authoritative item nothing changes.

use std::sync::Arc;

use crate::domain::entities::{ContentItem, ItemId};
use crate::domain::ports::ActionExecutor;
use crate::error::{DEFAULT_LIKE_ERROR, DEFAULT_REPORT_ERROR};

use super::feed_stream::{FeedStreams, StreamKind};

/// Result of a like or report
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The returned item was written into the streams that hold it
    Applied {
        item: ContentItem,
        friends_updated: bool,
        recommended_updated: bool,
    },
    /// The backend accepted the action but echoed no item
    Accepted,
    /// The action failed; the origin stream's `action_error` holds the message
    Failed { message: String },
}

/// Service that executes post actions and keeps both streams consistent
pub struct ActionPropagator<AE>
where
    AE: ActionExecutor,
{
    actions: Arc<AE>,
}

impl<AE> ActionPropagator<AE>
where
    AE: ActionExecutor,
{
    pub fn new(actions: Arc<AE>) -> Self {
        Self { actions }
    }

    /// Like `item_id`, propagating the result into both streams
    pub async fn apply_like(
        &self,
        streams: &FeedStreams,
        item_id: &ItemId,
        origin: StreamKind,
    ) -> ActionOutcome {
        match self.actions.like(item_id).await {
            Ok(item) => {
                streams.clear_action_error(origin);
                propagate(streams, item)
            }
            Err(e) => {
                tracing::warn!(item_id = %item_id, origin = %origin, error = %e, "Like failed");
                let message = e.user_message_or(DEFAULT_LIKE_ERROR);
                streams.set_action_error(origin, message.clone());
                ActionOutcome::Failed { message }
            }
        }
    }

    /// Report `item_id` with an optional free-text reason
    pub async fn apply_report(
        &self,
        streams: &FeedStreams,
        item_id: &ItemId,
        reason: &str,
        origin: StreamKind,
    ) -> ActionOutcome {
        match self.actions.report(item_id, reason).await {
            Ok(Some(item)) => {
                streams.clear_action_error(origin);
                propagate(streams, item)
            }
            Ok(None) => {
                streams.clear_action_error(origin);
                tracing::debug!(item_id = %item_id, "Report accepted without updated item");
                ActionOutcome::Accepted
            }
            Err(e) => {
                tracing::warn!(item_id = %item_id, origin = %origin, error = %e, "Report failed");
                let message = e.user_message_or(DEFAULT_REPORT_ERROR);
                streams.set_action_error(origin, message.clone());
                ActionOutcome::Failed { message }
            }
        }
    }
}

/// Write `item` over every copy with the same id
fn propagate(streams: &FeedStreams, item: ContentItem) -> ActionOutcome {
    let friends_updated = streams.friends.update_item(&item.id, |_| item.clone());
    let recommended_updated = streams
        .recommended
        .update_item(&item.id, |entry| entry.with_item(item.clone()));

    tracing::debug!(
        item_id = %item.id,
        friends_updated = friends_updated,
        recommended_updated = recommended_updated,
        "Action result propagated"
    );

    ActionOutcome::Applied {
        item,
        friends_updated,
        recommended_updated,
    }
}
