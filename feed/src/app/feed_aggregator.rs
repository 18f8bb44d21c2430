//! Feed aggregator
//!
//! Owns the friends and recommended streams, drives their independent
//! lifecycles, and routes like/report results into both of them.
//! Fetch failures stay inside the streams as state; nothing here returns an
//! error to the caller.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::{ContentItem, ItemId, RecommendationEntry, UserId};
use crate::domain::ports::{
    ActionExecutor, FriendsFeedSource, IdentityProvider, RecommendationSource,
};

use super::action_propagator::{ActionOutcome, ActionPropagator};
use super::feed_stream::{FeedStreams, Page, PageOutcome, StreamKind, StreamView};
use super::reason_ranker::ReasonRanker;

/// Default friends page size
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default friends look-back window in days
pub const DEFAULT_DAY_WINDOW: u32 = 1;

/// Default number of recommendations to request
pub const DEFAULT_RECOMMENDED_LIMIT: u32 = 20;

/// Paging parameters for both streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub page_size: u32,
    pub day_window: u32,
    pub recommended_limit: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            day_window: DEFAULT_DAY_WINDOW,
            recommended_limit: DEFAULT_RECOMMENDED_LIMIT,
        }
    }
}

/// Outcome of `initialize`, one entry per stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub friends: PageOutcome,
    pub recommended: PageOutcome,
}

struct Session {
    actor: Option<UserId>,
    recommended_limit: u32,
}

/// Controller merging the friends and recommended feeds
pub struct FeedAggregator<FS, RS, AE, IP>
where
    FS: FriendsFeedSource,
    RS: RecommendationSource,
    AE: ActionExecutor,
    IP: IdentityProvider,
{
    friends_source: Arc<FS>,
    recommendation_source: Arc<RS>,
    identity: Arc<IP>,
    propagator: ActionPropagator<AE>,
    ranker: ReasonRanker,
    settings: FeedSettings,
    streams: FeedStreams,
    session: Mutex<Session>,
}

impl<FS, RS, AE, IP> FeedAggregator<FS, RS, AE, IP>
where
    FS: FriendsFeedSource,
    RS: RecommendationSource,
    AE: ActionExecutor,
    IP: IdentityProvider,
{
    pub fn new(
        friends_source: Arc<FS>,
        recommendation_source: Arc<RS>,
        actions: Arc<AE>,
        identity: Arc<IP>,
        ranker: ReasonRanker,
        settings: FeedSettings,
    ) -> Self {
        Self {
            friends_source,
            recommendation_source,
            identity,
            propagator: ActionPropagator::new(actions),
            ranker,
            settings,
            streams: FeedStreams::default(),
            session: Mutex::new(Session {
                actor: None,
                recommended_limit: settings.recommended_limit,
            }),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Actor the streams were last initialized for
    pub fn actor(&self) -> Option<UserId> {
        self.session().actor.clone()
    }

    pub fn friends(&self) -> StreamView<ContentItem> {
        self.streams.friends.view()
    }

    pub fn recommended(&self) -> StreamView<RecommendationEntry> {
        self.streams.recommended.view()
    }

    /// Reset both streams for `user_id` and load their first pages concurrently.
    ///
    /// Without an actor both streams stay empty and nothing is fetched.
    pub async fn initialize(&self, user_id: Option<UserId>) -> InitOutcome {
        let actor = user_id.filter(|id| !id.is_blank());
        let limit = {
            let mut session = self.session();
            session.actor = actor.clone();
            session.recommended_limit
        };

        self.streams.friends.reset();
        self.streams.recommended.reset();

        let Some(actor) = actor else {
            tracing::info!("No actor, feed streams left empty");
            return InitOutcome {
                friends: PageOutcome::Skipped,
                recommended: PageOutcome::Skipped,
            };
        };

        tracing::info!(user_id = %actor, "Initializing feed");
        let (friends, recommended) = tokio::join!(
            self.fetch_friends_page(&actor),
            self.fetch_recommended(&actor, limit)
        );

        InitOutcome {
            friends,
            recommended,
        }
    }

    /// Re-initialize when the identity provider reports a different actor.
    ///
    /// Identity is pulled: signing in or out on the provider has no effect on
    /// the streams until this is called. Returns `true` when the actor changed.
    pub async fn sync_identity(&self) -> bool {
        let current = self.identity.current_actor().filter(|id| !id.is_blank());
        if current == self.actor() {
            return false;
        }

        tracing::info!(
            previous = ?self.actor(),
            current = ?current,
            "Actor changed, re-initializing feed"
        );
        self.initialize(current).await;
        true
    }

    /// Load the next friends page
    pub async fn load_more_friends(&self) -> PageOutcome {
        match self.actor() {
            Some(actor) => self.fetch_friends_page(&actor).await,
            None => PageOutcome::Skipped,
        }
    }

    /// Reset the recommended stream and reload it with `limit` entries
    pub async fn refresh_recommended(&self, limit: u32) -> PageOutcome {
        let actor = {
            let mut session = self.session();
            session.recommended_limit = limit;
            session.actor.clone()
        };

        self.streams.recommended.reset();

        match actor {
            Some(actor) => self.fetch_recommended(&actor, limit).await,
            None => PageOutcome::Skipped,
        }
    }

    /// Like `item_id` as seen in the `origin` stream
    pub async fn apply_like(&self, item_id: &ItemId, origin: StreamKind) -> ActionOutcome {
        self.propagator
            .apply_like(&self.streams, item_id, origin)
            .await
    }

    /// Report `item_id` as seen in the `origin` stream
    pub async fn apply_report(
        &self,
        item_id: &ItemId,
        reason: &str,
        origin: StreamKind,
    ) -> ActionOutcome {
        self.propagator
            .apply_report(&self.streams, item_id, reason, origin)
            .await
    }

    /// Dismiss a transient action error
    pub fn clear_action_error(&self, kind: StreamKind) {
        self.streams.clear_action_error(kind);
    }

    async fn fetch_friends_page(&self, actor: &UserId) -> PageOutcome {
        let source = &self.friends_source;
        let FeedSettings {
            page_size,
            day_window,
            ..
        } = self.settings;

        self.streams
            .friends
            .request_page(|page_index| async move {
                let page = source
                    .fetch(actor, day_window, page_index, page_size)
                    .await?;
                Ok(Page {
                    items: page.content,
                    total: page.total_elements,
                })
            })
            .await
    }

    async fn fetch_recommended(&self, actor: &UserId, limit: u32) -> PageOutcome {
        let source = &self.recommendation_source;
        let ranker = &self.ranker;

        self.streams
            .recommended
            .request_page(|_| async move {
                let raw = source.fetch(actor, limit).await?;
                let received = raw.len();

                let entries: Vec<RecommendationEntry> = raw
                    .into_iter()
                    .filter_map(|raw| match RecommendationEntry::try_from(raw) {
                        Ok(mut entry) => {
                            entry.reasons = ranker.rank(&entry.reasons);
                            Some(entry)
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "Dropping recommendation");
                            None
                        }
                    })
                    .collect();

                if entries.len() < received {
                    tracing::debug!(
                        received = received,
                        kept = entries.len(),
                        "Filtered invalid recommendations"
                    );
                }

                let total = entries.len() as u64;
                Ok(Page {
                    items: entries,
                    total,
                })
            })
            .await
    }
}
