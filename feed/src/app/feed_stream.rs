//! Feed stream state machine
//!
//! A `FeedStream<T>` controls one paginated stream:
//!
//! ```text
//! Idle ──request──> Loading ──ok──> Loaded ──request──> Loading ...
//!                      │    └─empty/complete─> Exhausted ──reset──> Idle
//!                      └─err──> Error ──request (retry)──> Loading
//! ```
//!
//! At most one fetch is in flight per stream. Every fetch is tagged with the
//! stream generation; a response that arrives after a `reset` is dropped.
//! The state lock is never held across an `.await`.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::domain::entities::{ContentItem, ItemId, RecommendationEntry, StreamItem};
use crate::error::{FeedError, DEFAULT_LOAD_ERROR};

/// Lifecycle phase of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    Idle,
    Loading,
    Loaded,
    Exhausted,
    Error,
}

impl std::fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamPhase::Idle => write!(f, "idle"),
            StreamPhase::Loading => write!(f, "loading"),
            StreamPhase::Loaded => write!(f, "loaded"),
            StreamPhase::Exhausted => write!(f, "exhausted"),
            StreamPhase::Error => write!(f, "error"),
        }
    }
}

/// Which of the two aggregated streams something refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Friends,
    Recommended,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Friends => write!(f, "friends"),
            StreamKind::Recommended => write!(f, "recommended"),
        }
    }
}

/// One fetched page, already converted to stream items
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Server-reported total across all pages
    pub total: u64,
}

/// What a `request_page` call ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Another fetch was in flight or the stream is exhausted; nothing was fetched
    Skipped,
    /// The page was appended
    Appended { received: usize },
    /// The stream was reset while fetching; the response was dropped
    Stale,
    /// The fetch failed; `last_error` holds the message
    Failed,
}

/// Read-only snapshot of a stream for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamView<T> {
    pub items: Vec<T>,
    pub cursor: u32,
    pub total: u64,
    pub phase: StreamPhase,
    /// Last fetch failure
    pub last_error: Option<String>,
    /// Last like/report failure that originated from this stream
    pub action_error: Option<String>,
}

struct StreamState<T> {
    items: Vec<T>,
    cursor: u32,
    total: u64,
    phase: StreamPhase,
    last_error: Option<String>,
    action_error: Option<String>,
    generation: u64,
}

impl<T> StreamState<T> {
    fn fresh(generation: u64) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            total: 0,
            phase: StreamPhase::Idle,
            last_error: None,
            action_error: None,
            generation,
        }
    }
}

/// Controller for one paginated stream
pub struct FeedStream<T> {
    kind: StreamKind,
    state: Mutex<StreamState<T>>,
}

impl<T: StreamItem> FeedStream<T> {
    pub fn new(kind: StreamKind) -> Self {
        Self {
            kind,
            state: Mutex::new(StreamState::fresh(0)),
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    fn state(&self) -> MutexGuard<'_, StreamState<T>> {
        // No code path panics while holding the lock; recover the data if one ever does
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current state
    pub fn view(&self) -> StreamView<T> {
        let state = self.state();
        StreamView {
            items: state.items.clone(),
            cursor: state.cursor,
            total: state.total,
            phase: state.phase,
            last_error: state.last_error.clone(),
            action_error: state.action_error.clone(),
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.state().phase
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    /// Fetch the page at the current cursor and append it.
    ///
    /// `fetch` receives the page index to load. It is not called at all when
    /// the stream is already loading or exhausted.
    pub async fn request_page<F, Fut>(&self, fetch: F) -> PageOutcome
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, FeedError>>,
    {
        let (cursor, generation) = {
            let mut state = self.state();
            match state.phase {
                StreamPhase::Loading => {
                    tracing::debug!(stream = %self.kind, "Fetch already in flight, skipping");
                    return PageOutcome::Skipped;
                }
                StreamPhase::Exhausted => {
                    tracing::debug!(stream = %self.kind, "Stream exhausted, skipping");
                    return PageOutcome::Skipped;
                }
                StreamPhase::Idle | StreamPhase::Loaded | StreamPhase::Error => {}
            }
            state.phase = StreamPhase::Loading;
            state.last_error = None;
            (state.cursor, state.generation)
        };

        tracing::debug!(stream = %self.kind, page = cursor, "Requesting page");
        let result = fetch(cursor).await;

        let mut state = self.state();
        if state.generation != generation {
            tracing::debug!(
                stream = %self.kind,
                page = cursor,
                "Stream was reset during fetch, dropping response"
            );
            return PageOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let received = page.items.len();
                state.items.extend(page.items);
                state.cursor += 1;
                state.total = page.total;
                state.phase = if received == 0 || state.items.len() as u64 >= state.total {
                    StreamPhase::Exhausted
                } else {
                    StreamPhase::Loaded
                };
                tracing::debug!(
                    stream = %self.kind,
                    received = received,
                    loaded = state.items.len(),
                    total = state.total,
                    phase = %state.phase,
                    "Page appended"
                );
                PageOutcome::Appended { received }
            }
            Err(e) => {
                tracing::warn!(stream = %self.kind, page = cursor, error = %e, "Page fetch failed");
                state.phase = StreamPhase::Error;
                state.last_error = Some(e.user_message_or(DEFAULT_LOAD_ERROR));
                PageOutcome::Failed
            }
        }
    }

    /// Empty the stream and invalidate any in-flight fetch
    pub fn reset(&self) {
        let mut state = self.state();
        let generation = state.generation + 1;
        *state = StreamState::fresh(generation);
        tracing::debug!(stream = %self.kind, generation = generation, "Stream reset");
    }

    /// Replace the first item with `id` by `mutator(item)`.
    ///
    /// Returns whether the stream held such an item.
    pub fn update_item<F>(&self, id: &ItemId, mutator: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let mut state = self.state();
        match state.items.iter().position(|item| item.item_id() == id) {
            Some(index) => {
                let updated = mutator(&state.items[index]);
                state.items[index] = updated;
                true
            }
            None => false,
        }
    }

    pub fn set_action_error(&self, message: impl Into<String>) {
        self.state().action_error = Some(message.into());
    }

    pub fn clear_action_error(&self) {
        self.state().action_error = None;
    }
}

/// The two streams the aggregator owns
pub struct FeedStreams {
    pub friends: FeedStream<ContentItem>,
    pub recommended: FeedStream<RecommendationEntry>,
}

impl Default for FeedStreams {
    fn default() -> Self {
        Self {
            friends: FeedStream::new(StreamKind::Friends),
            recommended: FeedStream::new(StreamKind::Recommended),
        }
    }
}

impl FeedStreams {
    pub fn set_action_error(&self, kind: StreamKind, message: impl Into<String>) {
        match kind {
            StreamKind::Friends => self.friends.set_action_error(message),
            StreamKind::Recommended => self.recommended.set_action_error(message),
        }
    }

    pub fn clear_action_error(&self, kind: StreamKind) {
        match kind {
            StreamKind::Friends => self.friends.clear_action_error(),
            StreamKind::Recommended => self.recommended.clear_action_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_item, test_items};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;
    use tokio_test::{assert_pending, assert_ready_eq};

    fn page(items: Vec<ContentItem>, total: u64) -> Page<ContentItem> {
        Page { items, total }
    }

    fn stream() -> FeedStream<ContentItem> {
        FeedStream::new(StreamKind::Friends)
    }

    #[test]
    fn new_stream_is_idle_and_empty() {
        let stream = stream();
        assert_eq!(stream.kind(), StreamKind::Friends);
        let view = stream.view();
        assert_eq!(view.phase, StreamPhase::Idle);
        assert!(view.items.is_empty());
        assert_eq!(view.cursor, 0);
        assert_eq!(view.last_error, None);
    }

    #[tokio::test]
    async fn successful_page_appends_and_advances_cursor() {
        let stream = stream();

        let outcome = stream
            .request_page(|cursor| async move {
                assert_eq!(cursor, 0);
                Ok(page(test_items("a", 3), 10))
            })
            .await;

        assert_eq!(outcome, PageOutcome::Appended { received: 3 });
        let view = stream.view();
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.cursor, 1);
        assert_eq!(view.total, 10);
        assert_eq!(view.phase, StreamPhase::Loaded);
    }

    #[tokio::test]
    async fn pagination_grows_monotonically_until_total() {
        let stream = stream();
        let mut sizes = Vec::new();

        for expected_cursor in 0..3u32 {
            stream
                .request_page(|cursor| async move {
                    assert_eq!(cursor, expected_cursor);
                    Ok(page(test_items(&format!("p{}", cursor), 2), 6))
                })
                .await;
            sizes.push(stream.len());
        }

        assert_eq!(sizes, vec![2, 4, 6]);
        assert_eq!(stream.phase(), StreamPhase::Exhausted);

        let calls = AtomicUsize::new(0);
        let outcome = stream
            .request_page(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(page(test_items("extra", 2), 6)) }
            })
            .await;
        assert_eq!(outcome, PageOutcome::Skipped);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(stream.len(), 6);
    }

    #[tokio::test]
    async fn empty_page_exhausts_stream() {
        let stream = stream();
        stream
            .request_page(|_| async { Ok(page(test_items("a", 2), 100)) })
            .await;
        let outcome = stream
            .request_page(|_| async { Ok(page(Vec::new(), 100)) })
            .await;

        assert_eq!(outcome, PageOutcome::Appended { received: 0 });
        assert_eq!(stream.phase(), StreamPhase::Exhausted);
        assert_eq!(stream.len(), 2);
    }

    #[tokio::test]
    async fn failure_records_message_and_keeps_position() {
        let stream = stream();
        stream
            .request_page(|_| async { Ok(page(test_items("a", 2), 10)) })
            .await;

        let outcome = stream
            .request_page(|_| async {
                Err(FeedError::ServerRejection {
                    status: 503,
                    message: Some("Servis nije dostupan".to_string()),
                })
            })
            .await;

        assert_eq!(outcome, PageOutcome::Failed);
        let view = stream.view();
        assert_eq!(view.phase, StreamPhase::Error);
        assert_eq!(view.last_error.as_deref(), Some("Servis nije dostupan"));
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.cursor, 1);
    }

    #[tokio::test]
    async fn failure_without_message_uses_fallback() {
        let stream = stream();
        stream
            .request_page(|_| async {
                Err(FeedError::NetworkFailure("connection reset".to_string()))
            })
            .await;

        assert_eq!(stream.view().last_error.as_deref(), Some(DEFAULT_LOAD_ERROR));
    }

    #[tokio::test]
    async fn retry_after_error_resumes_same_cursor() {
        let stream = stream();
        stream
            .request_page(|_| async { Err(FeedError::NetworkFailure("down".to_string())) })
            .await;

        let outcome = stream
            .request_page(|cursor| async move {
                assert_eq!(cursor, 0);
                Ok(page(test_items("a", 1), 5))
            })
            .await;

        assert_eq!(outcome, PageOutcome::Appended { received: 1 });
        let view = stream.view();
        assert_eq!(view.phase, StreamPhase::Loaded);
        assert_eq!(view.last_error, None);
    }

    #[test]
    fn second_request_while_loading_is_dropped() {
        let stream = stream();
        let gate = Arc::new(Notify::new());
        let calls = AtomicUsize::new(0);

        let mut first = tokio_test::task::spawn(stream.request_page(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Ok(page(test_items("a", 4), 20))
            }
        }));
        assert_pending!(first.poll());
        assert_eq!(stream.phase(), StreamPhase::Loading);

        let mut second = tokio_test::task::spawn(stream.request_page(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(page(test_items("b", 4), 20)) }
        }));
        assert_ready_eq!(second.poll(), PageOutcome::Skipped);

        gate.notify_one();
        assert_ready_eq!(first.poll(), PageOutcome::Appended { received: 4 });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(stream.len(), 4);
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let stream = stream();
        let gate = Arc::new(Notify::new());

        let mut in_flight = tokio_test::task::spawn(stream.request_page(|_| {
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Ok(page(test_items("old", 3), 3))
            }
        }));
        assert_pending!(in_flight.poll());

        stream.reset();
        gate.notify_one();

        assert_ready_eq!(in_flight.poll(), PageOutcome::Stale);
        let view = stream.view();
        assert!(view.items.is_empty());
        assert_eq!(view.phase, StreamPhase::Idle);
        assert_eq!(view.cursor, 0);
    }

    #[tokio::test]
    async fn reset_returns_exhausted_stream_to_idle() {
        let stream = stream();
        stream
            .request_page(|_| async { Ok(page(test_items("a", 1), 1)) })
            .await;
        stream.set_action_error("Greška pri lajku.");
        assert_eq!(stream.phase(), StreamPhase::Exhausted);

        stream.reset();

        let view = stream.view();
        assert_eq!(view.phase, StreamPhase::Idle);
        assert!(view.items.is_empty());
        assert_eq!(view.cursor, 0);
        assert_eq!(view.action_error, None);

        let outcome = stream
            .request_page(|cursor| async move {
                assert_eq!(cursor, 0);
                Ok(page(test_items("b", 1), 2))
            })
            .await;
        assert_eq!(outcome, PageOutcome::Appended { received: 1 });
    }

    #[tokio::test]
    async fn update_item_replaces_matching_item_only() {
        let stream = stream();
        stream
            .request_page(|_| async { Ok(page(vec![test_item("p1"), test_item("p2")], 2)) })
            .await;

        let found = stream.update_item(&ItemId::from("p2"), |item| ContentItem {
            like_count: 9,
            ..item.clone()
        });

        assert!(found);
        let view = stream.view();
        assert_eq!(view.items[0].like_count, 0);
        assert_eq!(view.items[1].like_count, 9);
    }

    #[test]
    fn update_item_missing_is_noop() {
        let stream = stream();
        let called = AtomicUsize::new(0);

        let found = stream.update_item(&ItemId::from("nope"), |item| {
            called.fetch_add(1, Ordering::SeqCst);
            item.clone()
        });

        assert!(!found);
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn action_errors_are_scoped_per_stream() {
        let streams = FeedStreams::default();
        streams.set_action_error(StreamKind::Recommended, "Greška pri prijavi.");

        assert_eq!(streams.friends.view().action_error, None);
        assert_eq!(
            streams.recommended.view().action_error.as_deref(),
            Some("Greška pri prijavi.")
        );

        streams.clear_action_error(StreamKind::Recommended);
        assert_eq!(streams.recommended.view().action_error, None);
    }
}
