//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! Every fetch yields once before answering, like a real network call, so
//! concurrent callers can observe the `Loading` phase.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::entities::{ContentItem, ItemId, RawRecommendation, UserId};
use crate::domain::ports::{ActionExecutor, FriendsFeedSource, FriendsPage, RecommendationSource};
use crate::error::FeedError;

// ============================================================================
// In-Memory Friends Feed
// ============================================================================

/// (user, day window, page index, page size)
pub type FriendsRequest = (UserId, u32, u32, u32);

#[derive(Default)]
pub struct InMemoryFriendsFeed {
    items: Vec<ContentItem>,
    failure: Option<FeedError>,
    calls: AtomicUsize,
    requests: RwLock<Vec<FriendsRequest>>,
}

impl InMemoryFriendsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these posts, paged by the requested size
    pub fn with_items(mut self, items: Vec<ContentItem>) -> Self {
        self.items = items;
        self
    }

    /// Fail every fetch with `error`
    pub fn failing(mut self, error: FeedError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<FriendsRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl FriendsFeedSource for InMemoryFriendsFeed {
    async fn fetch(
        &self,
        user_id: &UserId,
        day_window: u32,
        page_index: u32,
        page_size: u32,
    ) -> Result<FriendsPage, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .write()
            .unwrap()
            .push((user_id.clone(), day_window, page_index, page_size));

        tokio::task::yield_now().await;

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let content = self
            .items
            .iter()
            .skip((page_index * page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(FriendsPage {
            content,
            page: page_index,
            size: page_size,
            total_elements: self.items.len() as u64,
        })
    }
}

// ============================================================================
// In-Memory Recommendations
// ============================================================================

#[derive(Default)]
pub struct InMemoryRecommendations {
    entries: Vec<RawRecommendation>,
    failure: Option<FeedError>,
    calls: AtomicUsize,
    requests: RwLock<Vec<(UserId, u32)>>,
}

impl InMemoryRecommendations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these entries, truncated to the requested limit
    pub fn with_entries(mut self, entries: Vec<RawRecommendation>) -> Self {
        self.entries = entries;
        self
    }

    /// Fail every fetch with `error`
    pub fn failing(mut self, error: FeedError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(UserId, u32)> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl RecommendationSource for InMemoryRecommendations {
    async fn fetch(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<RawRecommendation>, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .write()
            .unwrap()
            .push((user_id.clone(), limit));

        tokio::task::yield_now().await;

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(self.entries.iter().take(limit as usize).cloned().collect())
    }
}

// ============================================================================
// Mock Action Executor
// ============================================================================

pub struct MockActionExecutor {
    like_result: Result<ContentItem, FeedError>,
    report_result: Result<Option<ContentItem>, FeedError>,
    liked: RwLock<Vec<ItemId>>,
    reported: RwLock<Vec<(ItemId, String)>>,
}

impl Default for MockActionExecutor {
    fn default() -> Self {
        Self {
            like_result: Err(FeedError::NetworkFailure(
                "like not configured".to_string(),
            )),
            report_result: Ok(None),
            liked: RwLock::new(Vec::new()),
            reported: RwLock::new(Vec::new()),
        }
    }
}

impl MockActionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like_result(mut self, result: Result<ContentItem, FeedError>) -> Self {
        self.like_result = result;
        self
    }

    pub fn with_report_result(mut self, result: Result<Option<ContentItem>, FeedError>) -> Self {
        self.report_result = result;
        self
    }

    pub fn liked(&self) -> Vec<ItemId> {
        self.liked.read().unwrap().clone()
    }

    pub fn reported(&self) -> Vec<(ItemId, String)> {
        self.reported.read().unwrap().clone()
    }
}

#[async_trait]
impl ActionExecutor for MockActionExecutor {
    async fn like(&self, item_id: &ItemId) -> Result<ContentItem, FeedError> {
        self.liked.write().unwrap().push(item_id.clone());
        tokio::task::yield_now().await;
        self.like_result.clone()
    }

    async fn report(
        &self,
        item_id: &ItemId,
        reason: &str,
    ) -> Result<Option<ContentItem>, FeedError> {
        self.reported
            .write()
            .unwrap()
            .push((item_id.clone(), reason.to_string()));
        tokio::task::yield_now().await;
        self.report_result.clone()
    }
}
