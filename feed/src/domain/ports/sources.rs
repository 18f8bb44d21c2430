//! Data source and action port traits
//!
//! These traits define the interface to the feed backend.
//! Implementations are provided by adapters (e.g., the HTTP client).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ContentItem, ItemId, RawRecommendation, UserId};
use crate::error::FeedError;

/// One page of the friends feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendsPage {
    pub content: Vec<ContentItem>,
    pub page: u32,
    pub size: u32,
    /// Authoritative count across all pages
    pub total_elements: u64,
}

/// Chronologically paginated posts from the actor's friends
#[async_trait]
pub trait FriendsFeedSource: Send + Sync {
    /// Fetch one page of posts published within the last `day_window` days
    async fn fetch(
        &self,
        user_id: &UserId,
        day_window: u32,
        page_index: u32,
        page_size: u32,
    ) -> Result<FriendsPage, FeedError>;
}

/// Pre-scored recommendations for the actor
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Fetch at most `limit` recommendations, best first
    async fn fetch(&self, user_id: &UserId, limit: u32)
        -> Result<Vec<RawRecommendation>, FeedError>;
}

/// Side-effecting post actions
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Like a post, returning the server's updated copy
    async fn like(&self, item_id: &ItemId) -> Result<ContentItem, FeedError>;

    /// Report a post. The backend may not echo the updated post.
    async fn report(&self, item_id: &ItemId, reason: &str)
        -> Result<Option<ContentItem>, FeedError>;
}
