//! Feedline
//!
//! Client-side feed controller that merges a paginated friends feed with a
//! scored recommendation feed and keeps both consistent after likes and reports.
//! Uses hexagonal (ports & adapters) architecture: the controller in `app` only
//! talks to the traits in `domain::ports`.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;

#[cfg(test)]
mod test_utils;

pub use adapters::{FeedApiClient, SessionIdentity};
pub use app::{
    ActionOutcome, FeedAggregator, FeedSettings, PageOutcome, ReasonPriorityTable, ReasonRanker,
    StreamKind, StreamPhase, StreamView,
};
pub use config::Config;
pub use domain::entities::{ContentItem, ItemId, RecommendationEntry, UserId};
pub use error::{ClientError, ConfigError, FeedError};

/// Aggregator wired to the HTTP backend
pub type HttpFeedAggregator =
    FeedAggregator<FeedApiClient, FeedApiClient, FeedApiClient, SessionIdentity>;
