//! Application layer
//!
//! Contains the feed controller and its building blocks.
//! The aggregator coordinates streams, ports and the reason ranker.

pub mod action_propagator;
pub mod feed_aggregator;
pub mod feed_stream;
pub mod reason_config;
pub mod reason_ranker;

pub use action_propagator::{ActionOutcome, ActionPropagator};
pub use feed_aggregator::{
    FeedAggregator, FeedSettings, InitOutcome, DEFAULT_DAY_WINDOW, DEFAULT_PAGE_SIZE,
    DEFAULT_RECOMMENDED_LIMIT,
};
pub use feed_stream::{
    FeedStream, FeedStreams, Page, PageOutcome, StreamKind, StreamPhase, StreamView,
};
// Re-export reason constants for consumers building custom tables
#[allow(unused_imports)]
pub use reason_config::*;
pub use reason_ranker::{rank_reasons, ReasonRanker};
