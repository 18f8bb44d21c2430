//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod identity;

pub use http::FeedApiClient;
pub use identity::SessionIdentity;
