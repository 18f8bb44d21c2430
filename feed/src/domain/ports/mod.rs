//! Domain ports (traits)
//!
//! Port traits define interfaces that the feed controller requires.
//! Adapters provide concrete implementations of these traits.

pub mod identity;
pub mod sources;

pub use identity::IdentityProvider;
pub use sources::{ActionExecutor, FriendsFeedSource, FriendsPage, RecommendationSource};
