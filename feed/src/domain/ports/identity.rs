//! Identity port
//!
//! Supplies the current actor. The provider is polled, not observed: changing
//! the actor does nothing until the owner calls
//! `FeedAggregator::sync_identity`, which re-initializes on a difference.

use crate::domain::entities::UserId;

/// Source of the signed-in actor, if any.
///
/// Implementations must not block; the aggregator reads this on every sync.
pub trait IdentityProvider: Send + Sync {
    /// `None` means anonymous
    fn current_actor(&self) -> Option<UserId>;
}
