//! Domain entities
//!
//! Pure domain models for the two feed streams.
//! These are separate from the wire DTOs in the `adapters::http` module.

pub mod content_item;
pub mod recommendation;

pub use content_item::{ContentItem, ItemId, StreamItem, UserId};
pub use recommendation::{RawRecommendation, RecommendationEntry};
