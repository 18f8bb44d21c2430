//! Recommendation entry domain entity
//!
//! Recommendations arrive pre-scored. The client never computes scores; it only
//! validates entries and orders their reasons for display.

use serde::{Deserialize, Serialize};

use super::{ContentItem, ItemId, StreamItem};
use crate::error::FeedError;

/// A recommendation exactly as the data source returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecommendation {
    /// Missing when the post was deleted after scoring
    pub item: Option<ContentItem>,
    pub score: f64,
    /// May contain duplicates
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// A validated recommendation held by the recommended stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    pub item: ContentItem,
    pub score: f64,
    /// Deduplicated, in display order
    pub reasons: Vec<String>,
}

impl RecommendationEntry {
    /// Replace the wrapped item, keeping score and reasons
    pub fn with_item(&self, item: ContentItem) -> RecommendationEntry {
        RecommendationEntry {
            item,
            score: self.score,
            reasons: self.reasons.clone(),
        }
    }
}

impl TryFrom<RawRecommendation> for RecommendationEntry {
    type Error = FeedError;

    fn try_from(raw: RawRecommendation) -> Result<Self, Self::Error> {
        let item = raw.item.ok_or_else(|| {
            FeedError::InvalidEntry(format!(
                "recommendation with score {} has no item",
                raw.score
            ))
        })?;

        Ok(RecommendationEntry {
            item,
            score: raw.score,
            reasons: raw.reasons,
        })
    }
}

impl StreamItem for RecommendationEntry {
    fn item_id(&self) -> &ItemId {
        &self.item.id
    }
}
