//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::domain::entities::{ContentItem, ItemId, RawRecommendation, RecommendationEntry, UserId};

/// 2023-11-14T22:13:20Z
const TEST_CREATED_AT: i64 = 1_700_000_000_000;

/// The signed-in test actor
pub fn test_user() -> UserId {
    UserId::from("test-user")
}

/// Create a test post with default values
pub fn test_item(id: &str) -> ContentItem {
    ContentItem {
        id: ItemId::from(id),
        author_id: UserId::from("test-author"),
        text: format!("Post {}", id),
        hashtags: vec!["#test".to_string()],
        like_count: 0,
        report_count: 0,
        created_at_epoch_millis: TEST_CREATED_AT,
    }
}

/// Create a test post as the server returns it after a like
pub fn test_item_with_likes(id: &str, likes: u64) -> ContentItem {
    ContentItem {
        like_count: likes,
        ..test_item(id)
    }
}

/// Create `count` posts with ids `{prefix}-0`, `{prefix}-1`, ...
pub fn test_items(prefix: &str, count: usize) -> Vec<ContentItem> {
    (0..count)
        .map(|i| {
            let mut item = test_item(&format!("{}-{}", prefix, i));
            item.created_at_epoch_millis = TEST_CREATED_AT - (i as i64) * 60_000;
            item
        })
        .collect()
}

/// Create a raw recommendation wrapping `test_item(id)`
pub fn test_raw_recommendation(id: &str, score: f64, reasons: &[&str]) -> RawRecommendation {
    RawRecommendation {
        item: Some(test_item(id)),
        score,
        reasons: reasons.iter().map(|r| r.to_string()).collect(),
    }
}

/// Create a validated recommendation entry
pub fn test_recommendation(id: &str, score: f64, reasons: &[&str]) -> RecommendationEntry {
    RecommendationEntry {
        item: test_item(id),
        score,
        reasons: reasons.iter().map(|r| r.to_string()).collect(),
    }
}
