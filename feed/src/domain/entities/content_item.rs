//! Content item domain entity
//!
//! A single post as shown in either feed stream. Counters are owned by the
//! server: the client only ever adopts values returned by an action response.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a post
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an actor (the signed-in user or a post author)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank ids are treated as "no actor"
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post in the friends or recommended stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub author_id: UserId,
    pub text: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub like_count: u64,
    pub report_count: u64,
    pub created_at_epoch_millis: i64,
}

impl ContentItem {
    /// Creation time as a UTC timestamp, if the millis are in range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at_epoch_millis).single()
    }

    /// Hashtags joined for display, e.g. `#tech #film`
    pub fn hashtags_display(&self) -> String {
        self.hashtags.join(" ")
    }
}

/// Anything a stream can hold and locate by item id
pub trait StreamItem: Clone + Send + 'static {
    fn item_id(&self) -> &ItemId;
}

impl StreamItem for ContentItem {
    fn item_id(&self) -> &ItemId {
        &self.id
    }
}
