//! Reason priority configuration
//!
//! Maps "why recommended" reason strings to a display rank. Lower ranks are
//! shown first; reasons missing from the table have no rank and are shown
//! after every ranked reason, whatever its value.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Version of the built-in table
pub const REASON_TABLE_VERSION: u32 = 1;

/// Post liked by a user with similar taste
pub const REASON_SIMILAR_USER: &str = "lajkovao sličan korisnik";

/// Recent post with many likes
pub const REASON_POPULAR_POST: &str = "popularan post";

/// Post carries a hashtag the actor liked recently
pub const REASON_LIKED_HASHTAG: &str = "lajkovan hešteg";

/// Post carries a trending hashtag
pub const REASON_POPULAR_HASHTAG: &str = "popularan hešteg";

/// Post carries a hashtag the actor has used in their own posts
pub const REASON_AUTHORED_HASHTAG: &str = "autorski hešteg";

/// Post is younger than a day
pub const REASON_NEW_POST: &str = "nov post (<24h)";

/// Post matches the actor's long-term hashtag preference
pub const REASON_PREFERRED_HASHTAG: &str = "preferirani hešteg";

/// Versioned reason → rank lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonPriorityTable {
    version: u32,
    ranks: HashMap<String, u8>,
}

impl Default for ReasonPriorityTable {
    fn default() -> Self {
        let ranks = [
            (REASON_SIMILAR_USER, 1),
            (REASON_POPULAR_POST, 2),
            (REASON_LIKED_HASHTAG, 3),
            (REASON_POPULAR_HASHTAG, 4),
            (REASON_AUTHORED_HASHTAG, 5),
            (REASON_NEW_POST, 6),
            (REASON_PREFERRED_HASHTAG, 7),
        ]
        .into_iter()
        .map(|(reason, rank)| (reason.to_string(), rank))
        .collect();

        Self {
            version: REASON_TABLE_VERSION,
            ranks,
        }
    }
}

impl ReasonPriorityTable {
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Rank of `reason`, `None` when the table does not know it
    pub fn rank(&self, reason: &str) -> Option<u8> {
        self.ranks.get(reason.trim()).copied()
    }

    /// Add or override a single entry
    pub fn with_rank(mut self, reason: impl Into<String>, rank: u8) -> Self {
        self.ranks.insert(reason.into(), rank);
        self
    }

    /// Parse a table from JSON: `{"version": 2, "ranks": {"popularan post": 1}}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReasonTableIo {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::ReasonTableParse {
            path: display,
            source,
        })
    }
}
