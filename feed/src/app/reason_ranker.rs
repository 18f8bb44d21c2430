//! Reason ranker
//!
//! Deduplicates a recommendation's reasons and orders them by the priority
//! table. Unranked reasons keep their first-seen order after all ranked ones.

use std::collections::HashSet;
use std::sync::Arc;

use super::reason_config::ReasonPriorityTable;

/// Orders reasons against a shared priority table
#[derive(Debug, Clone, Default)]
pub struct ReasonRanker {
    table: Arc<ReasonPriorityTable>,
}

impl ReasonRanker {
    pub fn new(table: ReasonPriorityTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Rank one item's reasons
    pub fn rank<I, S>(&self, reasons: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        rank_reasons(&self.table, reasons)
    }
}

/// Trim, drop blanks and duplicates, then stable-sort by rank.
///
/// Unranked reasons go last regardless of how high the ranked ones are.
pub fn rank_reasons<I, S>(table: &ReasonPriorityTable, reasons: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = reasons
        .into_iter()
        .map(|r| r.as_ref().trim().to_string())
        .filter(|r| !r.is_empty() && seen.insert(r.clone()))
        .collect();

    // sort_by_key is stable: equal keys keep encounter order
    unique.sort_by_key(|r| {
        let rank = table.rank(r);
        (rank.is_none(), rank)
    });
    unique
}
