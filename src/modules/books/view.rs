//! Derived views over a collection. Nothing here holds state.

use serde::Serialize;

use super::models::{BookRecord, BookStatus};

/// Records whose title contains `search_text`, ignoring case.
///
/// An empty search matches everything. Source order is kept.
pub fn filter_by_title<'a>(
    records: &'a [BookRecord],
    search_text: &str,
) -> impl Iterator<Item = &'a BookRecord> + 'a {
    let needle = search_text.to_lowercase();
    records
        .iter()
        .filter(move |record| record.title.to_lowercase().contains(&needle))
}

/// Aggregate counts over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub issued: usize,
}

impl InventoryStats {
    /// Dashboard labels paired with their counts.
    pub fn entries(&self) -> [(&'static str, usize); 3] {
        [
            ("Total Books", self.total),
            ("Available", self.available),
            ("Issued", self.issued),
        ]
    }
}

pub fn compute_stats(records: &[BookRecord]) -> InventoryStats {
    records
        .iter()
        .fold(InventoryStats::default(), |mut stats, record| {
            stats.total += 1;
            match record.status {
                BookStatus::Available => stats.available += 1,
                BookStatus::Issued => stats.issued += 1,
            }
            stats
        })
}
