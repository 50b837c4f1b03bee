use super::MatchEntry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An inclusive, contiguous block of selected rows in the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub top: usize,
    pub bottom: usize,
}

impl RowRange {
    pub fn new(top: usize, bottom: usize) -> Self {
        Self { top, bottom }
    }

    pub fn single(row: usize) -> Self {
        Self::new(row, row)
    }
}

/// Returns the stored path of every row covered by `ranges`.
///
/// Ranges are expanded in the order given, rows within a range top to
/// bottom. Rows beyond the end of `entries` are skipped.
pub fn selected_paths(entries: &[MatchEntry], ranges: &[RowRange]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if entries.is_empty() {
        return paths;
    }
    let last_row = entries.len() - 1;

    for range in ranges {
        if range.top > last_row {
            continue;
        }
        let bottom = range.bottom.min(last_row);
        for entry in entries.get(range.top..=bottom).into_iter().flatten() {
            paths.push(entry.path.clone());
        }
    }
    paths
}
