pub mod error;
pub mod file_ops;
pub mod patterns;
pub mod scanner;
pub mod selection;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Suffix appended to the display name of matched directories.
pub const DIR_MARKER: &str = " [DIR]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A single file or directory whose base name satisfied at least one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    /// The raw path as produced by the walk, without the directory marker.
    pub path: PathBuf,
    pub display_name: String,
    pub kind: EntryKind,
}

impl MatchEntry {
    pub fn new(path: PathBuf, name: &str, kind: EntryKind) -> Self {
        let display_name = match kind {
            EntryKind::Directory => format!("{name}{DIR_MARKER}"),
            EntryKind::File => name.to_string(),
        };
        Self {
            path,
            display_name,
            kind,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

pub use error::CoreError;
pub use file_ops::{delete_paths, move_paths, reveal_target, BatchReport, OperationFailure};
pub use patterns::{parse_patterns, PatternSet};
pub use scanner::{
    scan, search, FileScanner, ScanOutcome, ScanProgress, ScanSummary, PROGRESS_INTERVAL,
};
pub use selection::{selected_paths, RowRange};
