use super::patterns::PatternSet;
use super::{EntryKind, MatchEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Number of examined entries between two progress updates.
pub const PROGRESS_INTERVAL: usize = 500;

/// Running counters of an in-flight scan.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub examined: usize,
    pub matches: usize,
}

/// The terminal report of a scan.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanSummary {
    /// The query had no usable pattern; the filesystem was not touched.
    EmptyQuery,
    NoMatches { examined: usize },
    Found { matches: usize, examined: usize },
}

impl ScanSummary {
    fn from_tally(tally: &ScanTally) -> Self {
        if tally.matches == 0 {
            ScanSummary::NoMatches {
                examined: tally.examined,
            }
        } else {
            ScanSummary::Found {
                matches: tally.matches,
                examined: tally.examined,
            }
        }
    }

    pub fn examined(&self) -> usize {
        match self {
            ScanSummary::EmptyQuery => 0,
            ScanSummary::NoMatches { examined } | ScanSummary::Found { examined, .. } => *examined,
        }
    }

    pub fn matches(&self) -> usize {
        match self {
            ScanSummary::Found { matches, .. } => *matches,
            _ => 0,
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanSummary::EmptyQuery => write!(f, "Empty query."),
            ScanSummary::NoMatches { examined } => {
                write!(f, "Nothing found ({examined} examined).")
            }
            ScanSummary::Found { matches, examined } => {
                write!(f, "Found {matches} of {examined} examined.")
            }
        }
    }
}

/// Everything a finished scan hands over to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub entries: Vec<MatchEntry>,
    pub summary: ScanSummary,
}

impl ScanOutcome {
    fn empty_query() -> Self {
        Self {
            entries: Vec::new(),
            summary: ScanSummary::EmptyQuery,
        }
    }
}

/// Accumulator threaded through the walk of every root.
#[derive(Default)]
struct ScanTally {
    examined: usize,
    matches: usize,
    entries: Vec<MatchEntry>,
}

impl ScanTally {
    fn progress(&self) -> ScanProgress {
        ScanProgress {
            examined: self.examined,
            matches: self.matches,
        }
    }

    fn record_match(&mut self, entry: MatchEntry) {
        self.entries.push(entry);
        self.matches += 1;
    }

    fn into_outcome(self) -> ScanOutcome {
        let summary = ScanSummary::from_tally(&self);
        ScanOutcome {
            entries: self.entries,
            summary,
        }
    }
}

/// Recursive name search over a list of roots.
///
/// The walk is sequential and never follows symbolic links. The progress
/// observer is called every `progress_interval` examined entries; it is the
/// only point where a caller gets control back before the scan returns.
#[derive(Debug, Clone)]
pub struct FileScanner {
    progress_interval: usize,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FileScanner {
    pub fn new() -> Self {
        Self {
            progress_interval: PROGRESS_INTERVAL,
        }
    }

    /// Uses a custom progress cadence. Zero is treated as one.
    pub fn with_progress_interval(progress_interval: usize) -> Self {
        Self {
            progress_interval: progress_interval.max(1),
        }
    }

    pub fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    /// Parses `raw_query` and scans `roots` with the result.
    pub fn search<F>(&self, raw_query: &str, roots: &[PathBuf], on_progress: F) -> ScanOutcome
    where
        F: FnMut(ScanProgress),
    {
        match PatternSet::parse(raw_query) {
            Some(patterns) => self.scan_with(&patterns, roots, on_progress),
            None => ScanOutcome::empty_query(),
        }
    }

    /// Scans `roots` for entries matching any of `patterns`.
    ///
    /// Blank patterns are dropped; if none remain the result is
    /// [`ScanSummary::EmptyQuery`] and no root is read.
    pub fn scan<F>(&self, patterns: &[String], roots: &[PathBuf], on_progress: F) -> ScanOutcome
    where
        F: FnMut(ScanProgress),
    {
        match PatternSet::from_patterns(patterns) {
            Some(patterns) => self.scan_with(&patterns, roots, on_progress),
            None => ScanOutcome::empty_query(),
        }
    }

    pub fn scan_with<F>(
        &self,
        patterns: &PatternSet,
        roots: &[PathBuf],
        mut on_progress: F,
    ) -> ScanOutcome
    where
        F: FnMut(ScanProgress),
    {
        let mut tally = ScanTally::default();
        for root in roots {
            self.walk_root(root, patterns, &mut tally, &mut on_progress);
        }

        tracing::info!(
            "Scan finished over {} root(s): {} matches of {} examined",
            roots.len(),
            tally.matches,
            tally.examined
        );
        tally.into_outcome()
    }

    fn walk_root<F>(
        &self,
        root: &Path,
        patterns: &PatternSet,
        tally: &mut ScanTally,
        on_progress: &mut F,
    ) where
        F: FnMut(ScanProgress),
    {
        tracing::debug!("Walking root {:?}", root);
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {:?}: {}", root, e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                continue;
            }

            tally.examined += 1;
            if tally.examined % self.progress_interval == 0 {
                on_progress(tally.progress());
            }

            let name = entry.file_name().to_string_lossy();
            if !patterns.matches(&name) {
                continue;
            }

            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let name = name.into_owned();
            tally.record_match(MatchEntry::new(entry.into_path(), &name, kind));
        }
    }
}

/// Scans `roots` for `patterns` with the default progress cadence.
pub fn scan<F>(patterns: &[String], roots: &[PathBuf], on_progress: F) -> ScanOutcome
where
    F: FnMut(ScanProgress),
{
    FileScanner::new().scan(patterns, roots, on_progress)
}

/// Parses `raw_query` and scans `roots` with the default progress cadence.
pub fn search<F>(raw_query: &str, roots: &[PathBuf], on_progress: F) -> ScanOutcome
where
    F: FnMut(ScanProgress),
{
    FileScanner::new().search(raw_query, roots, on_progress)
}
