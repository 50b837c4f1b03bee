//! Defines the central, mutable state of the application.

use crate::config::{self, AppConfig};
use super::events::{RootId, RootRef};
use super::view_model::RootRow;
use crate::core::{MatchEntry, ScanOutcome, ScanProgress, ScanSummary};
use std::path::PathBuf;

pub const STATUS_IDLE: &str = "Waiting for a scan.";
pub const STATUS_SEARCHING: &str = "Searching...";

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared access
/// from the main event loop, IPC handlers and the background scan task.
pub struct AppState {
    /// The configured search roots.
    pub config: AppConfig,
    /// Where the root list is persisted. `None` means the platform default.
    pub config_path: Option<PathBuf>,
    /// The most recent query text, reused to refresh results after a mutation.
    pub last_query: String,
    /// The results of the last finished scan; row indices refer to this list.
    pub results: Vec<MatchEntry>,
    /// The summary of the last finished scan.
    pub summary: Option<ScanSummary>,
    /// The counters of the scan in flight.
    pub scan_progress: ScanProgress,
    /// `true` while a scan is running. Only one scan may run at a time.
    pub is_scanning: bool,
    /// The text shown in the status line when no scan is running.
    pub status_message: String,
    /// Directories picked in the settings dialog that are not committed yet.
    pub picked_roots: Vec<PathBuf>,
}

impl Default for AppState {
    /// Creates a default `AppState` instance, loading the configuration from disk.
    fn default() -> Self {
        Self::with_config(AppConfig::load(), None)
    }
}

impl AppState {
    pub fn with_config(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            last_query: String::new(),
            results: Vec::new(),
            summary: None,
            scan_progress: ScanProgress::default(),
            is_scanning: false,
            status_message: STATUS_IDLE.to_string(),
            picked_roots: Vec::new(),
        }
    }

    /// Marks a new scan as started. Returns `false` if one is already running.
    pub fn begin_scan(&mut self) -> bool {
        if self.is_scanning {
            return false;
        }
        self.is_scanning = true;
        self.scan_progress = ScanProgress::default();
        self.results.clear();
        self.summary = None;
        self.status_message = STATUS_SEARCHING.to_string();
        true
    }

    /// Takes over the results of a finished scan.
    pub fn finish_scan(&mut self, outcome: ScanOutcome) {
        self.is_scanning = false;
        self.scan_progress = ScanProgress {
            examined: outcome.summary.examined(),
            matches: outcome.summary.matches(),
        };
        self.status_message = format!("Done. {}", outcome.summary);
        self.summary = Some(outcome.summary);
        self.results = outcome.entries;
    }

    /// Ends a scan that did not produce an outcome.
    pub fn abort_scan(&mut self, reason: &str) {
        self.is_scanning = false;
        self.status_message = format!("Search failed: {reason}");
    }

    /// Keeps a picked directory until the settings dialog commits or drops it.
    pub fn propose_root(&mut self, path: PathBuf) -> RootRow {
        let row = RootRow::new(&path, RootId::Picked(self.picked_roots.len()));
        self.picked_roots.push(path);
        row
    }

    /// Maps the settings dialog's list back to paths. Unknown ids are dropped.
    pub fn resolve_roots(&self, refs: &[RootRef]) -> Vec<PathBuf> {
        refs.iter()
            .filter_map(|r| {
                let resolved = match r {
                    RootRef::Id(RootId::Configured(i)) => self.config.roots.get(*i).cloned(),
                    RootRef::Id(RootId::Picked(i)) => self.picked_roots.get(*i).cloned(),
                    RootRef::Path(path) => Some(path.clone()),
                };
                if resolved.is_none() {
                    tracing::warn!("Ignoring unknown root reference {:?}", r);
                }
                resolved
            })
            .collect()
    }

    /// Writes the root list to disk, logging instead of failing.
    pub fn persist_config(&self) {
        if let Err(e) = config::settings::save_config(&self.config, self.config_path.as_deref()) {
            tracing::warn!("Failed to save root list: {}", e);
        }
    }
}
