//! Responsible for transforming the `AppState` into a `UiState` view model.

use crate::core::{MatchEntry, ScanProgress, ScanSummary};
use serde::Serialize;
use std::path::Path;

use super::events::RootId;
use super::state::AppState;

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub roots: Vec<RootRow>,
    pub query: String,
    pub rows: Vec<ResultRow>,
    pub is_scanning: bool,
    pub status_message: String,
    pub scan_progress: ScanProgress,
    pub summary: Option<ScanSummary>,
}

/// One line of the results table.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
}

impl From<&MatchEntry> for ResultRow {
    fn from(entry: &MatchEntry) -> Self {
        Self {
            name: entry.display_name.clone(),
            path: entry.path.to_string_lossy().into_owned(),
            is_directory: entry.is_directory(),
        }
    }
}

/// One search root as listed in the settings dialog.
///
/// `display` is lossy for names that are not valid UTF-8; the page hands
/// `id` back so the stored path is never rebuilt from it.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RootRow {
    pub display: String,
    pub id: RootId,
}

impl RootRow {
    pub fn new(path: &Path, id: RootId) -> Self {
        Self {
            display: path.to_string_lossy().into_owned(),
            id,
        }
    }
}

/// The status line while a scan is running.
pub fn progress_message(progress: &ScanProgress) -> String {
    format!(
        "Scanned: {}, found: {}",
        progress.examined, progress.matches
    )
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let status_message = if state.is_scanning && state.scan_progress.examined > 0 {
        progress_message(&state.scan_progress)
    } else {
        state.status_message.clone()
    };

    UiState {
        roots: state
            .config
            .roots
            .iter()
            .enumerate()
            .map(|(i, r)| RootRow::new(r, RootId::Configured(i)))
            .collect(),
        query: state.last_query.clone(),
        rows: state.results.iter().map(ResultRow::from).collect(),
        is_scanning: state.is_scanning,
        status_message,
        scan_progress: state.scan_progress,
        summary: state.summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::EntryKind;
    use std::path::PathBuf;

    #[test]
    fn test_rows_mirror_results() {
        let mut state = AppState::with_config(AppConfig::new(vec![PathBuf::from("/r")]), None);
        state.results = vec![
            MatchEntry::new(PathBuf::from("/r/Reports"), "Reports", EntryKind::Directory),
            MatchEntry::new(PathBuf::from("/r/Report.txt"), "Report.txt", EntryKind::File),
        ];

        let ui = generate_ui_state(&state);

        assert_eq!(
            ui.roots,
            vec![RootRow {
                display: "/r".to_string(),
                id: RootId::Configured(0),
            }]
        );
        assert_eq!(
            ui.rows[0],
            ResultRow {
                name: "Reports [DIR]".to_string(),
                path: "/r/Reports".to_string(),
                is_directory: true,
            }
        );
        assert!(!ui.rows[1].is_directory);
    }

    #[test]
    fn test_status_shows_progress_while_scanning() {
        let mut state = AppState::with_config(AppConfig::new(Vec::new()), None);
        state.begin_scan();
        assert_eq!(generate_ui_state(&state).status_message, "Searching...");

        state.scan_progress = ScanProgress {
            examined: 1_500,
            matches: 12,
        };
        insta::assert_snapshot!(
            generate_ui_state(&state).status_message,
            @"Scanned: 1500, found: 12"
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let state = AppState::with_config(AppConfig::new(Vec::new()), None);
        let json = serde_json::to_value(generate_ui_state(&state)).unwrap();
        assert_eq!(json["isScanning"], serde_json::json!(false));
        assert_eq!(json["statusMessage"], serde_json::json!("Waiting for a scan."));
        assert!(json["summary"].is_null());
    }

    #[test]
    fn test_roots_carry_their_id() {
        let state = AppState::with_config(
            AppConfig::new(vec![PathBuf::from("/a"), PathBuf::from("/b")]),
            None,
        );
        let json = serde_json::to_value(generate_ui_state(&state)).unwrap();
        assert_eq!(
            json["roots"][1],
            serde_json::json!({ "display": "/b", "id": { "configured": 1 } })
        );
    }
}
