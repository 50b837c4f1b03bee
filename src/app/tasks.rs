//! The background scan task.
//!
//! The scan itself is a blocking, sequential walk. It runs on Tokio's blocking
//! pool so the event loop can keep repainting; its progress observer is the
//! only channel back to the UI until it returns.

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use super::events::UserEvent;
use super::helpers::{notify_state, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use crate::core::{FileScanner, ScanOutcome, ScanSummary};

pub const EMPTY_QUERY_MESSAGE: &str = "Enter part of a file or folder name to search for.";
pub const NO_MATCHES_MESSAGE: &str = "No files or folders found.";
pub const SCAN_BUSY_MESSAGE: &str = "A search is already running. Please wait for it to finish.";

/// Why a scan was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrigin {
    /// The user asked for a search; empty queries and empty results are announced.
    Query,
    /// Results are re-read after a delete or move. Only the status line reports
    /// the outcome, so messages about the mutation stay on screen.
    Refresh,
}

/// Starts a search for `state.last_query` over the configured roots.
///
/// Returns `None` without doing anything (besides telling the user) when a
/// scan is already in flight. The returned handle completes once the results
/// have been stored and the final `StateUpdate` has been sent.
pub fn start_search<P: EventProxy>(
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Option<JoinHandle<()>> {
    start_search_with(FileScanner::new(), SearchOrigin::Query, proxy, state)
}

/// Re-runs the last query after the filesystem was changed from the result list.
pub fn start_refresh<P: EventProxy>(
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Option<JoinHandle<()>> {
    start_search_with(FileScanner::new(), SearchOrigin::Refresh, proxy, state)
}

pub fn start_search_with<P: EventProxy>(
    scanner: FileScanner,
    origin: SearchOrigin,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Option<JoinHandle<()>> {
    let (query, roots) = {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if !state_guard.begin_scan() {
            tracing::warn!("Search requested while another scan is running; ignoring.");
            proxy.show_info(SCAN_BUSY_MESSAGE);
            return None;
        }
        (state_guard.last_query.clone(), state_guard.config.roots.clone())
    };
    notify_state(&state, &proxy);

    tracing::info!(
        "Starting {:?} search for {:?} over {} root(s)",
        origin,
        query,
        roots.len()
    );
    let handle = tokio::spawn(async move {
        let progress_proxy = proxy.clone();
        let progress_state = state.clone();
        let scan_result = tokio::task::spawn_blocking(move || {
            scanner.search(&query, &roots, |progress| {
                if let Ok(mut state_guard) = progress_state.lock() {
                    state_guard.scan_progress = progress;
                }
                progress_proxy.send_event(UserEvent::ScanProgress(progress));
            })
        })
        .await;

        match scan_result {
            Ok(outcome) => finish_search(outcome, origin, &proxy, &state),
            Err(e) => {
                tracing::error!("Scan task failed: {}", e);
                with_state_and_notify(&state, &proxy, |s| s.abort_scan(&e.to_string()));
            }
        }
    });
    Some(handle)
}

fn finish_search<P: EventProxy>(
    outcome: ScanOutcome,
    origin: SearchOrigin,
    proxy: &P,
    state: &Arc<Mutex<AppState>>,
) {
    if origin == SearchOrigin::Query {
        match outcome.summary {
            ScanSummary::EmptyQuery => proxy.show_info(EMPTY_QUERY_MESSAGE),
            ScanSummary::NoMatches { .. } => proxy.show_info(NO_MATCHES_MESSAGE),
            ScanSummary::Found { .. } => {}
        }
    }

    // The final render is the last event of every scan.
    with_state_and_notify(state, proxy, |s| s.finish_scan(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::ScanProgress;
    use std::fs;
    use std::path::Path;
    use tokio::sync::mpsc;

    #[derive(Clone)]
    struct ChannelProxy(mpsc::UnboundedSender<UserEvent>);

    impl EventProxy for ChannelProxy {
        fn send_event(&self, event: UserEvent) {
            self.0.send(event).expect("Test receiver dropped");
        }
    }

    fn state_for(root: &Path, query: &str) -> Arc<Mutex<AppState>> {
        let config = AppConfig::new(vec![root.to_path_buf()]);
        let mut state = AppState::with_config(config, None);
        state.last_query = query.to_string();
        Arc::new(Mutex::new(state))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<UserEvent>) -> Vec<UserEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_progress_follows_scanner_cadence() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.log", "b.log", "c.log", "d.log", "e.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let state = state_for(dir.path(), "log");
        let (tx, mut rx) = mpsc::unbounded_channel();

        start_search_with(
            FileScanner::with_progress_interval(2),
            SearchOrigin::Query,
            ChannelProxy(tx),
            state.clone(),
        )
        .expect("no scan was running")
        .await
        .unwrap();

        let mut progress = Vec::new();
        let mut last_render = None;
        for event in drain(&mut rx) {
            match event {
                UserEvent::ScanProgress(p) => progress.push(p),
                UserEvent::StateUpdate(ui) => last_render = Some(ui),
                _ => {}
            }
        }
        assert_eq!(
            progress,
            vec![
                ScanProgress {
                    examined: 2,
                    matches: 1,
                },
                ScanProgress {
                    examined: 4,
                    matches: 3,
                },
            ]
        );
        let ui = last_render.expect("final render");
        assert!(!ui.is_scanning);
        assert_eq!(ui.rows.len(), 4);
        assert_eq!(ui.status_message, "Done. Found 4 of 5 examined.");
    }

    #[tokio::test]
    async fn test_refresh_reports_empty_result_only_in_status() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        let state = state_for(dir.path(), "report");
        let (tx, mut rx) = mpsc::unbounded_channel();

        start_refresh(ChannelProxy(tx), state.clone())
            .expect("no scan was running")
            .await
            .unwrap();

        let events = drain(&mut rx);
        assert!(events
            .iter()
            .all(|e| !matches!(e, UserEvent::ShowInfo(_) | UserEvent::ShowError(_))));
        match events.last() {
            Some(UserEvent::StateUpdate(ui)) => {
                assert_eq!(ui.status_message, "Done. Nothing found (1 examined).");
            }
            other => panic!("expected a final render, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_announces_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        let state = state_for(dir.path(), "report");
        let (tx, mut rx) = mpsc::unbounded_channel();

        start_search(ChannelProxy(tx), state.clone())
            .expect("no scan was running")
            .await
            .unwrap();

        let infos: Vec<String> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                UserEvent::ShowInfo(m) => Some(m),
                _ => None,
            })
            .collect();
        assert_eq!(infos, vec![NO_MATCHES_MESSAGE.to_string()]);
    }
}
