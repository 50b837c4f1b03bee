//! Contains all the command handlers that are callable from the frontend via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the `core`
//! logic, and for sending `UserEvent`s back to the UI.

use super::events::{RootRef, UserEvent};
use super::file_dialog::DialogService;
use super::helpers::{notify_state, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks::{self, SCAN_BUSY_MESSAGE};
use crate::core::{self, BatchReport, RowRange};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const NOTHING_TO_DELETE_MESSAGE: &str = "Select at least one file or folder to delete.";
pub const NOTHING_TO_REVEAL_MESSAGE: &str = "Select an item to show it in the file manager.";
pub const NOTHING_TO_MOVE_MESSAGE: &str = "Select the files or folders to move.";

/// Sends the initial state to a freshly loaded page.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    tracing::info!("UI initialized.");
    notify_state(&state, &proxy);
}

/// Stores `query` as the current query and starts a search with it.
pub fn search<P: EventProxy>(
    query: String,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Option<JoinHandle<()>> {
    {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if state_guard.is_scanning {
            drop(state_guard);
            proxy.show_info(SCAN_BUSY_MESSAGE);
            return None;
        }
        state_guard.last_query = query;
    }
    tasks::start_search(proxy, state)
}

/// Resolves the selected rows, or tells the user why there is nothing to act on.
fn selection_or_notify<P: EventProxy>(
    ranges: &[RowRange],
    empty_message: &str,
    proxy: &P,
    state: &Arc<Mutex<AppState>>,
) -> Option<Vec<PathBuf>> {
    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    if state_guard.is_scanning {
        drop(state_guard);
        proxy.show_info(SCAN_BUSY_MESSAGE);
        return None;
    }
    let paths = core::selected_paths(&state_guard.results, ranges);
    drop(state_guard);

    if paths.is_empty() {
        proxy.show_info(empty_message);
        return None;
    }
    Some(paths)
}

/// The error text for a batch with failures, one line per failed path.
pub fn failure_message(report: &BatchReport, action: &str) -> Option<String> {
    if report.is_clean() {
        return None;
    }
    let lines: Vec<String> = report
        .failures
        .iter()
        .map(|failure| format!("{} ({})", failure.path.display(), failure.error))
        .collect();
    Some(format!("Could not {action}:\n{}", lines.join("\n")))
}

/// Sends a single error message naming every failed path of a batch.
fn report_failures<P: EventProxy>(report: &BatchReport, action: &str, proxy: &P) {
    if let Some(message) = failure_message(report, action) {
        proxy.show_error(message);
    }
}

/// Deletes the selected rows after confirmation, then refreshes the results.
///
/// Returns the handle of the refresh scan, or `None` if nothing was done.
pub fn delete_selected<P: EventProxy, D: DialogService + ?Sized>(
    ranges: Vec<RowRange>,
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Option<JoinHandle<()>> {
    let paths = selection_or_notify(&ranges, NOTHING_TO_DELETE_MESSAGE, &proxy, &state)?;

    if !dialog.confirm_delete(paths.len()) {
        tracing::info!("User cancelled deletion of {} item(s).", paths.len());
        return None;
    }

    let report = core::delete_paths(&paths);
    report_failures(&report, "delete", &proxy);
    tasks::start_refresh(proxy, state)
}

/// Moves the selected rows into a directory picked by the user, then refreshes the results.
pub fn move_selected<P: EventProxy, D: DialogService + ?Sized>(
    ranges: Vec<RowRange>,
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Option<JoinHandle<()>> {
    let paths = selection_or_notify(&ranges, NOTHING_TO_MOVE_MESSAGE, &proxy, &state)?;

    let Some(destination) = dialog.pick_move_destination() else {
        tracing::info!("User cancelled destination selection.");
        return None;
    };

    let report = core::move_paths(&paths, &destination);
    report_failures(&report, "move", &proxy);
    tasks::start_refresh(proxy, state)
}

/// Opens the file manager at the first selected row.
pub fn reveal_selected<P: EventProxy, D: DialogService + ?Sized>(
    ranges: Vec<RowRange>,
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(paths) = selection_or_notify(&ranges, NOTHING_TO_REVEAL_MESSAGE, &proxy, &state)
    else {
        return;
    };
    let Some(first) = paths.first() else {
        return;
    };

    let target = core::reveal_target(first);
    if let Err(e) = dialog.open_in_file_manager(&target) {
        tracing::warn!("Failed to open {:?} in the file manager: {}", target, e);
        proxy.show_error(format!("Could not open:\n{}", target.display()));
    }
}

/// Lets the user pick a directory for the settings dialog's root list.
///
/// The choice is only sent back to the page; it is committed by [`set_roots`].
pub fn pick_root<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(path) = dialog.pick_root_directory() else {
        tracing::info!("User cancelled root selection.");
        return;
    };
    let row = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
        .propose_root(path);
    proxy.send_event(UserEvent::RootPicked(row));
}

/// Replaces the configured roots and persists them.
pub fn set_roots<P: EventProxy>(roots: Vec<RootRef>, proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        let resolved = s.resolve_roots(&roots);
        s.picked_roots.clear();
        s.config.set_roots(resolved);
        tracing::info!("Search roots updated: {:?}", s.config.roots);
        s.persist_config();
    });
}
