//! Defines the event and message structures for communication between the backend and frontend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::view_model::{RootRow, UiState};
use crate::core::{RowRange, ScanProgress};

/// Events sent from the Rust backend to the WebView (UI thread).
///
/// Each variant corresponds to a specific JavaScript function (`window.*`)
/// that will be called in the frontend.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the UI.
    StateUpdate(Box<UiState>),
    /// Running counters of the scan in flight, sent every few hundred entries.
    ScanProgress(ScanProgress),
    /// An informational message box.
    ShowInfo(String),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// A directory chosen in the native picker for the settings dialog.
    RootPicked(RootRow),
}

/// A message received from the WebView via the IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Deserialize, Debug)]
pub struct SearchPayload {
    pub query: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct SelectionPayload {
    #[serde(default)]
    pub ranges: Vec<RowRange>,
}

/// Names a root the backend already holds, so the exact path survives the
/// round trip through the page even when it is not valid UTF-8.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RootId {
    /// Index into the configured root list.
    Configured(usize),
    /// Index into the roots picked since the settings were last committed.
    Picked(usize),
}

/// One entry of the list sent by the settings dialog.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RootRef {
    Id(RootId),
    Path(PathBuf),
}

#[derive(Deserialize, Debug)]
pub struct RootsPayload {
    pub roots: Vec<RootRef>,
}
