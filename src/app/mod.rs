//! The application layer: IPC dispatch, shared state and the bridge back to the webview.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use events::{IpcMessage, RootsPayload, SearchPayload, SelectionPayload, UserEvent};
use file_dialog::DialogService;
use proxy::EventProxy;
use state::AppState;

fn parse_payload<T: DeserializeOwned>(command: &str, payload: serde_json::Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Invalid payload for '{}': {}", command, e);
            None
        }
    }
}

/// Parses a message posted by the page and runs the matching command.
///
/// Commands that start a scan return immediately; the scan reports back
/// through `proxy`.
pub fn handle_ipc_message<P, D>(
    message: String,
    dialog: Arc<D>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) where
    P: EventProxy,
    D: DialogService + ?Sized,
{
    let msg: IpcMessage = match serde_json::from_str(&message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message: {} ({})", e, message);
            return;
        }
    };
    tracing::debug!("IPC command: {}", msg.command);

    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "search" => {
            if let Some(p) = parse_payload::<SearchPayload>(&msg.command, msg.payload) {
                commands::search(p.query, proxy, state);
            }
        }
        "deleteSelected" => {
            if let Some(p) = parse_payload::<SelectionPayload>(&msg.command, msg.payload) {
                commands::delete_selected(p.ranges, &*dialog, proxy, state);
            }
        }
        "moveSelected" => {
            if let Some(p) = parse_payload::<SelectionPayload>(&msg.command, msg.payload) {
                commands::move_selected(p.ranges, &*dialog, proxy, state);
            }
        }
        "revealSelected" => {
            if let Some(p) = parse_payload::<SelectionPayload>(&msg.command, msg.payload) {
                commands::reveal_selected(p.ranges, &*dialog, proxy, state);
            }
        }
        "pickRoot" => commands::pick_root(&*dialog, proxy, state),
        "setRoots" => {
            if let Some(p) = parse_payload::<RootsPayload>(&msg.command, msg.payload) {
                commands::set_roots(p.roots, proxy, state);
            }
        }
        unknown => tracing::warn!("Unknown IPC command: {}", unknown),
    }
}

fn script_call<T: Serialize + ?Sized>(function: &str, argument: &T) -> Option<String> {
    match serde_json::to_string(argument) {
        Ok(json) => Some(format!("window.{function}({json});")),
        Err(e) => {
            tracing::error!("Failed to serialize argument for {}: {}", function, e);
            None
        }
    }
}

/// Builds the script that delivers `event` to the page.
pub fn event_script(event: &UserEvent) -> Option<String> {
    match event {
        UserEvent::StateUpdate(ui_state) => script_call("render", ui_state.as_ref()),
        UserEvent::ScanProgress(progress) => script_call("showProgress", progress),
        UserEvent::ShowInfo(message) => script_call("showInfo", message),
        UserEvent::ShowError(message) => script_call("showError", message),
        UserEvent::RootPicked(row) => script_call("onRootPicked", row),
    }
}

/// Forwards a `UserEvent` from the event loop to the webview.
pub fn handle_user_event(event: UserEvent, webview: &wry::WebView) {
    let Some(script) = event_script(&event) else {
        return;
    };
    if let Err(e) = webview.evaluate_script(&script) {
        tracing::error!("Failed to evaluate script: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::events::{RootId, RootRef};
    use super::view_model::RootRow;
    use crate::core::ScanProgress;
    use std::path::Path;

    #[test]
    fn test_progress_script() {
        let script = event_script(&UserEvent::ScanProgress(ScanProgress {
            examined: 500,
            matches: 3,
        }))
        .unwrap();
        insta::assert_snapshot!(script, @r#"window.showProgress({"examined":500,"matches":3});"#);
    }

    #[test]
    fn test_messages_are_escaped() {
        let script = event_script(&UserEvent::ShowError(
            "Could not delete:\n\"a\".txt".to_string(),
        ))
        .unwrap();
        insta::assert_snapshot!(script, @r#"window.showError("Could not delete:\n\"a\".txt");"#);
    }

    #[test]
    fn test_root_picked_script() {
        let row = RootRow::new(Path::new("/data"), RootId::Picked(2));
        let script = event_script(&UserEvent::RootPicked(row)).unwrap();
        insta::assert_snapshot!(
            script,
            @r#"window.onRootPicked({"display":"/data","id":{"picked":2}});"#
        );
    }

    #[test]
    fn test_roots_payload_accepts_ids_and_paths() {
        let payload: RootsPayload = serde_json::from_value(serde_json::json!({
            "roots": [{ "configured": 0 }, { "picked": 1 }, "/typed"]
        }))
        .unwrap();
        assert_eq!(
            payload.roots,
            vec![
                RootRef::Id(RootId::Configured(0)),
                RootRef::Id(RootId::Picked(1)),
                RootRef::Path("/typed".into()),
            ]
        );
    }
}
