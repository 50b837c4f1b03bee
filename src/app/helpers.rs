//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;

/// Locks the `AppState`, performs a mutation, and then sends a `StateUpdate`
/// event to the UI.
pub fn with_state_and_notify<F, P: EventProxy>(
    state: &Arc<Mutex<AppState>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut AppState),
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    update_fn(&mut state_guard);

    let ui_state = generate_ui_state(&state_guard);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}

/// Sends the current state to the UI without changing it.
pub fn notify_state<P: EventProxy>(state: &Arc<Mutex<AppState>>, proxy: &P) {
    with_state_and_notify(state, proxy, |_| {});
}
