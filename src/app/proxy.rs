//! The channel from background work back to the event loop.

use super::events::UserEvent;
use tao::event_loop::EventLoopProxy;

/// Fire-and-forget delivery of `UserEvent`s to the UI thread.
///
/// Scan tasks and command handlers only see this trait, so tests can swap
/// the event loop for a channel.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);

    /// Pops up an informational message.
    fn show_info(&self, message: impl Into<String>) {
        self.send_event(UserEvent::ShowInfo(message.into()));
    }

    /// Pops up an error message.
    fn show_error(&self, message: impl Into<String>) {
        self.send_event(UserEvent::ShowError(message.into()));
    }
}

impl EventProxy for EventLoopProxy<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // A closed event loop means the window is gone; nothing left to notify.
        if let Err(e) = EventLoopProxy::send_event(self, event) {
            tracing::warn!("Failed to send event to event loop: {}", e);
        }
    }
}
