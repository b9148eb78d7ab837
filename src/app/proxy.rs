//! Defines an abstraction over the event sending mechanism.

use tokio::sync::mpsc::UnboundedSender;

use super::events::UserEvent;

/// A trait that abstracts the sending of user events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// Channel-backed implementation; the embedding shell (or a test) drains the
/// receiver on its own loop.
impl EventProxy for UnboundedSender<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        if let Err(e) = self.send(event) {
            tracing::warn!("Failed to send event to UI channel: {}", e);
        }
    }
}
