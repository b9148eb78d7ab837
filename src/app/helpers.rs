//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::SessionState;
use super::view_model::generate_view;

/// Locks the `SessionState`, performs a mutation, and then automatically
/// sends a `StateUpdate` event to the UI.
pub fn with_state_and_notify<F, P: EventProxy>(
    state: &Arc<Mutex<SessionState>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut SessionState),
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    update_fn(&mut state_guard);

    let view = generate_view(&state_guard);
    proxy.send_event(UserEvent::StateUpdate(Box::new(view)));
}
