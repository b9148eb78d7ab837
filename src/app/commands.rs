//! Contains all the command handlers that are callable from the UI shell.
//!
//! Each function corresponds to a specific `IpcMessage::command`. Handlers
//! interact with the `SessionState` and the engine bridge, and send
//! `UserEvent`s back to the UI. Selection and filter handlers are synchronous
//! state mutations; everything touching the engine delegates to `bridge`.

use std::sync::{Arc, Mutex};

use super::bridge;
use super::events::UserEvent;
use super::helpers::with_state_and_notify;
use super::options::FilterDraft;
use super::proxy::EventProxy;
use super::selection;
use super::state::SessionState;
use super::view_model::generate_view;
use crate::config::AppConfig;
use crate::core::ScanEngine;

/// Handles the initial request for state from the UI when it loads.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        if s.filter.folders.is_empty() && !s.config.last_folders.is_empty() {
            let folders = s.config.last_folders.clone();
            s.filter.add_folders(folders);
        }
    });
}

/// Starts a scan with options derived from the current filter draft.
pub fn start_scan<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    bridge::start_scan(engine, proxy, state);
}

/// Requests cancellation of the running scan.
pub fn cancel_scan<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    bridge::cancel_scan(engine, proxy, state);
}

/// Deletes the files currently marked for deletion.
pub fn delete_selected<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    bridge::delete_selected(engine, proxy, state);
}

/// Opens the folder picker and appends the chosen folders to the filter.
pub fn select_folders<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    bridge::pick_folders(engine, proxy, state);
}

/// Removes one folder from the filter draft.
pub fn remove_folder<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    if let Ok(path) = serde_json::from_value::<String>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            s.filter.remove_folder(&path);
        });
    } else {
        tracing::warn!(
            "Failed to deserialize path string from payload: {:?}",
            payload
        );
    }
}

/// Replaces the filter draft with the one the UI sent.
pub fn update_filter<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    if let Ok(draft) = serde_json::from_value::<FilterDraft>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            s.filter = draft;
        });
    } else {
        tracing::warn!("Failed to deserialize FilterDraft from payload: {:?}", payload);
    }
}

/// Updates the persisted preferences.
pub fn update_config<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    if let Ok(new_config) = serde_json::from_value::<AppConfig>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            s.config = new_config;
            s.persist_config();
        });
    } else {
        tracing::warn!("Failed to deserialize AppConfig from payload: {:?}", payload);
    }
}

/// Toggles the deletion mark on a single file.
pub fn toggle_selection<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    if let Ok(path) = serde_json::from_value::<String>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            selection::toggle(s, &path);
        });
    } else {
        tracing::warn!(
            "Failed to deserialize path string from payload: {:?}",
            payload
        );
    }
}

/// Marks every file of one group except its keep candidate.
pub fn select_group<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    if let Ok(content_hash) = serde_json::from_value::<String>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            selection::select_all_but_one(s, &content_hash);
        });
    } else {
        tracing::warn!(
            "Failed to deserialize hash string from payload: {:?}",
            payload
        );
    }
}

/// Marks all duplicates across all groups, sparing each keep candidate.
pub fn select_all_duplicates<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, selection::select_all_duplicates);
}

/// Unmarks every file of one group.
pub fn clear_group_selection<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    if let Ok(content_hash) = serde_json::from_value::<String>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            selection::clear_group_selection(s, &content_hash);
        });
    } else {
        tracing::warn!(
            "Failed to deserialize hash string from payload: {:?}",
            payload
        );
    }
}

/// Unmarks everything.
pub fn clear_selection<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, selection::clear_all_selections);
}

/// Dismisses the accumulated non-fatal scan errors.
pub fn dismiss_errors<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, |s| s.dismiss_errors());
}

/// Returns the session to the idle/empty configuration.
pub fn reset_session<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    with_state_and_notify(&state, &proxy, |s| s.reset());
}

/// Sends a fresh snapshot without mutating anything.
pub fn refresh<P: EventProxy>(proxy: P, state: Arc<Mutex<SessionState>>) {
    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    proxy.send_event(UserEvent::StateUpdate(Box::new(generate_view(
        &state_guard,
    ))));
}
