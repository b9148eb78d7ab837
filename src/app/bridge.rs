//! The boundary adapter between the session state and the dedup engine.
//!
//! Commands are issued here as spawned tokio tasks; notifications arrive over
//! an mpsc channel and are dispatched serially. Each state mutation takes the
//! session lock for the duration of the update only, never across an await
//! point.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::core::{EngineError, EngineNotification, ScanEngine};

use super::events::UserEvent;
use super::helpers::with_state_and_notify;
use super::proxy::EventProxy;
use super::selection;
use super::state::SessionState;
use super::view_model::generate_view;

/// Starts a new scan session.
///
/// The transition to `Scanning` (and the clearing of all previous results)
/// happens synchronously, before the engine command is issued, so that a
/// notification still in flight from a previous session cannot be misapplied
/// to this one. The engine's resolution is routed by its tagged outcome:
/// `Ok` finishes the session, `Cancelled` marks it cancelled, `Failed` fails
/// it. A straggling terminal notification that already won the race makes the
/// corresponding state operation a no-op.
pub fn start_scan<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    let options = {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");

        if state_guard.filter.folders.is_empty() {
            proxy.send_event(UserEvent::ShowError(
                "Add at least one folder to scan.".to_string(),
            ));
            return;
        }
        if !state_guard.begin_scan() {
            return;
        }

        state_guard.config.last_folders = state_guard.filter.folders.clone();
        state_guard.persist_config();

        let view = generate_view(&state_guard);
        proxy.send_event(UserEvent::StateUpdate(Box::new(view)));
        state_guard.filter.derive()
    };

    tracing::info!(roots = options.root_paths.len(), "starting scan");

    let state_clone = state.clone();
    tokio::spawn(async move {
        let outcome = engine.start_scan(options).await;
        let mut state_guard = state_clone
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        match outcome {
            Ok(result) => state_guard.finish(result),
            Err(EngineError::Cancelled) => state_guard.mark_cancelled(),
            Err(EngineError::Failed(message)) => state_guard.fail(message),
        }
        let view = generate_view(&state_guard);
        proxy.send_event(UserEvent::StateUpdate(Box::new(view)));
    });
}

/// Requests cancellation of the running scan.
///
/// A second invocation while one request is outstanding is a no-op; the guard
/// is cleared when a terminal transition fires (or immediately, if the cancel
/// request itself fails, so the user can retry). Cancellation is best-effort:
/// the session state only changes once the engine confirms.
pub fn cancel_scan<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    _proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if !state_guard.is_scanning() {
            tracing::warn!("cancel requested but no scan is running");
            return;
        }
        if state_guard.cancel_pending {
            tracing::debug!("cancel already pending; ignoring duplicate request");
            return;
        }
        state_guard.cancel_pending = true;
    }

    let state_clone = state.clone();
    tokio::spawn(async move {
        if let Err(e) = engine.cancel_scan().await {
            tracing::warn!("cancel request failed: {}", e);
            let mut state_guard = state_clone
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            state_guard.cancel_pending = false;
        }
    });
}

/// Deletes the currently selected files through the engine.
///
/// Files the engine reports as deleted are pruned from the groups and the
/// selection even when other paths in the same batch failed; per-path
/// failures are surfaced via `DeleteComplete`.
pub fn delete_selected<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    let (paths, use_trash) = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        let mut paths: Vec<String> = state_guard.selection.iter().cloned().collect();
        paths.sort();
        (paths, state_guard.config.use_trash)
    };

    if paths.is_empty() {
        tracing::debug!("delete requested with an empty selection; nothing to do");
        return;
    }

    tracing::info!(count = paths.len(), use_trash, "deleting selected files");

    let state_clone = state.clone();
    tokio::spawn(async move {
        match engine.delete_files(paths, use_trash).await {
            Ok(result) => {
                proxy.send_event(UserEvent::DeleteComplete(result.clone()));
                with_state_and_notify(&state_clone, &proxy, |s| {
                    selection::remove_deleted_files(s, &result.deleted);
                });
            }
            Err(e) => {
                proxy.send_event(UserEvent::ShowError(format!("Deletion failed: {e}")));
            }
        }
    });
}

/// Opens the engine's folder picker and appends the chosen paths to the
/// filter draft, deduplicated.
pub fn pick_folders<E: ScanEngine, P: EventProxy>(
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    tokio::spawn(async move {
        match engine.select_folders().await {
            Ok(paths) if paths.is_empty() => {
                tracing::debug!("folder selection dismissed");
            }
            Ok(paths) => {
                with_state_and_notify(&state, &proxy, |s| {
                    let added = s.filter.add_folders(paths);
                    tracing::info!(added, "folders added to filter");
                });
            }
            Err(e) => {
                proxy.send_event(UserEvent::ShowError(format!(
                    "Folder selection failed: {e}"
                )));
            }
        }
    });
}

/// Applies one engine notification to the session.
///
/// The state operations are status-gated, so anything arriving after the
/// session left `Scanning` changes nothing; the UI still receives a snapshot.
pub fn apply_notification<P: EventProxy>(
    notification: EngineNotification,
    state: &Arc<Mutex<SessionState>>,
    proxy: &P,
) {
    match notification {
        EngineNotification::Progress(progress) => {
            with_state_and_notify(state, proxy, |s| s.apply_progress(progress));
        }
        EngineNotification::Finished(result) => {
            with_state_and_notify(state, proxy, |s| s.finish(*result));
        }
        EngineNotification::Error(message) => {
            with_state_and_notify(state, proxy, |s| s.fail(message));
        }
        EngineNotification::Cancelled => {
            with_state_and_notify(state, proxy, |s| s.mark_cancelled());
        }
    }
}

/// Drains engine notifications serially until the channel closes.
pub fn spawn_notification_pump<P: EventProxy>(
    mut notifications: UnboundedReceiver<EngineNotification>,
    state: Arc<Mutex<SessionState>>,
    proxy: P,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            apply_notification(notification, &state, &proxy);
        }
        tracing::debug!("engine notification channel closed");
    })
}
