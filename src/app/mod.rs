//! The session layer: state machine, selection model, derived metrics and
//! the bridge to the external dedup engine.

pub mod bridge;
pub mod commands;
pub mod events;
pub mod helpers;
pub mod options;
pub mod proxy;
pub mod selection;
pub mod state;
pub mod view_model;

use std::sync::{Arc, Mutex};

use events::IpcMessage;
use proxy::EventProxy;
use state::SessionState;

use crate::core::ScanEngine;

/// Parses a raw IPC message from the UI shell and dispatches it to the
/// matching command handler.
pub fn handle_ipc_message<E: ScanEngine, P: EventProxy>(
    message: String,
    engine: Arc<E>,
    proxy: P,
    state: Arc<Mutex<SessionState>>,
) {
    let message: IpcMessage = match serde_json::from_str(&message) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message: {}", e);
            return;
        }
    };

    tracing::debug!(command = %message.command, "IPC command received");

    match message.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "refresh" => commands::refresh(proxy, state),
        "startScan" => commands::start_scan(engine, proxy, state),
        "cancelScan" => commands::cancel_scan(engine, proxy, state),
        "deleteSelected" => commands::delete_selected(engine, proxy, state),
        "selectFolders" => commands::select_folders(engine, proxy, state),
        "removeFolder" => commands::remove_folder(message.payload, proxy, state),
        "updateFilter" => commands::update_filter(message.payload, proxy, state),
        "updateConfig" => commands::update_config(message.payload, proxy, state),
        "toggleSelection" => commands::toggle_selection(message.payload, proxy, state),
        "selectGroup" => commands::select_group(message.payload, proxy, state),
        "selectAllDuplicates" => commands::select_all_duplicates(proxy, state),
        "clearGroupSelection" => commands::clear_group_selection(message.payload, proxy, state),
        "clearSelection" => commands::clear_selection(proxy, state),
        "dismissErrors" => commands::dismiss_errors(proxy, state),
        "resetSession" => commands::reset_session(proxy, state),
        other => {
            tracing::warn!("Unknown IPC command: {}", other);
        }
    }
}
