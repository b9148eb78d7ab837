//! Defines the event and message structures for communication with the UI shell.

use serde::Deserialize;

use crate::core::DeleteResult;

use super::view_model::SessionView;

/// Events sent from the session core to the UI layer.
///
/// Fire-and-forget; the UI re-renders from the carried view.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete session snapshot to re-render from.
    StateUpdate(Box<SessionView>),
    /// Outcome of a deletion batch, including per-path failures.
    DeleteComplete(DeleteResult),
    /// A message for the user that is not part of the session state proper
    /// (e.g. a failed folder picker request).
    ShowError(String),
}

/// A message received from the UI shell via its IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
