//! Defines the error type for the engine boundary.

use thiserror::Error;

/// Failure of an engine request.
///
/// Cancellation is modeled as its own variant rather than inferred from the
/// message text: some engines report a user cancellation as a rejected
/// in-flight request instead of a distinct notification, and the bridge must
/// route that to the cancelled state, not the error state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request was aborted because the user cancelled the scan.
    #[error("operation was cancelled by the user")]
    Cancelled,

    /// The engine rejected or failed the request.
    #[error("{0}")]
    Failed(String),
}

impl EngineError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
