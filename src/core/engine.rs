//! An abstraction over the external dedup engine to enable testing.
//!
//! The engine owns directory traversal, content hashing and physical
//! deletion. This crate never looks inside it; it only issues the four
//! commands below and consumes the notifications the engine pushes while a
//! scan is running.

use async_trait::async_trait;

use super::error::EngineError;
use super::types::{DeleteResult, ScanOptions, ScanProgress, ScanResult};

/// Defines the command surface of the dedup engine.
///
/// All methods are asynchronous requests whose completion is awaited by the
/// caller without blocking the event loop, so notifications can arrive
/// interleaved with a pending request's resolution.
#[async_trait]
pub trait ScanEngine: Send + Sync + 'static {
    /// Runs a full scan and resolves with the result.
    ///
    /// A scan cancelled mid-flight may resolve with
    /// `Err(EngineError::Cancelled)` instead of producing a `cancelled`
    /// notification; the bridge handles both routes.
    async fn start_scan(&self, options: ScanOptions) -> Result<ScanResult, EngineError>;

    /// Requests cancellation of the running scan. Best-effort; the session
    /// state only changes once the engine confirms.
    async fn cancel_scan(&self) -> Result<(), EngineError>;

    /// Deletes the given files, moving them to trash when `use_trash` is set.
    async fn delete_files(
        &self,
        paths: Vec<String>,
        use_trash: bool,
    ) -> Result<DeleteResult, EngineError>;

    /// Opens the platform folder picker and resolves with the chosen paths
    /// (empty when the user dismissed the dialog).
    async fn select_folders(&self) -> Result<Vec<String>, EngineError>;
}

/// Notifications pushed by the engine while a scan is in flight.
///
/// Delivered to the bridge over an mpsc channel and dispatched serially.
#[derive(Debug, Clone)]
pub enum EngineNotification {
    Progress(ScanProgress),
    Finished(Box<ScanResult>),
    Error(String),
    Cancelled,
}
