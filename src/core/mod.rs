pub mod engine;
pub mod error;
pub mod types;

pub use engine::{EngineNotification, ScanEngine};
pub use error::EngineError;
pub use types::{
    DeleteFailure, DeleteResult, DuplicateGroup, FileRecord, ScanIssue, ScanOptions, ScanPhase,
    ScanProgress, ScanResult,
};
