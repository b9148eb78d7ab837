//! Wire-level data model shared with the dedup engine and the UI layer.
//!
//! Everything here crosses a JSON boundary, so all types serialize with
//! camelCase field names.

use serde::{Deserialize, Serialize};

/// A single file as reported by the engine. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Absolute path; the unique key for this file within a session.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Last modification time as an ISO 8601 string, if the engine had it.
    #[serde(default)]
    pub modified: Option<String>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, size: u64, modified: Option<String>) -> Self {
        Self {
            path: path.into(),
            size,
            modified,
        }
    }
}

/// A group of files sharing identical content, keyed by content hash.
///
/// `files` is ordered: position 0 is the conventional "keep" candidate.
/// Groups are only ever produced with at least two files; a group that drops
/// below two files after deletions is no longer a duplicate group and is
/// removed from session state entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub content_hash: String,
    /// Size of each file in the group, in bytes.
    pub size: u64,
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    pub fn new(content_hash: impl Into<String>, size: u64, files: Vec<FileRecord>) -> Self {
        Self {
            content_hash: content_hash.into(),
            size,
            files,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Space recoverable by keeping only one copy: `(count - 1) * size`.
    pub fn wasted_space(&self) -> u64 {
        (self.files.len().saturating_sub(1) as u64) * self.size
    }
}

/// Phases reported by the engine over the lifetime of one scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScanPhase {
    Counting,
    Grouping,
    Hashing,
    Finalizing,
    Complete,
    Cancelled,
}

/// Progress snapshot for an ongoing scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    pub files_scanned: u64,
    #[serde(default)]
    pub files_total: Option<u64>,
    pub current_phase: ScanPhase,
    /// Optional human-readable detail (e.g. the path currently hashed).
    #[serde(default)]
    pub message: Option<String>,
}

impl ScanProgress {
    pub fn new(files_scanned: u64, files_total: Option<u64>, current_phase: ScanPhase) -> Self {
        Self {
            files_scanned,
            files_total,
            current_phase,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Options handed to the engine when starting a scan.
///
/// Produced exclusively by `app::options::FilterDraft::derive`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    pub root_paths: Vec<String>,
    /// Minimum file size in bytes; `None` means no size filter.
    #[serde(default)]
    pub min_file_size: Option<u64>,
    /// Only include these extensions (lowercase, no leading dot).
    #[serde(default)]
    pub include_extensions: Option<Vec<String>>,
    /// Exclude these extensions; mutually exclusive with `include_extensions`.
    #[serde(default)]
    pub exclude_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// A non-fatal per-file error accumulated during a scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanIssue {
    pub path: String,
    pub message: String,
}

impl ScanIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The final payload of a successful scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub total_files_scanned: u64,
    pub total_duplicates_found: u64,
    pub total_wasted_space: u64,
    pub errors: Vec<ScanIssue>,
    pub duration_ms: u64,
}

impl ScanResult {
    /// Builds a result, deriving the duplicate and wasted-space totals from
    /// the groups.
    pub fn new(
        duplicate_groups: Vec<DuplicateGroup>,
        total_files_scanned: u64,
        errors: Vec<ScanIssue>,
        duration_ms: u64,
    ) -> Self {
        let total_duplicates_found = duplicate_groups
            .iter()
            .map(|g| g.file_count() as u64)
            .sum();
        let total_wasted_space = duplicate_groups.iter().map(|g| g.wasted_space()).sum();
        Self {
            duplicate_groups,
            total_files_scanned,
            total_duplicates_found,
            total_wasted_space,
            errors,
            duration_ms,
        }
    }
}

/// Outcome of a batch deletion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Paths that were actually removed (or moved to trash).
    pub deleted: Vec<String>,
    pub failed: Vec<DeleteFailure>,
}

impl DeleteResult {
    pub fn new(deleted: Vec<String>, failed: Vec<DeleteFailure>) -> Self {
        Self { deleted, failed }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Per-path reason for a failed deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFailure {
    pub path: String,
    pub reason: String,
}

impl DeleteFailure {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
