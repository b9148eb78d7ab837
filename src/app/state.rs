//! Defines the central, mutable state of a scan session.
//!
//! `SessionState` is the single authoritative record of scan status,
//! progress, results, errors and the user's deletion selection. It is created
//! once at startup, wrapped in an `Arc<Mutex<...>>`, mutated only through the
//! operations below, and reset in place rather than reallocated.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::{settings, AppConfig};
use crate::core::{DuplicateGroup, ScanIssue, ScanPhase, ScanProgress, ScanResult};

use super::options::FilterDraft;

/// Lifecycle of one scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanStatus {
    Idle,
    Scanning,
    Finished,
    Cancelled,
    Error,
}

/// Holds the complete, mutable state of the scan session.
///
/// Every operation that leaves the `Scanning` state clears the bridge's
/// cancel guard, and every notification-driven operation is gated on the
/// current status so that stragglers from a dead session are discarded.
pub struct SessionState {
    /// Persisted user preferences.
    pub config: AppConfig,
    /// Where `config` is persisted. `None` disables persistence (no
    /// resolvable platform config directory).
    pub config_path: Option<PathBuf>,
    /// Raw user filter input; survives `reset()` so the user keeps their form.
    pub filter: FilterDraft,
    status: ScanStatus,
    /// Progress of the current or most recent scan.
    pub progress: ScanProgress,
    /// Duplicate groups from the last completed scan, unique by content hash.
    pub groups: Vec<DuplicateGroup>,
    /// Non-fatal per-file errors accumulated by the last completed scan.
    pub errors: Vec<ScanIssue>,
    /// Paths currently marked for deletion. Invariant: every entry exists in
    /// some `groups[i].files`.
    pub selection: HashSet<String>,
    /// Valid only when the status is `Finished`.
    pub duration_ms: u64,
    /// Valid only when the status is `Finished`.
    pub total_files_scanned: u64,
    /// Valid only when the status is `Error`.
    pub error_message: Option<String>,
    /// `true` while a cancel request is outstanding at the engine.
    pub cancel_pending: bool,
}

fn initial_progress() -> ScanProgress {
    ScanProgress::new(0, None, ScanPhase::Counting)
}

impl Default for SessionState {
    fn default() -> Self {
        let config_path = settings::get_config_file_path();
        let config = match &config_path {
            Some(path) => settings::load_config_from(path).unwrap_or_default(),
            None => AppConfig::default(),
        };
        Self {
            config,
            config_path,
            filter: FilterDraft::default(),
            status: ScanStatus::Idle,
            progress: initial_progress(),
            groups: Vec::new(),
            errors: Vec::new(),
            selection: HashSet::new(),
            duration_ms: 0,
            total_files_scanned: 0,
            error_message: None,
            cancel_pending: false,
        }
    }
}

impl SessionState {
    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn is_scanning(&self) -> bool {
        self.status == ScanStatus::Scanning
    }

    /// Starts a new session.
    ///
    /// Clears all results and the selection *synchronously*, before the
    /// engine command is even issued, so a straggling notification from a
    /// previous session can never be misapplied to the new one. Returns
    /// `false` (and changes nothing) if a scan is already running.
    pub fn begin_scan(&mut self) -> bool {
        if self.status == ScanStatus::Scanning {
            tracing::warn!("begin_scan called while a scan is already running; ignoring");
            return false;
        }
        self.status = ScanStatus::Scanning;
        self.groups.clear();
        self.errors.clear();
        self.selection.clear();
        self.error_message = None;
        self.duration_ms = 0;
        self.total_files_scanned = 0;
        self.progress = initial_progress();
        self.cancel_pending = false;
        true
    }

    /// Overwrites the progress snapshot. Discarded once the session has left
    /// the `Scanning` state.
    pub fn apply_progress(&mut self, progress: ScanProgress) {
        if self.status != ScanStatus::Scanning {
            tracing::debug!("discarding progress notification for a finished session");
            return;
        }
        self.progress = progress;
    }

    /// Transitions to `Finished` with the engine's result. Ignored unless the
    /// session is still scanning (e.g. a `finished` notification racing a
    /// cancellation that already won).
    pub fn finish(&mut self, result: ScanResult) {
        if self.status != ScanStatus::Scanning {
            tracing::debug!("discarding finished notification for a terminal session");
            return;
        }
        self.status = ScanStatus::Finished;
        self.duration_ms = result.duration_ms;
        self.total_files_scanned = result.total_files_scanned;
        self.groups = result.duplicate_groups;
        self.errors = result.errors;
        self.progress = ScanProgress::new(
            result.total_files_scanned,
            Some(result.total_files_scanned),
            ScanPhase::Complete,
        );
        self.cancel_pending = false;
        tracing::info!(
            groups = self.groups.len(),
            duration_ms = self.duration_ms,
            "scan finished"
        );
    }

    /// Transitions to `Cancelled`. Leaves `groups` untouched (they are empty,
    /// since no result arrived for this session).
    pub fn mark_cancelled(&mut self) {
        if self.status != ScanStatus::Scanning {
            tracing::debug!("discarding cancelled notification for a terminal session");
            return;
        }
        self.status = ScanStatus::Cancelled;
        self.progress.current_phase = ScanPhase::Cancelled;
        self.cancel_pending = false;
        tracing::info!("scan cancelled");
    }

    /// Transitions to `Error` with a fatal session error. `groups` and
    /// `errors` stay as they are.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status != ScanStatus::Scanning {
            tracing::debug!("discarding error notification for a terminal session");
            return;
        }
        let message = message.into();
        tracing::error!(error = %message, "scan failed");
        self.status = ScanStatus::Error;
        self.error_message = Some(message);
        self.cancel_pending = false;
    }

    /// Clears the accumulated non-fatal errors without touching the status.
    pub fn dismiss_errors(&mut self) {
        self.errors.clear();
    }

    /// Returns the session to the idle/empty configuration. Permitted from
    /// any state; the filter draft is preserved.
    pub fn reset(&mut self) {
        self.status = ScanStatus::Idle;
        self.groups.clear();
        self.errors.clear();
        self.selection.clear();
        self.error_message = None;
        self.duration_ms = 0;
        self.total_files_scanned = 0;
        self.progress = initial_progress();
        self.cancel_pending = false;
    }

    /// Looks up a group by its content hash.
    pub fn group(&self, content_hash: &str) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| g.content_hash == content_hash)
    }

    /// Writes the current config to its persisted location, if one exists.
    /// A write failure is logged, never fatal.
    pub fn persist_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = settings::save_config_to(&self.config, path) {
            tracing::warn!("Failed to save config to {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DuplicateGroup, FileRecord};

    fn finished_result() -> ScanResult {
        let groups = vec![DuplicateGroup::new(
            "abc",
            1000,
            vec![
                FileRecord::new("/a", 1000, None),
                FileRecord::new("/b", 1000, None),
            ],
        )];
        ScanResult::new(groups, 50, vec![ScanIssue::new("/locked", "denied")], 120)
    }

    #[test]
    fn initial_state_is_idle_and_empty() {
        let state = SessionState::default();
        assert_eq!(state.status(), ScanStatus::Idle);
        assert!(state.groups.is_empty());
        assert!(state.selection.is_empty());
        assert_eq!(state.progress.current_phase, ScanPhase::Counting);
    }

    #[test]
    fn begin_scan_clears_previous_results() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.finish(finished_result());
        state.selection.insert("/b".to_string());

        assert!(state.begin_scan());
        assert_eq!(state.status(), ScanStatus::Scanning);
        assert!(state.groups.is_empty());
        assert!(state.selection.is_empty());
        assert!(state.errors.is_empty());
        assert_eq!(state.progress.files_scanned, 0);
    }

    #[test]
    fn begin_scan_rejected_while_scanning() {
        let mut state = SessionState::default();
        assert!(state.begin_scan());
        assert!(!state.begin_scan());
        assert_eq!(state.status(), ScanStatus::Scanning);
    }

    #[test]
    fn finish_populates_results_and_progress() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.finish(finished_result());

        assert_eq!(state.status(), ScanStatus::Finished);
        assert_eq!(state.groups.len(), 1);
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.duration_ms, 120);
        assert_eq!(state.total_files_scanned, 50);
        assert_eq!(state.progress.current_phase, ScanPhase::Complete);
        assert_eq!(state.progress.files_scanned, 50);
        assert_eq!(state.progress.files_total, Some(50));
    }

    #[test]
    fn finished_after_cancel_is_discarded() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.mark_cancelled();
        state.finish(finished_result());

        assert_eq!(state.status(), ScanStatus::Cancelled);
        assert!(state.groups.is_empty());
    }

    #[test]
    fn progress_after_terminal_transition_is_discarded() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.mark_cancelled();
        state.apply_progress(ScanProgress::new(10, Some(20), ScanPhase::Hashing));

        assert_eq!(state.status(), ScanStatus::Cancelled);
        assert_eq!(state.progress.current_phase, ScanPhase::Cancelled);
    }

    #[test]
    fn fail_records_message_and_keeps_collections() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.fail("disk on fire");

        assert_eq!(state.status(), ScanStatus::Error);
        assert_eq!(state.error_message.as_deref(), Some("disk on fire"));
        assert!(state.groups.is_empty());
    }

    #[test]
    fn dismiss_errors_does_not_change_status() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.finish(finished_result());
        state.dismiss_errors();

        assert!(state.errors.is_empty());
        assert_eq!(state.status(), ScanStatus::Finished);
        assert_eq!(state.groups.len(), 1);
    }

    #[test]
    fn reset_returns_to_idle_and_keeps_filter() {
        let mut state = SessionState::default();
        state.filter.add_folders(vec!["/data".to_string()]);
        state.begin_scan();
        state.finish(finished_result());

        state.reset();

        assert_eq!(state.status(), ScanStatus::Idle);
        assert!(state.groups.is_empty());
        assert_eq!(state.filter.folders, vec!["/data".to_string()]);
    }

    #[test]
    fn persist_config_writes_to_the_configured_path() {
        let temp = tempfile::tempdir().unwrap();
        let mut state = SessionState::default();
        state.config_path = Some(temp.path().join("config.json"));
        state.config.last_folders = vec!["/data".to_string()];

        state.persist_config();

        let loaded = settings::load_config_from(state.config_path.as_ref().unwrap()).unwrap();
        assert_eq!(loaded.last_folders, vec!["/data".to_string()]);
    }

    #[test]
    fn persist_config_without_a_path_is_a_noop() {
        let mut state = SessionState::default();
        state.config_path = None;
        state.persist_config();
    }

    #[test]
    fn terminal_transitions_clear_cancel_guard() {
        let mut state = SessionState::default();
        state.begin_scan();
        state.cancel_pending = true;
        state.mark_cancelled();
        assert!(!state.cancel_pending);

        state.reset();
        state.begin_scan();
        state.cancel_pending = true;
        state.fail("boom");
        assert!(!state.cancel_pending);
    }
}
