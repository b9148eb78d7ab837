//! Responsible for transforming the `SessionState` into a `SessionView`.
//!
//! This module is the presentation layer: every metric the UI shows (wasted
//! space, selection totals, duplicate counts) is recomputed here from a state
//! snapshot on every read. There are no caches to invalidate.

use serde::Serialize;

use crate::core::{DuplicateGroup, ScanIssue, ScanProgress};

use super::options::FilterDraft;
use super::state::{ScanStatus, SessionState};

/// A serializable projection of the session for the UI.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub status: ScanStatus,
    pub progress: ScanProgress,
    pub groups: Vec<DuplicateGroup>,
    pub errors: Vec<ScanIssue>,
    pub error_message: Option<String>,
    pub filter: FilterDraft,
    pub duration_ms: u64,
    pub total_files_scanned: u64,

    // Derived metrics.
    pub group_count: usize,
    pub total_duplicate_files: usize,
    pub total_wasted_space: u64,
    pub selected_files_count: usize,
    pub selected_files_size: u64,
    pub has_selection: bool,
    pub is_scanning: bool,
    pub has_results: bool,
    pub has_errors: bool,
}

/// Creates the complete `SessionView` from the current `SessionState`.
pub fn generate_view(state: &SessionState) -> SessionView {
    let group_count = state.groups.len();
    let selected_files_count = state.selection.len();

    SessionView {
        status: state.status(),
        progress: state.progress.clone(),
        groups: state.groups.clone(),
        errors: state.errors.clone(),
        error_message: state.error_message.clone(),
        filter: state.filter.clone(),
        duration_ms: state.duration_ms,
        total_files_scanned: state.total_files_scanned,
        group_count,
        total_duplicate_files: state.groups.iter().map(|g| g.file_count()).sum(),
        total_wasted_space: total_wasted_space(&state.groups),
        selected_files_count,
        selected_files_size: selected_files_size(state),
        has_selection: selected_files_count > 0,
        is_scanning: state.is_scanning(),
        has_results: state.status() == ScanStatus::Finished && group_count > 0,
        has_errors: !state.errors.is_empty(),
    }
}

/// `Σ over groups of (files.len() − 1) × size`.
pub fn total_wasted_space(groups: &[DuplicateGroup]) -> u64 {
    groups.iter().map(|g| g.wasted_space()).sum()
}

/// Sum of the sizes of all selected files across all groups.
pub fn selected_files_size(state: &SessionState) -> u64 {
    state
        .groups
        .iter()
        .flat_map(|g| g.files.iter())
        .filter(|f| state.selection.contains(&f.path))
        .map(|f| f.size)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::selection;
    use crate::core::{FileRecord, ScanResult};
    use proptest::prelude::*;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord::new(path, size, None)
    }

    fn finished_state() -> SessionState {
        let groups = vec![
            DuplicateGroup::new(
                "abc",
                1000,
                vec![record("/a", 1000), record("/b", 1000)],
            ),
            DuplicateGroup::new(
                "def",
                500,
                vec![record("/c", 500), record("/d", 500), record("/e", 500)],
            ),
        ];
        let mut state = SessionState::default();
        state.begin_scan();
        state.finish(ScanResult::new(groups, 100, vec![], 10));
        state
    }

    #[test]
    fn wasted_space_matches_the_reference_scenario() {
        // {1000, 2 files} + {500, 3 files} => 1*1000 + 2*500 = 2000
        let state = finished_state();
        assert_eq!(generate_view(&state).total_wasted_space, 2000);
    }

    #[test]
    fn wasted_space_of_no_groups_is_zero() {
        assert_eq!(total_wasted_space(&[]), 0);
    }

    #[test]
    fn selection_metrics_follow_the_selection() {
        let mut state = finished_state();
        let empty = generate_view(&state);
        assert_eq!(empty.selected_files_count, 0);
        assert_eq!(empty.selected_files_size, 0);
        assert!(!empty.has_selection);

        selection::toggle(&mut state, "/b");
        selection::toggle(&mut state, "/d");
        selection::toggle(&mut state, "/e");

        let view = generate_view(&state);
        assert_eq!(view.selected_files_count, 3);
        assert_eq!(view.selected_files_size, 1000 + 500 + 500);
        assert!(view.has_selection);
    }

    #[test]
    fn has_results_requires_finished_status_and_groups() {
        let state = finished_state();
        assert!(generate_view(&state).has_results);

        let mut empty = SessionState::default();
        empty.begin_scan();
        empty.finish(ScanResult::new(vec![], 100, vec![], 10));
        assert!(!generate_view(&empty).has_results);

        let mut scanning = SessionState::default();
        scanning.begin_scan();
        let view = generate_view(&scanning);
        assert!(view.is_scanning);
        assert!(!view.has_results);
    }

    #[test]
    fn counts_cover_all_groups() {
        let view = generate_view(&finished_state());
        assert_eq!(view.group_count, 2);
        assert_eq!(view.total_duplicate_files, 5);
    }

    #[test]
    fn view_serializes_camel_case() {
        let json = serde_json::to_string(&generate_view(&finished_state())).unwrap();
        assert!(json.contains("totalWastedSpace"));
        assert!(json.contains("selectedFilesCount"));
        assert!(json.contains("hasResults"));
    }

    proptest! {
        #[test]
        fn wasted_space_law_holds_for_arbitrary_groups(
            sizes in prop::collection::vec((1u64..10_000, 0usize..6), 0..8)
        ) {
            let groups: Vec<DuplicateGroup> = sizes
                .iter()
                .enumerate()
                .map(|(i, &(size, n))| {
                    let files = (0..n).map(|f| record(&format!("/g{i}/f{f}"), size)).collect();
                    DuplicateGroup::new(format!("h{i}"), size, files)
                })
                .collect();

            let expected: u64 = groups
                .iter()
                .map(|g| (g.files.len().saturating_sub(1) as u64) * g.size)
                .sum();
            prop_assert_eq!(total_wasted_space(&groups), expected);
        }
    }
}
