//! This module mutates the deletion selection of a `SessionState`.
//!
//! It enforces the two selection invariants: every selected path exists in
//! some group, and no stored group ever has fewer than two files. Presentation
//! of the selection is left to `view_model`.

use std::collections::HashSet;

use super::state::SessionState;

/// Inserts the path if absent, removes it if present. Applying it twice
/// leaves the selection unchanged.
pub fn toggle(state: &mut SessionState, path: &str) {
    if !state.selection.remove(path) {
        state.selection.insert(path.to_string());
    }
}

/// Marks every file of the group except the keep candidate (position 0).
///
/// Additive only: a keep candidate the user selected manually beforehand
/// stays selected. Tolerates groups with fewer than two files by selecting
/// whatever follows the first entry.
pub fn select_all_but_one(state: &mut SessionState, content_hash: &str) {
    let paths: Vec<String> = match state.group(content_hash) {
        Some(group) => group.files.iter().skip(1).map(|f| f.path.clone()).collect(),
        None => return,
    };
    state.selection.extend(paths);
}

/// Applies `select_all_but_one` to every group in one pass.
pub fn select_all_duplicates(state: &mut SessionState) {
    let paths: Vec<String> = state
        .groups
        .iter()
        .flat_map(|group| group.files.iter().skip(1))
        .map(|f| f.path.clone())
        .collect();
    state.selection.extend(paths);
}

/// Removes every file of the group from the selection, whatever its prior
/// state.
pub fn clear_group_selection(state: &mut SessionState, content_hash: &str) {
    let paths: Vec<String> = match state.group(content_hash) {
        Some(group) => group.files.iter().map(|f| f.path.clone()).collect(),
        None => return,
    };
    for path in &paths {
        state.selection.remove(path);
    }
}

pub fn clear_all_selections(state: &mut SessionState) {
    state.selection.clear();
}

/// Reconciles the session after files were physically deleted.
///
/// Deleted files leave their groups; a group left with fewer than two files
/// is no longer a duplicate group and is dropped entirely (the survivor is
/// not promoted anywhere). Every path in `paths` leaves the selection
/// unconditionally, whether or not it was still in a group, and so does any
/// selected survivor of a collapsed group: the selection only ever contains
/// paths that still exist in some group.
pub fn remove_deleted_files(state: &mut SessionState, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    let deleted: HashSet<&str> = paths.iter().map(String::as_str).collect();

    for group in &mut state.groups {
        group.files.retain(|f| !deleted.contains(f.path.as_str()));
    }
    state.groups.retain(|g| g.files.len() >= 2);

    let remaining: HashSet<&str> = state
        .groups
        .iter()
        .flat_map(|g| g.files.iter().map(|f| f.path.as_str()))
        .collect();
    state.selection.retain(|p| remaining.contains(p.as_str()));
}
