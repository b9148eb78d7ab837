//! Turns raw user filter input into validated `ScanOptions`.
//!
//! The draft keeps the text of *both* extension lists so the user does not
//! lose what they typed when toggling between include and exclude mode; only
//! the active list is ever emitted.

use serde::{Deserialize, Serialize};

use crate::core::ScanOptions;

/// Unit selected for the minimum-size threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeUnit {
    #[default]
    Kb,
    Mb,
}

impl SizeUnit {
    fn bytes(self) -> u64 {
        match self {
            SizeUnit::Kb => 1024,
            SizeUnit::Mb => 1024 * 1024,
        }
    }
}

/// Whether the extension list includes or excludes the listed extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionMode {
    #[default]
    Include,
    Exclude,
}

/// Raw filter form as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDraft {
    /// Root folders to scan, order-preserving, unique.
    pub folders: Vec<String>,
    /// Free-text minimum size; empty or non-numeric means no filter.
    pub min_size_text: String,
    pub min_size_unit: SizeUnit,
    /// Comma-separated extensions for include mode.
    pub include_text: String,
    /// Comma-separated extensions for exclude mode.
    pub exclude_text: String,
    pub extension_mode: ExtensionMode,
    pub follow_symlinks: bool,
}

impl FilterDraft {
    /// Appends folders, rejecting duplicates at insertion time.
    pub fn add_folders(&mut self, paths: Vec<String>) -> usize {
        let mut added = 0;
        for path in paths {
            if !self.folders.contains(&path) {
                self.folders.push(path);
                added += 1;
            }
        }
        added
    }

    pub fn remove_folder(&mut self, path: &str) {
        self.folders.retain(|p| p != path);
    }

    /// Derives the validated options the engine consumes. Deterministic, no
    /// side effects.
    pub fn derive(&self) -> ScanOptions {
        let (include_extensions, exclude_extensions) = match self.extension_mode {
            ExtensionMode::Include => (parse_extension_list(&self.include_text), None),
            ExtensionMode::Exclude => (None, parse_extension_list(&self.exclude_text)),
        };

        ScanOptions {
            root_paths: self.folders.clone(),
            min_file_size: parse_min_size(&self.min_size_text, self.min_size_unit),
            include_extensions,
            exclude_extensions,
            follow_symlinks: self.follow_symlinks,
        }
    }
}

/// A threshold of exactly 0 means "no filter", not "only empty files".
fn parse_min_size(text: &str, unit: SizeUnit) -> Option<u64> {
    match text.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value * unit.bytes()),
        _ => None,
    }
}

/// Splits comma-separated extension text into a normalized list: trimmed,
/// lowercased, a single leading dot stripped, empties dropped. An empty
/// result maps to `None`, never `Some(vec![])`.
fn parse_extension_list(text: &str) -> Option<Vec<String>> {
    let extensions: Vec<String> = text
        .split(',')
        .map(|token| {
            let token = token.trim().to_lowercase();
            token.strip_prefix('.').map(str::to_string).unwrap_or(token)
        })
        .filter(|token| !token.is_empty())
        .collect();

    if extensions.is_empty() {
        None
    } else {
        Some(extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_folders_rejects_duplicates_preserving_order() {
        let mut draft = FilterDraft::default();
        draft.add_folders(vec!["/a".into(), "/b".into()]);
        let added = draft.add_folders(vec!["/b".into(), "/c".into()]);

        assert_eq!(added, 1);
        assert_eq!(draft.folders, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn remove_folder_keeps_the_rest() {
        let mut draft = FilterDraft::default();
        draft.add_folders(vec!["/a".into(), "/b".into(), "/c".into()]);
        draft.remove_folder("/b");
        assert_eq!(draft.folders, vec!["/a", "/c"]);
    }

    #[test]
    fn min_size_zero_means_no_filter() {
        let draft = FilterDraft {
            min_size_text: "0".into(),
            ..Default::default()
        };
        assert_eq!(draft.derive().min_file_size, None);
    }

    #[test]
    fn min_size_scales_with_unit() {
        let kb = FilterDraft {
            min_size_text: "10".into(),
            min_size_unit: SizeUnit::Kb,
            ..Default::default()
        };
        assert_eq!(kb.derive().min_file_size, Some(10 * 1024));

        let mb = FilterDraft {
            min_size_text: "10".into(),
            min_size_unit: SizeUnit::Mb,
            ..Default::default()
        };
        assert_eq!(mb.derive().min_file_size, Some(10 * 1024 * 1024));
    }

    #[test]
    fn min_size_garbage_means_no_filter() {
        for text in ["", "  ", "abc", "-5", "1.5"] {
            let draft = FilterDraft {
                min_size_text: text.into(),
                ..Default::default()
            };
            assert_eq!(draft.derive().min_file_size, None, "input {text:?}");
        }
    }

    #[test]
    fn extension_tokens_are_normalized() {
        let draft = FilterDraft {
            include_text: " .JPG, png ,, .tar.gz ,".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.derive().include_extensions,
            Some(vec!["jpg".into(), "png".into(), "tar.gz".into()])
        );
    }

    #[test]
    fn empty_extension_text_maps_to_none() {
        let draft = FilterDraft {
            include_text: " , ,".into(),
            ..Default::default()
        };
        assert_eq!(draft.derive().include_extensions, None);
    }

    #[test]
    fn only_the_active_mode_is_emitted() {
        let draft = FilterDraft {
            include_text: "jpg".into(),
            exclude_text: "png".into(),
            extension_mode: ExtensionMode::Exclude,
            ..Default::default()
        };
        let options = draft.derive();
        assert_eq!(options.include_extensions, None);
        assert_eq!(options.exclude_extensions, Some(vec!["png".into()]));

        // The inactive text is preserved in the draft itself.
        assert_eq!(draft.include_text, "jpg");
    }

    #[test]
    fn follow_symlinks_passes_through() {
        let draft = FilterDraft {
            follow_symlinks: true,
            ..Default::default()
        };
        assert!(draft.derive().follow_symlinks);
    }
}
