pub mod settings;

use serde::{Deserialize, Serialize};

/// Persisted user preferences.
///
/// Everything that should survive a restart lives here; per-session data
/// stays in `app::state::SessionState`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Move deleted files to the trash instead of removing them permanently.
    pub use_trash: bool,
    /// Default for the follow-symlinks filter toggle.
    pub follow_symlinks: bool,
    /// Folders from the last started scan, offered again on startup.
    pub last_folders: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_trash: true,
            follow_symlinks: false,
            last_folders: Vec::new(),
        }
    }
}
