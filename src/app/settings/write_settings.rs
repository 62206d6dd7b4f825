use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::config_dirs::settings_path;
use super::SettingsError;
use crate::app::recent::DEFAULT_MAX_RECENT;
use crate::ui::theme::Theme;

/// User preferences persisted as TOML. Every field has a default so a
/// partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub max_recent_files: usize,
    pub show_hidden: bool,
    /// Log file for interactive sessions. `None` uses the cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::Default,
            max_recent_files: DEFAULT_MAX_RECENT,
            show_hidden: false,
            log_file: None,
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    save_settings_to(settings, &settings_path()?)
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    let text = toml::to_string_pretty(settings)?;
    crate::fs_op::create::write_atomic(path, text.as_bytes()).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "settings saved");
    Ok(())
}
