use std::fs;
use std::path::PathBuf;

use directories_next::ProjectDirs;

use super::SettingsError;

fn project_dirs() -> Result<ProjectDirs, SettingsError> {
    ProjectDirs::from("", "", "filetrek").ok_or(SettingsError::NoProjectDirs)
}

/// Directory holding `settings.toml`, e.g. `~/.config/filetrek` on Linux.
pub fn project_config_dir() -> Result<PathBuf, SettingsError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Directory for the recent-files history and log files.
pub fn user_cache_dir() -> Result<PathBuf, SettingsError> {
    Ok(project_dirs()?.cache_dir().to_path_buf())
}

pub fn settings_path() -> Result<PathBuf, SettingsError> {
    Ok(project_config_dir()?.join("settings.toml"))
}

pub fn recent_path() -> Result<PathBuf, SettingsError> {
    Ok(user_cache_dir()?.join("recent.json"))
}

pub fn ensure_dirs_exist() -> Result<(), SettingsError> {
    for dir in [project_config_dir()?, user_cache_dir()?] {
        fs::create_dir_all(&dir).map_err(|source| SettingsError::Io { path: dir.clone(), source })?;
    }
    Ok(())
}
