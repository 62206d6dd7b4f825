pub mod config_dirs;
pub mod read_settings;
pub mod write_settings;

use std::path::PathBuf;

pub use config_dirs::{ensure_dirs_exist, project_config_dir, user_cache_dir};
pub use read_settings::{load_settings, load_settings_from};
pub use write_settings::{save_settings, save_settings_to, Settings};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine a home directory for configuration files")]
    NoProjectDirs,
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
