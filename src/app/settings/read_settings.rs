use std::fs;
use std::io;
use std::path::Path;

use super::config_dirs::settings_path;
use super::write_settings::Settings;
use super::SettingsError;

/// Load settings from the user config directory, falling back to defaults
/// when no file exists yet.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_path()?)
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings::save_settings_to;
    use crate::ui::theme::Theme;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let td = tempdir().unwrap();
        let s = load_settings_from(&td.path().join("settings.toml")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let td = tempdir().unwrap();
        let path = td.path().join("settings.toml");
        fs::write(&path, "theme = \"dark\"\nshow_hidden = true\n").unwrap();

        let s = load_settings_from(&path).unwrap();
        assert_eq!(s.theme, Theme::Dark);
        assert!(s.show_hidden);
        assert_eq!(s.max_recent_files, Settings::default().max_recent_files);
    }

    #[test]
    fn saved_settings_load_back() {
        let td = tempdir().unwrap();
        let path = td.path().join("nested/settings.toml");
        let s = Settings {
            theme: Theme::Light,
            max_recent_files: 3,
            show_hidden: true,
            log_file: Some("/tmp/ft.log".into()),
        };
        save_settings_to(&s, &path).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), s);
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        let td = tempdir().unwrap();
        let path = td.path().join("settings.toml");
        fs::write(&path, "theme = \"neon\"\n").unwrap();
        assert!(matches!(load_settings_from(&path), Err(SettingsError::Parse { .. })));
    }
}
