use std::path::{Path, PathBuf};

use crate::app::recent::RecentFiles;
use crate::app::settings::{save_settings_to, Settings};
use crate::fs_op::archive::{CommandRunner, SystemRunner};
use crate::fs_op::path::{normalize, resolve_path};
use crate::fs_op::{CancelToken, FsOpError, FsResult};
use crate::ui::theme::Theme;

// submodules live in `src/app/core/`
mod batch;
mod navigation;
mod ops;

/// One interactive session.
///
/// The session owns its current directory explicitly; the process working
/// directory is never changed. Every operation takes user-entered names
/// and resolves them against `cwd`.
pub struct Explorer {
    cwd: PathBuf,
    pub theme: Theme,
    pub recent: RecentFiles,
    pub settings: Settings,
    history_file: Option<PathBuf>,
    settings_file: Option<PathBuf>,
    cancel: CancelToken,
    runner: Box<dyn CommandRunner>,
}

impl Explorer {
    /// Start a session in `cwd`, which must be an existing directory.
    pub fn new(cwd: impl Into<PathBuf>, settings: Settings) -> FsResult<Self> {
        let cwd = cwd.into();
        let md = std::fs::metadata(&cwd).map_err(|e| FsOpError::from_io(&cwd, e))?;
        if !md.is_dir() {
            return Err(FsOpError::Message(format!("not a directory: {}", cwd.display())));
        }
        Ok(Explorer {
            cwd,
            theme: settings.theme,
            recent: RecentFiles::with_capacity(settings.max_recent_files),
            settings,
            history_file: None,
            settings_file: None,
            cancel: CancelToken::new(),
            runner: Box::new(SystemRunner),
        })
    }

    /// Replace the subprocess runner used for zip/unzip.
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Load the recent-files history from `path` and save it back there
    /// whenever it changes. An unreadable history starts empty.
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match RecentFiles::load(&path, self.settings.max_recent_files) {
            Ok(recent) => self.recent = recent,
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable history"),
        }
        self.history_file = Some(path);
        self
    }

    /// Save settings to `path` whenever the session changes them.
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Shared flag checked by tree operations; setting it stops the
    /// running operation after the current entry.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Resolve user input against the current directory.
    pub fn resolve(&self, input: &str) -> FsResult<PathBuf> {
        Ok(resolve_path(input, &self.cwd)?)
    }

    /// Like [`Explorer::resolve`] for an already-typed path.
    fn locate(&self, path: &Path) -> PathBuf {
        normalize(&self.cwd.join(path))
    }

    fn remember(&mut self, path: &Path) {
        self.recent.push(path);
        if let Some(file) = &self.history_file {
            if let Err(e) = self.recent.save(file) {
                tracing::warn!(path = %file.display(), error = %e, "failed to save history");
            }
        }
    }

    /// Start a fresh cancellable operation.
    fn begin(&self) -> &CancelToken {
        self.cancel.reset();
        &self.cancel
    }

    pub fn set_theme(&mut self, name: &str) -> FsResult<Theme> {
        let theme: Theme = name.parse()?;
        self.theme = theme;
        self.settings.theme = theme;
        tracing::info!(theme = %theme, "theme changed");
        if let Some(file) = &self.settings_file {
            if let Err(e) = save_settings_to(&self.settings, file) {
                tracing::warn!(path = %file.display(), error = %e, "failed to save settings");
            }
        }
        Ok(theme)
    }
}
