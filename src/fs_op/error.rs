use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by filesystem operation helpers and `Explorer`-level ops.
///
/// Every variant that originates from a filesystem call carries the path at
/// which the failure happened, so a failed tree operation reports the first
/// entry it could not handle.
#[derive(Error, Debug)]
pub enum FsOpError {
    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// `rename` refused because `src` and `dst` live on different devices.
    /// `move_path` consumes this and falls back to copy + delete.
    #[error("cannot rename across devices from `{}` to `{}`", .src.display(), .dst.display())]
    CrossDevice { src: PathBuf, dst: PathBuf },

    #[error("I/O error at `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination would land on or inside the source tree.
    #[error("cannot copy `{}` into itself (`{}`)", .src.display(), .dst.display())]
    InvalidTarget { src: PathBuf, dst: PathBuf },

    #[error("directory is not empty: {}", .0.display())]
    DirectoryNotEmpty(PathBuf),

    #[error("operation cancelled at `{}`", .0.display())]
    Cancelled(PathBuf),

    #[error("invalid permission mode `{0}`: use octal notation (e.g. 755)")]
    InvalidMode(String),

    #[error("unknown user `{0}`")]
    UnknownUser(String),

    #[error("unknown group `{0}`")]
    UnknownGroup(String),

    #[error("`{0}` is not installed or not on PATH")]
    ToolMissing(String),

    #[error("`{program}` exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("unknown theme `{0}` (available: default, dark, light)")]
    UnknownTheme(String),

    /// Contextual error that includes source and destination paths.
    #[error("operation failed from `{}` to `{}`: {msg}", .src.display(), .dst.display())]
    PathContext {
        src: PathBuf,
        dst: PathBuf,
        msg: String,
    },

    /// Generic error with context message.
    #[error("{0}")]
    Message(String),
}

impl FsOpError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FsOpError::NotFound(path),
            io::ErrorKind::AlreadyExists => FsOpError::AlreadyExists(path),
            io::ErrorKind::PermissionDenied => FsOpError::PermissionDenied(path),
            _ => FsOpError::Io { path, source: err },
        }
    }

    /// The path the error refers to, when it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsOpError::NotFound(p)
            | FsOpError::AlreadyExists(p)
            | FsOpError::PermissionDenied(p)
            | FsOpError::DirectoryNotEmpty(p)
            | FsOpError::Cancelled(p) => Some(p),
            FsOpError::Io { path, .. } => Some(path),
            FsOpError::CrossDevice { src, .. }
            | FsOpError::InvalidTarget { src, .. }
            | FsOpError::PathContext { src, .. } => Some(src),
            _ => None,
        }
    }
}

impl From<String> for FsOpError {
    fn from(s: String) -> Self {
        FsOpError::Message(s)
    }
}

/// Shorthand used across `fs_op`.
pub type FsResult<T> = Result<T, FsOpError>;

/// Attach a path to an `io::Result`, classifying the error kind.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl AsRef<Path>) -> FsResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> FsResult<T> {
        self.map_err(|e| FsOpError::from_io(path, e))
    }
}
