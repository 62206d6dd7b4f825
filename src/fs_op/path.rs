use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur when resolving a user-supplied path.
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    Empty,
    HomeNotFound,
    NotFound(PathBuf),
    NotDirectory(PathBuf),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "empty path"),
            PathError::HomeNotFound => write!(f, "could not determine home directory"),
            PathError::NotFound(p) => write!(f, "path does not exist: {}", p.display()),
            PathError::NotDirectory(p) => write!(f, "not a directory: {}", p.display()),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for crate::fs_op::error::FsOpError {
    fn from(e: PathError) -> Self {
        use crate::fs_op::error::FsOpError;
        match e {
            PathError::NotFound(p) => FsOpError::NotFound(p),
            other => FsOpError::Message(other.to_string()),
        }
    }
}

/// Resolve a user-supplied path against the explicit context directory
/// `base`. Nothing is checked on disk.
///
/// - Surrounding whitespace is trimmed; empty input is an error.
/// - A leading `~` expands to the home directory.
/// - Absolute paths are kept, relative ones are joined to `base`.
/// - `.` and `..` components are folded lexically, so `..` at `/` stays `/`.
pub fn resolve_path(input: &str, base: &Path) -> Result<PathBuf, PathError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    let candidate = if input.starts_with('~') {
        expand_tilde(input).ok_or(PathError::HomeNotFound)?
    } else {
        let p = PathBuf::from(input);
        if p.is_absolute() {
            p
        } else {
            base.join(p)
        }
    };
    Ok(normalize(&candidate))
}

/// Like [`resolve_path`] but the result must be an existing directory.
/// Used for changing the session's current directory.
pub fn resolve_dir(input: &str, base: &Path) -> Result<PathBuf, PathError> {
    let candidate = resolve_path(input, base)?;
    if !candidate.exists() {
        return Err(PathError::NotFound(candidate));
    }
    if !candidate.is_dir() {
        return Err(PathError::NotDirectory(candidate));
    }
    Ok(candidate)
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// Links are not consulted: `link/..` is the directory that holds `link`,
/// not the parent of whatever `link` points at. This is how a shell's
/// `cd` treats the path the user typed, and it matches the rule that tree
/// operations never follow symbolic links.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

// Expand a path beginning with `~` into the user's home directory.
fn expand_tilde(input: &str) -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let rest = input.trim_start_matches('~');
    let mut p = PathBuf::from(home);
    let trimmed = rest.trim_start_matches('/');
    if !trimmed.is_empty() {
        p.push(trimmed);
    }
    Some(p)
}
