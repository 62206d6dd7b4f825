//! Symbolic links as first-class entries.
//!
//! Tree operations never follow links. Copying a link recreates it with
//! the same (possibly relative, possibly dangling) target text.

use std::fs;
use std::os::unix::fs::symlink as unix_symlink;
use std::path::Path;

use crate::fs_op::error::{FsResult, IoContext};

/// Create a symbolic link at `dst` pointing at `target`.
pub fn create_symlink(target: &Path, dst: &Path) -> FsResult<()> {
    unix_symlink(target, dst).at(dst)
}

/// Returns `true` when `path` itself is a symbolic link.
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|md| md.file_type().is_symlink())
        .unwrap_or(false)
}

/// Recreate the link at `src` as `dst`, keeping the stored target verbatim.
pub(crate) fn copy_symlink(src: &Path, dst: &Path) -> FsResult<()> {
    let target = fs::read_link(src).at(src)?;
    create_symlink(&target, dst)
}
