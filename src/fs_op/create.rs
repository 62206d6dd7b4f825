use std::fs::{self, DirBuilder, OpenOptions};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::fs_op::error::{FsResult, IoContext};

/// Create an empty file at `path`. Fails if anything already exists there.
pub fn create_file(path: &Path) -> FsResult<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(drop)
        .at(path)
}

/// Create a single directory with mode `0755` (subject to the umask).
///
/// The parent must already exist; an existing entry at `path` is
/// `AlreadyExists`.
pub fn create_dir(path: &Path) -> FsResult<()> {
    DirBuilder::new().mode(0o755).create(path).at(path)
}

/// Write `data` to `target` by writing a temporary file in the same
/// directory and renaming it into place, so readers never observe a
/// partial file. Missing parent directories are created.
pub fn write_atomic(target: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match target.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => return fs::write(target, data),
    };
    fs::create_dir_all(dir)?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let tmp = dir.join(format!(".tmp_atomic_write.{:x}{:x}", std::process::id(), nanos));

    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, target).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
