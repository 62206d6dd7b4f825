use std::fs;
use std::path::Path;

use fs_extra::error::ErrorKind as CopyErrorKind;
use fs_extra::file::{copy as file_copy, CopyOptions};

use crate::fs_op::error::{FsOpError, FsResult, IoContext};

/// Copy one regular file's bytes from `src` to `dst` and replicate its
/// permission bits.
///
/// Never overwrites: an existing `dst` fails with `AlreadyExists`. Both
/// file handles are opened and closed inside this call.
pub fn copy_file(src: &Path, dst: &Path) -> FsResult<u64> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(FsOpError::AlreadyExists(dst.to_path_buf()));
    }
    // Source problems are reported here; whatever fs_extra reports after
    // this belongs to `dst`.
    fs::File::open(src).at(src)?;

    let mut options = CopyOptions::new();
    options.overwrite = false;
    options.skip_exist = false;
    // Use a 64 KiB buffer for file copies to balance throughput and memory.
    options.buffer_size = 64 * 1024;

    let copied = file_copy(src, dst, &options).map_err(|e| {
        let msg = e.to_string();
        match e.kind {
            CopyErrorKind::NotFound => FsOpError::NotFound(dst.to_path_buf()),
            CopyErrorKind::AlreadyExists => FsOpError::AlreadyExists(dst.to_path_buf()),
            CopyErrorKind::PermissionDenied => FsOpError::PermissionDenied(dst.to_path_buf()),
            CopyErrorKind::Io(io) => FsOpError::from_io(dst, io),
            _ => FsOpError::PathContext {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
                msg,
            },
        }
    })?;

    crate::fs_op::permissions::copy_permissions(src, dst)?;
    Ok(copied)
}
