use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::fs_op::entry::EntryKind;
use crate::fs_op::error::{FsOpError, FsResult};
use crate::fs_op::walker::{copy_tree, delete_tree, CancelToken};

fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

/// `rename(2)` with the error classified. `EXDEV` becomes `CrossDevice`.
fn rename_once(src: &Path, dst: &Path) -> FsResult<()> {
    let result = if crate::fs_op::test_helpers::should_force_cross_device() {
        Err(io::Error::from_raw_os_error(libc::EXDEV))
    } else {
        fs::rename(src, dst)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => Err(FsOpError::CrossDevice {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        }),
        Err(e) => Err(FsOpError::from_io(src, e)),
    }
}

fn ensure_vacant(target: &Path) -> FsResult<()> {
    if EntryKind::of(target).is_some() {
        Err(FsOpError::AlreadyExists(target.to_path_buf()))
    } else {
        Ok(())
    }
}

/// Rename a path within the same parent directory.
///
/// Returns the new path. An existing entry under `new_name` is never
/// replaced.
pub fn rename_path(path: &Path, new_name: &str) -> FsResult<PathBuf> {
    fs::symlink_metadata(path).map_err(|e| FsOpError::from_io(path, e))?;
    let parent = path
        .parent()
        .ok_or_else(|| FsOpError::Message(format!("{} has no parent", path.display())))?;
    let dest = parent.join(new_name);
    ensure_vacant(&dest)?;
    rename_once(path, &dest)?;
    Ok(dest)
}

/// Where a move of `src` to `dest` lands: inside `dest` when it is an
/// existing directory, otherwise `dest` itself.
pub fn move_target(src: &Path, dest: &Path) -> FsResult<PathBuf> {
    if EntryKind::of(dest) == Some(EntryKind::Directory) {
        let name = src
            .file_name()
            .ok_or_else(|| FsOpError::Message(format!("{} has no file name", src.display())))?;
        Ok(dest.join(name))
    } else {
        Ok(dest.to_path_buf())
    }
}

/// Move `src` to `dest`, returning the final path.
///
/// A plain rename is tried first. When the kernel refuses because the two
/// paths are on different filesystems the move degrades to `copy_tree`
/// followed by `delete_tree` of the source; a failure part-way leaves
/// whatever was already copied or deleted in place.
pub fn move_path(src: &Path, dest: &Path, cancel: &CancelToken) -> FsResult<PathBuf> {
    fs::symlink_metadata(src).map_err(|e| FsOpError::from_io(src, e))?;
    let target = move_target(src, dest)?;
    ensure_vacant(&target)?;

    match rename_once(src, &target) {
        Ok(()) => Ok(target),
        Err(FsOpError::CrossDevice { .. }) => {
            tracing::info!(src = %src.display(), dst = %target.display(), "cross-device move, copying");
            copy_tree(src, &target, cancel)?;
            delete_tree(src, cancel)?;
            Ok(target)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rename_refuses_to_clobber() {
        let td = tempdir().unwrap();
        let a = td.path().join("a.txt");
        let b = td.path().join("b.txt");
        fs::write(&a, b"a").unwrap();
        fs::write(&b, b"b").unwrap();

        let err = rename_path(&a, "b.txt").unwrap_err();
        assert!(matches!(err, FsOpError::AlreadyExists(_)));
        assert_eq!(fs::read(&b).unwrap(), b"b");

        let c = rename_path(&a, "c.txt").unwrap();
        assert_eq!(c, td.path().join("c.txt"));
        assert!(!a.exists());
    }

    #[test]
    fn move_into_existing_directory_keeps_name() {
        let td = tempdir().unwrap();
        let src = td.path().join("doc.txt");
        fs::write(&src, b"x").unwrap();
        let dir = td.path().join("into");
        fs::create_dir(&dir).unwrap();

        let landed = move_path(&src, &dir, &CancelToken::new()).unwrap();
        assert_eq!(landed, dir.join("doc.txt"));
        assert!(landed.exists());
        assert!(!src.exists());
    }

    #[test]
    fn move_onto_existing_file_is_rejected() {
        let td = tempdir().unwrap();
        let src = td.path().join("a");
        let dst = td.path().join("b");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"b").unwrap();
        let err = move_path(&src, &dst, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, FsOpError::AlreadyExists(_)));
        assert!(src.exists());
    }

    #[test]
    fn cross_device_move_falls_back_to_copy_then_delete() {
        let td = tempdir().unwrap();
        let src = td.path().join("tree");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/leaf.txt"), b"leaf").unwrap();
        let dst = td.path().join("moved");

        let _guard = crate::fs_op::test_helpers::CrossDeviceGuard::engage();
        let landed = move_path(&src, &dst, &CancelToken::new()).unwrap();

        assert_eq!(landed, dst);
        assert_eq!(fs::read(dst.join("nested/leaf.txt")).unwrap(), b"leaf");
        assert!(!src.exists(), "source should be deleted after the fallback copy");
    }

    #[test]
    fn cross_device_rename_is_not_silently_copied() {
        let td = tempdir().unwrap();
        let a = td.path().join("a");
        fs::write(&a, b"a").unwrap();
        let _guard = crate::fs_op::test_helpers::CrossDeviceGuard::engage();
        assert!(matches!(rename_path(&a, "b"), Err(FsOpError::CrossDevice { .. })));
    }

    #[test]
    fn cross_device_errno_is_recognised() {
        assert!(is_cross_device(&io::Error::from_raw_os_error(libc::EXDEV)));
        assert!(!is_cross_device(&io::Error::from_raw_os_error(libc::EACCES)));
    }
}
