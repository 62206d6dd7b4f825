use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};

use tempfile::tempdir;

use filetrek::fs_op::mv::{move_path, rename_path};
use filetrek::fs_op::{CancelToken, FsOpError};

fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

// Moving a symlink moves the link itself; its target is untouched.
#[test]
fn moving_a_symlink_moves_the_link() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let target = tmp.path().join("target");
    fs::create_dir_all(&target)?;
    fs::write(target.join("inner.txt"), b"hello")?;
    let link = tmp.path().join("link_to_target");
    symlink(&target, &link)?;

    let dest = tmp.path().join("moved_link");
    let landed = move_path(&link, &dest, &CancelToken::new())?;

    assert_eq!(landed, dest);
    assert!(fs::symlink_metadata(&dest)?.file_type().is_symlink());
    assert_eq!(fs::read_link(&dest)?, target);
    assert_eq!(fs::read_to_string(target.join("inner.txt"))?, "hello");
    assert!(fs::symlink_metadata(&link).is_err());
    Ok(())
}

// A failed move into an unwritable directory leaves the source intact.
#[test]
fn move_into_unwritable_parent_fails_and_keeps_source() -> Result<(), Box<dyn std::error::Error>> {
    if running_as_root() {
        return Ok(());
    }
    let tmp = tempdir()?;
    let src = tmp.path().join("sourcedir");
    fs::create_dir_all(&src)?;
    fs::write(src.join("file.txt"), b"data")?;

    let dest_parent = tempdir()?;
    let dest = dest_parent.path().join("dest");
    fs::set_permissions(dest_parent.path(), fs::Permissions::from_mode(0o555))?;

    let res = move_path(&src, &dest, &CancelToken::new());
    fs::set_permissions(dest_parent.path(), fs::Permissions::from_mode(0o755))?;

    assert!(matches!(res, Err(FsOpError::PermissionDenied(_))), "got {res:?}");
    assert_eq!(fs::read(src.join("file.txt"))?, b"data");
    assert!(!dest.exists());
    Ok(())
}

#[test]
fn moving_into_own_subdirectory_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let src = tmp.path().join("a");
    fs::create_dir_all(src.join("b"))?;

    let res = move_path(&src, &src.join("b"), &CancelToken::new());
    assert!(res.is_err());
    assert!(src.join("b").is_dir());
    Ok(())
}

#[test]
fn missing_source_is_not_found() {
    let tmp = tempdir().unwrap();
    let res = move_path(&tmp.path().join("ghost"), &tmp.path().join("x"), &CancelToken::new());
    assert!(matches!(res, Err(FsOpError::NotFound(_))));
    assert!(matches!(rename_path(&tmp.path().join("ghost"), "y"), Err(FsOpError::NotFound(_))));
}

#[cfg(feature = "test-helpers")]
#[test]
fn cross_device_move_of_a_single_file_keeps_contents_and_mode() -> Result<(), Box<dyn std::error::Error>> {
    use filetrek::fs_op::test_helpers::CrossDeviceGuard;

    let tmp = tempdir()?;
    let src = tmp.path().join("tool.sh");
    fs::write(&src, b"#!/bin/sh\n")?;
    fs::set_permissions(&src, fs::Permissions::from_mode(0o751))?;
    let dir = tmp.path().join("bin");
    fs::create_dir(&dir)?;

    let _guard = CrossDeviceGuard::engage();
    let landed = move_path(&src, &dir, &CancelToken::new())?;

    assert_eq!(landed, dir.join("tool.sh"));
    assert_eq!(fs::metadata(&landed)?.permissions().mode() & 0o777, 0o751);
    assert!(!src.exists());
    Ok(())
}
