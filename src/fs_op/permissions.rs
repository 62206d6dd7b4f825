//! Permission and ownership inspection and changes (`chmod`/`chown`).

use std::fs::{self, Permissions};
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use nix::unistd::{chown, Gid, Group, Uid, User};

use crate::fs_op::error::{FsOpError, FsResult, IoContext};

/// Everything the "view permissions" screen shows for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionInfo {
    pub path: PathBuf,
    /// `ls -l` style, e.g. `drwxr-xr-x`.
    pub mode_string: String,
    /// Permission bits, e.g. `0o755`.
    pub octal: u32,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Render `mode` as a ten-character `ls -l` string.
///
/// The first character is `d` for directories, `l` for symlinks and `-`
/// for everything else.
pub fn format_unix_mode(mode: u32) -> String {
    let kind = match mode & libc::S_IFMT as u32 {
        m if m == libc::S_IFDIR as u32 => 'd',
        m if m == libc::S_IFLNK as u32 => 'l',
        _ => '-',
    };
    let mut s = String::with_capacity(10);
    s.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}

/// Parse user input such as `755` or `0644` into permission bits.
pub fn parse_octal_mode(input: &str) -> FsResult<u32> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(FsOpError::InvalidMode(input.to_string()));
    }
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(FsOpError::InvalidMode(input.to_string())),
    }
}

/// User name for `uid`, or the number when the user database has no entry.
pub fn owner_name(uid: u32) -> String {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        _ => uid.to_string(),
    }
}

/// Group name for `gid`, or the number when the group database has no entry.
pub fn group_name(gid: u32) -> String {
    match Group::from_gid(Gid::from_raw(gid)) {
        Ok(Some(group)) => group.name,
        _ => gid.to_string(),
    }
}

pub fn inspect_permissions(path: &Path) -> FsResult<PermissionInfo> {
    let md = fs::symlink_metadata(path).at(path)?;
    Ok(PermissionInfo {
        path: path.to_path_buf(),
        mode_string: format_unix_mode(md.mode()),
        octal: md.mode() & 0o7777,
        owner: owner_name(md.uid()),
        group: group_name(md.gid()),
        size: md.len(),
        modified: md.modified().ok(),
    })
}

pub fn change_permissions(path: &Path, mode: u32) -> FsResult<()> {
    tracing::info!(path = %path.display(), mode = %format!("{mode:o}"), "chmod");
    fs::set_permissions(path, Permissions::from_mode(mode)).at(path)
}

/// Change owner and/or group by name. An empty name leaves that id as is.
pub fn change_owner(path: &Path, owner: &str, group: &str) -> FsResult<()> {
    let owner = owner.trim();
    let group = group.trim();

    let uid = if owner.is_empty() {
        None
    } else {
        match User::from_name(owner) {
            Ok(Some(user)) => Some(user.uid),
            _ => return Err(FsOpError::UnknownUser(owner.to_string())),
        }
    };
    let gid = if group.is_empty() {
        None
    } else {
        match Group::from_name(group) {
            Ok(Some(g)) => Some(g.gid),
            _ => return Err(FsOpError::UnknownGroup(group.to_string())),
        }
    };

    tracing::info!(path = %path.display(), owner, group, "chown");
    chown(path, uid, gid).map_err(|errno| FsOpError::from_io(path, errno.into()))
}

/// Copy permission bits from `src` to `dst`.
pub(crate) fn copy_permissions(src: &Path, dst: &Path) -> FsResult<()> {
    let perms: Permissions = fs::metadata(src).at(src)?.permissions();
    fs::set_permissions(dst, perms).at(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mode_strings_match_ls() {
        assert_eq!(format_unix_mode(0o040755), "drwxr-xr-x");
        assert_eq!(format_unix_mode(0o100644), "-rw-r--r--");
        assert_eq!(format_unix_mode(0o120777), "lrwxrwxrwx");
        assert_eq!(format_unix_mode(0o100700), "-rwx------");
    }

    #[test]
    fn octal_parsing_accepts_common_forms_and_rejects_garbage() {
        assert_eq!(parse_octal_mode("755").unwrap(), 0o755);
        assert_eq!(parse_octal_mode(" 0644 ").unwrap(), 0o644);
        assert_eq!(parse_octal_mode("0o600").unwrap(), 0o600);
        assert!(matches!(parse_octal_mode("8"), Err(FsOpError::InvalidMode(_))));
        assert!(matches!(parse_octal_mode("rwx"), Err(FsOpError::InvalidMode(_))));
        assert!(matches!(parse_octal_mode(""), Err(FsOpError::InvalidMode(_))));
        assert!(matches!(parse_octal_mode("17777"), Err(FsOpError::InvalidMode(_))));
    }

    #[test]
    fn chmod_then_inspect_round_trips() -> FsResult<()> {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");
        fs::write(&f, b"hello").unwrap();

        change_permissions(&f, 0o640)?;
        let info = inspect_permissions(&f)?;
        assert_eq!(info.octal, 0o640);
        assert_eq!(info.mode_string, "-rw-r-----");
        assert_eq!(info.size, 5);
        assert!(!info.owner.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_owner_is_reported_before_touching_the_file() {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");
        fs::write(&f, b"").unwrap();
        let err = change_owner(&f, "no-such-user-filetrek", "").unwrap_err();
        assert!(matches!(err, FsOpError::UnknownUser(ref u) if u == "no-such-user-filetrek"));
    }

    #[test]
    fn chown_with_no_names_is_a_no_op() {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");
        fs::write(&f, b"").unwrap();
        change_owner(&f, "", "").unwrap();
    }
}
