//! Fresh-from-disk snapshots of directory entries.
//!
//! Nothing here is cached: each call re-reads the filesystem, so a listing
//! may be stale by the time the caller acts on it.

use std::fs::{self, FileType, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::fs::{MetadataExt, PermissionsExt};

use crate::fs_op::error::{FsResult, IoContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Classify `path` with a single `lstat`; `None` when nothing is there.
    /// A link is `Symlink` whatever it points at, dangling or not.
    pub fn of(path: &Path) -> Option<Self> {
        fs::symlink_metadata(path)
            .ok()
            .map(|md| Self::from_file_type(md.file_type()))
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

/// One filesystem object as seen by `lstat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Full `st_mode` including file type bits.
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
}

impl DirectoryEntry {
    /// Build an entry for `path` without following symlinks.
    pub fn from_path(path: &Path) -> FsResult<Self> {
        let md = fs::symlink_metadata(path).at(path)?;
        Ok(Self::from_metadata(path, &md))
    }

    pub fn from_metadata(path: &Path, md: &Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        #[cfg(unix)]
        let (mode, uid, gid) = (md.permissions().mode(), md.uid(), md.gid());
        #[cfg(not(unix))]
        let (mode, uid, gid) = (if md.permissions().readonly() { 0o444 } else { 0o644 }, 0, 0);
        DirectoryEntry {
            name,
            path: path.to_path_buf(),
            kind: EntryKind::from_file_type(md.file_type()),
            size: md.len(),
            modified: md.modified().ok(),
            mode,
            uid,
            gid,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Owner-executable regular file.
    pub fn is_executable(&self) -> bool {
        self.kind == EntryKind::File && self.mode & 0o100 != 0
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Permission bits only (`0o7777` mask).
    pub fn permission_bits(&self) -> u32 {
        self.mode & 0o7777
    }
}

/// Read the entries of `dir`, skipping any that vanish or cannot be
/// stat'ed between `readdir` and `lstat`.
///
/// Entries are returned in the order the OS reports them; use
/// [`sort_dirs_first`] for display order.
pub fn read_entries(dir: &Path, show_hidden: bool) -> FsResult<Vec<DirectoryEntry>> {
    let mut out = Vec::new();
    for item in fs::read_dir(dir).at(dir)? {
        let item = item.at(dir)?;
        let path = item.path();
        match fs::symlink_metadata(&path) {
            Ok(md) => {
                let entry = DirectoryEntry::from_metadata(&path, &md);
                if show_hidden || !entry.is_hidden() {
                    out.push(entry);
                }
            }
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry"),
        }
    }
    Ok(out)
}

/// Display ordering: directories before everything else, then by name.
pub fn sort_dirs_first(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn listing_puts_directories_first_then_names() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").write_str("2").unwrap();
        temp.child("a.txt").write_str("1").unwrap();
        temp.child("zdir").create_dir_all().unwrap();
        temp.child("adir").create_dir_all().unwrap();
        temp.child(".hidden").write_str("h").unwrap();

        let mut ents = read_entries(temp.path(), false).unwrap();
        sort_dirs_first(&mut ents);
        let names: Vec<_> = ents.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["adir", "zdir", "a.txt", "b.txt"]);

        let all = read_entries(temp.path(), true).unwrap();
        assert_eq!(all.len(), 5);
        temp.close().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn entry_reports_size_mode_and_executable_bit() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("run.sh");
        f.write_str("#!/bin/sh\n").unwrap();
        fs::set_permissions(f.path(), fs::Permissions::from_mode(0o755)).unwrap();

        let e = DirectoryEntry::from_path(f.path()).unwrap();
        assert_eq!(e.kind, EntryKind::File);
        assert_eq!(e.size, 10);
        assert_eq!(e.permission_bits(), 0o755);
        assert!(e.is_executable());
        assert!(e.modified.is_some());
    }

    #[test]
    fn kind_of_never_follows_links() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("real").create_dir_all().unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(temp.path().join("real"), &link).unwrap();
        let dangling = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("gone"), &dangling).unwrap();

        assert_eq!(EntryKind::of(&temp.path().join("real")), Some(EntryKind::Directory));
        assert_eq!(EntryKind::of(&link), Some(EntryKind::Symlink));
        assert_eq!(EntryKind::of(&dangling), Some(EntryKind::Symlink));
        assert_eq!(EntryKind::of(&temp.path().join("gone")), None);
    }
}
