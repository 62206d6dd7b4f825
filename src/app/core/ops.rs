use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::Explorer;
use crate::app::types::DeleteOutcome;
use crate::fs_op::archive::{has_zip_extension, unzip_archive, zip_path};
use crate::fs_op::create::{create_dir, create_file};
use crate::fs_op::mv::{move_path, move_target, rename_path};
use crate::fs_op::permissions::{change_owner, change_permissions, inspect_permissions, parse_octal_mode, PermissionInfo};
use crate::fs_op::walker::{Pattern, Substring};
use crate::fs_op::{copy_tree, delete_tree, remove_entry, search_tree, EntryKind, FsOpError, FsResult, SearchHit};

impl Explorer {
    pub fn create_file(&mut self, name: &str) -> FsResult<PathBuf> {
        let path = self.resolve(name)?;
        create_file(&path)?;
        tracing::info!(path = %path.display(), "created file");
        self.remember(&path);
        Ok(path)
    }

    pub fn create_dir(&mut self, name: &str) -> FsResult<PathBuf> {
        let path = self.resolve(name)?;
        create_dir(&path)?;
        tracing::info!(path = %path.display(), "created directory");
        Ok(path)
    }

    /// Delete a file, link or empty directory. A populated directory is
    /// left alone and reported as [`DeleteOutcome::NeedsConfirmation`].
    pub fn delete(&mut self, name: &str) -> FsResult<DeleteOutcome> {
        let path = self.resolve(name)?;
        refuse_root(&path)?;
        let kind = EntryKind::from_file_type(
            std::fs::symlink_metadata(&path)
                .map_err(|e| FsOpError::from_io(&path, e))?
                .file_type(),
        );
        match remove_entry(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "deleted");
                self.recover_cwd();
                Ok(DeleteOutcome::Deleted { path, kind })
            }
            Err(FsOpError::DirectoryNotEmpty(path)) => Ok(DeleteOutcome::NeedsConfirmation(path)),
            Err(e) => Err(e),
        }
    }

    /// Recursively delete `target` after the user confirmed it.
    pub fn delete_recursive(&mut self, target: &Path) -> FsResult<PathBuf> {
        let path = self.locate(target);
        refuse_root(&path)?;
        let result = delete_tree(&path, self.begin());
        // A partial delete can still remove the current directory.
        self.recover_cwd();
        result?;
        tracing::info!(path = %path.display(), "deleted recursively");
        Ok(path)
    }

    /// Copy `source` to exactly `dest`. Anything already at `dest`, a
    /// directory included, is `AlreadyExists`.
    pub fn copy(&mut self, source: &str, dest: &str) -> FsResult<PathBuf> {
        let src = self.resolve(source)?;
        let dst = self.resolve(dest)?;
        self.copy_resolved(&src, dst)
    }

    /// Copy `source` into the existing directory `dir` under its own name.
    pub(crate) fn copy_into(&mut self, source: &str, dir: &str) -> FsResult<PathBuf> {
        let src = self.resolve(source)?;
        let dir = self.resolve(dir)?;
        let target = move_target(&src, &dir)?;
        self.copy_resolved(&src, target)
    }

    fn copy_resolved(&mut self, src: &Path, target: PathBuf) -> FsResult<PathBuf> {
        std::fs::symlink_metadata(src).map_err(|e| FsOpError::from_io(src, e))?;
        copy_tree(src, &target, self.begin())?;
        tracing::info!(src = %src.display(), dst = %target.display(), "copied");
        self.remember(&target);
        Ok(target)
    }

    pub fn move_item(&mut self, source: &str, dest: &str) -> FsResult<PathBuf> {
        let src = self.resolve(source)?;
        let dst = self.resolve(dest)?;
        let result = move_path(&src, &dst, self.begin());
        self.recover_cwd();
        let target = result?;
        tracing::info!(src = %src.display(), dst = %target.display(), "moved");
        self.remember(&target);
        Ok(target)
    }

    /// Rename within the same directory. `new_name` is a bare name.
    pub fn rename(&mut self, old: &str, new_name: &str) -> FsResult<PathBuf> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name.contains('/') || new_name == "." || new_name == ".." {
            return Err(FsOpError::Message(format!("invalid name `{new_name}`")));
        }
        let path = self.resolve(old)?;
        let renamed = rename_path(&path, new_name)?;
        tracing::info!(from = %path.display(), to = %renamed.display(), "renamed");
        self.recover_cwd();
        self.remember(&renamed);
        Ok(renamed)
    }

    /// Case-insensitive substring search below the current directory.
    pub fn search(&self, term: &str) -> Vec<SearchHit> {
        search_tree(&self.cwd, Substring::case_insensitive(term)).collect()
    }

    pub fn search_regex(&self, expr: &str) -> FsResult<Vec<SearchHit>> {
        let pattern = Pattern::new(expr).map_err(|e| FsOpError::Message(format!("invalid pattern: {e}")))?;
        Ok(search_tree(&self.cwd, pattern).collect())
    }

    pub fn permissions(&self, name: &str) -> FsResult<PermissionInfo> {
        inspect_permissions(&self.resolve(name)?)
    }

    /// Apply an octal mode such as `755`. Returns the parsed mode.
    pub fn chmod(&mut self, name: &str, mode: &str) -> FsResult<u32> {
        let path = self.resolve(name)?;
        let mode = parse_octal_mode(mode)?;
        change_permissions(&path, mode)?;
        Ok(mode)
    }

    /// Change owner and/or group; an empty name leaves that id unchanged.
    pub fn chown(&mut self, name: &str, owner: &str, group: &str) -> FsResult<PathBuf> {
        let path = self.resolve(name)?;
        change_owner(&path, owner.trim(), group.trim())?;
        Ok(path)
    }

    /// Compress `source` into `archive`, adding `.zip` when missing.
    pub fn zip(&mut self, source: &str, archive: &str) -> FsResult<PathBuf> {
        let src = self.resolve(source)?;
        let mut archive = self.resolve(archive)?;
        if !has_zip_extension(archive.as_os_str()) {
            let mut name = archive.file_name().unwrap_or(OsStr::new("archive")).to_os_string();
            name.push(".zip");
            archive.set_file_name(name);
        }
        zip_path(self.runner.as_ref(), &src, &archive)?;
        tracing::info!(src = %src.display(), archive = %archive.display(), "zipped");
        self.remember(&archive);
        Ok(archive)
    }

    /// Extract `archive` into `dest`; an empty `dest` or `.` means the
    /// current directory.
    pub fn unzip(&mut self, archive: &str, dest: &str) -> FsResult<PathBuf> {
        let archive = self.resolve(archive)?;
        let dest = if dest.trim().is_empty() {
            self.cwd.clone()
        } else {
            self.resolve(dest)?
        };
        unzip_archive(self.runner.as_ref(), &archive, &dest)?;
        tracing::info!(archive = %archive.display(), dest = %dest.display(), "unzipped");
        Ok(dest)
    }
}

fn refuse_root(path: &Path) -> FsResult<()> {
    if path.parent().is_none() {
        return Err(FsOpError::Message(format!("refusing to delete {}", path.display())));
    }
    Ok(())
}
