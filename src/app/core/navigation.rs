use std::path::Path;

use super::Explorer;
use crate::fs_op::entry::{read_entries, sort_dirs_first};
use crate::fs_op::path::resolve_dir;
use crate::fs_op::{DirectoryEntry, FsResult};

impl Explorer {
    /// Entries of the current directory, directories first then by name.
    /// Hidden entries follow the `show_hidden` setting.
    pub fn list(&self) -> FsResult<Vec<DirectoryEntry>> {
        let mut entries = read_entries(&self.cwd, self.settings.show_hidden)?;
        sort_dirs_first(&mut entries);
        Ok(entries)
    }

    /// Change the session directory. The target must be an existing
    /// directory; on error the current directory is unchanged.
    pub fn change_dir(&mut self, input: &str) -> FsResult<&Path> {
        let dir = resolve_dir(input, &self.cwd)?;
        tracing::debug!(from = %self.cwd.display(), to = %dir.display(), "change directory");
        self.cwd = dir;
        Ok(&self.cwd)
    }

    /// Move to the parent directory. At `/` this is a no-op.
    pub fn go_up(&mut self) -> &Path {
        if let Some(parent) = self.cwd.parent() {
            self.cwd = parent.to_path_buf();
        }
        &self.cwd
    }

    /// After a delete or move the current directory may no longer exist;
    /// fall back to its nearest existing ancestor. Returns `true` when the
    /// directory changed.
    pub(crate) fn recover_cwd(&mut self) -> bool {
        if self.cwd.is_dir() {
            return false;
        }
        let fallback = self
            .cwd
            .ancestors()
            .skip(1)
            .find(|p| p.is_dir())
            .unwrap_or_else(|| Path::new("/"))
            .to_path_buf();
        tracing::info!(lost = %self.cwd.display(), now = %fallback.display(), "current directory vanished");
        self.cwd = fallback;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings::Settings;
    use crate::fs_op::FsOpError;
    use assert_fs::prelude::*;

    #[test]
    fn listing_puts_directories_first_and_hides_dotfiles() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").touch().unwrap();
        temp.child("a_dir").create_dir_all().unwrap();
        temp.child(".hidden").touch().unwrap();
        temp.child("c_dir").create_dir_all().unwrap();

        let mut ex = Explorer::new(temp.path(), Settings::default()).unwrap();
        let names: Vec<_> = ex.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a_dir", "c_dir", "b.txt"]);

        ex.settings.show_hidden = true;
        assert_eq!(ex.list().unwrap().len(), 4);
    }

    #[test]
    fn change_dir_and_parent() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("sub/inner").create_dir_all().unwrap();
        temp.child("file").touch().unwrap();

        let mut ex = Explorer::new(temp.path(), Settings::default()).unwrap();
        ex.change_dir("sub/inner").unwrap();
        assert_eq!(ex.cwd(), temp.path().join("sub/inner"));
        ex.go_up();
        assert_eq!(ex.cwd(), temp.path().join("sub"));

        let err = ex.change_dir("../file").unwrap_err();
        assert!(matches!(err, FsOpError::Message(_)));
        let err = ex.change_dir("nope").unwrap_err();
        assert!(matches!(err, FsOpError::NotFound(_)));
        assert_eq!(ex.cwd(), temp.path().join("sub"));
    }

    #[test]
    fn go_up_at_root_stays_put() {
        let mut ex = Explorer::new("/", Settings::default()).unwrap();
        assert_eq!(ex.go_up(), Path::new("/"));
    }

    #[test]
    fn vanished_cwd_falls_back_to_ancestor() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b").create_dir_all().unwrap();
        let mut ex = Explorer::new(temp.path(), Settings::default()).unwrap();
        ex.change_dir("a/b").unwrap();
        std::fs::remove_dir_all(temp.path().join("a")).unwrap();

        assert!(ex.recover_cwd());
        assert_eq!(ex.cwd(), temp.path());
    }
}
