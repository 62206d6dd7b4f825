use std::path::Path;

use super::Explorer;
use crate::app::types::{BatchItem, DeleteOutcome};
use crate::fs_op::path::resolve_dir;
use crate::fs_op::{FsOpError, FsResult};

impl Explorer {
    /// Non-recursive delete of each item. Populated directories come back
    /// as [`FsOpError::DirectoryNotEmpty`] so the caller can confirm them
    /// one by one with [`Explorer::delete_recursive`].
    pub fn batch_delete<S: AsRef<str>>(&mut self, items: &[S]) -> Vec<BatchItem> {
        items
            .iter()
            .map(|item| {
                let name = item.as_ref().to_string();
                let result = match self.delete(&name) {
                    Ok(DeleteOutcome::Deleted { path, .. }) => Ok(path),
                    Ok(DeleteOutcome::NeedsConfirmation(path)) => Err(FsOpError::DirectoryNotEmpty(path)),
                    Err(e) => Err(e),
                };
                BatchItem { name, result }
            })
            .collect()
    }

    /// Copy each item into the existing directory `dest`.
    pub fn batch_copy<S: AsRef<str>>(&mut self, items: &[S], dest: &str) -> FsResult<Vec<BatchItem>> {
        let dest = resolve_dir(dest, self.cwd())?;
        Ok(self.each_into(items, &dest, Explorer::copy_into))
    }

    /// Move each item into the existing directory `dest`.
    pub fn batch_move<S: AsRef<str>>(&mut self, items: &[S], dest: &str) -> FsResult<Vec<BatchItem>> {
        let dest = resolve_dir(dest, self.cwd())?;
        Ok(self.each_into(items, &dest, Explorer::move_item))
    }

    fn each_into<S, F>(&mut self, items: &[S], dest: &Path, mut op: F) -> Vec<BatchItem>
    where
        S: AsRef<str>,
        F: FnMut(&mut Explorer, &str, &str) -> FsResult<std::path::PathBuf>,
    {
        let dest = dest.to_string_lossy().into_owned();
        items
            .iter()
            .map(|item| {
                let name = item.as_ref().to_string();
                let result = op(self, &name, &dest);
                if let Err(e) = &result {
                    tracing::warn!(item = %name, error = %e, "batch item failed");
                }
                BatchItem { name, result }
            })
            .collect()
    }
}
