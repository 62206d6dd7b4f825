use std::path::PathBuf;

use crate::fs_op::{EntryKind, FsOpError};

/// Result of a non-recursive delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The entry (file, link or empty directory) is gone.
    Deleted { path: PathBuf, kind: EntryKind },
    /// A populated directory: the caller must confirm before
    /// `Explorer::delete_recursive` is called.
    NeedsConfirmation(PathBuf),
}

/// One line of a batch operation's report. Items are independent: a
/// failure does not stop the rest of the batch.
#[derive(Debug)]
pub struct BatchItem {
    pub name: String,
    pub result: Result<PathBuf, FsOpError>,
}

impl BatchItem {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// The kind of batch operation chosen from the batch sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Delete,
    Copy,
    Move,
}
