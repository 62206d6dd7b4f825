//! Filesystem operations: the tree walker plus single-entry primitives.
//!
//! Everything here takes already-resolved paths and returns results; no
//! module prints, prompts or asks for confirmation.

pub mod archive;
pub mod copy;
pub mod create;
pub mod entry;
pub mod error;
pub mod mv;
pub mod path;
pub mod permissions;
pub mod symlink;
pub mod test_helpers;
pub mod walker;

pub use entry::{DirectoryEntry, EntryKind};
pub use error::{FsOpError, FsResult};
pub use walker::{copy_tree, delete_tree, remove_entry, search_tree, CancelToken, SearchHit};
