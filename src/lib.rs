//! fileTrek: an interactive, menu-driven file manager built around a tree
//! walker for recursive copy, delete and search.

pub mod app;
pub mod errors;
pub mod fs_op;
pub mod logging;
pub mod runner;
pub mod ui;

pub use crate::app::{Explorer, Settings};
pub use crate::fs_op::{FsOpError, FsResult};
