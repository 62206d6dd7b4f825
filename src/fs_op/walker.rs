//! Depth-first tree operations: copy, delete and search.
//!
//! All three are the same `walkdir` traversal with a different per-entry
//! action. Traversal never follows symbolic links: a link is copied as a
//! link, deleted as a link and matched by its own name, but never descended
//! into. Children are visited in file-name order so results are
//! deterministic. `walkdir` keeps its own stack of open directories, so
//! deep trees do not grow the call stack.
//!
//! Failures stop the walk at the first offending entry and report its path.
//! Nothing already copied or deleted is rolled back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use regex::Regex;
use walkdir::WalkDir;

use crate::fs_op::entry::EntryKind;
use crate::fs_op::error::{FsOpError, FsResult, IoContext};
use crate::fs_op::{copy, symlink};

/// Shared flag checked between entries. Setting it stops the running walk
/// before the next entry is touched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation so the token can guard the next operation.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn check(&self, at: &Path) -> FsResult<()> {
        if self.is_cancelled() {
            Err(FsOpError::Cancelled(at.to_path_buf()))
        } else {
            Ok(())
        }
    }
}

fn walk_error(err: walkdir::Error, root: &Path) -> FsOpError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(e) => FsOpError::from_io(path, e),
        None => FsOpError::Io {
            path,
            source: io::Error::other("filesystem loop detected"),
        },
    }
}

fn special_file(path: &Path) -> FsOpError {
    FsOpError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::Unsupported, "special files cannot be copied"),
    }
}

/// `true` when `dst` resolves to `src` itself or somewhere beneath it.
fn lands_inside(src: &Path, dst: &Path) -> FsResult<bool> {
    let src_abs = fs::canonicalize(src).at(src)?;
    let parent = dst
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    // A missing parent makes the copy fail at `create_dir` with a proper path.
    let Ok(parent_abs) = fs::canonicalize(parent) else {
        return Ok(false);
    };
    let dst_abs = match dst.file_name() {
        Some(name) => parent_abs.join(name),
        None => parent_abs,
    };
    Ok(dst_abs.starts_with(&src_abs))
}

/// Copy `src` (file, directory or symlink) to `dst`.
///
/// `dst` must not exist: copying never overwrites, and a collision fails
/// with [`FsOpError::AlreadyExists`] before anything is written. Directory
/// permission bits are replicated after the directory's children are in
/// place so read-only source directories still copy.
pub fn copy_tree(src: &Path, dst: &Path, cancel: &CancelToken) -> FsResult<()> {
    let root_md = fs::symlink_metadata(src).at(src)?;
    if fs::symlink_metadata(dst).is_ok() {
        return Err(FsOpError::AlreadyExists(dst.to_path_buf()));
    }

    match EntryKind::from_file_type(root_md.file_type()) {
        EntryKind::File => return copy::copy_file(src, dst).map(drop),
        EntryKind::Symlink => return symlink::copy_symlink(src, dst),
        EntryKind::Other => return Err(special_file(src)),
        EntryKind::Directory => {}
    }

    if lands_inside(src, dst)? {
        return Err(FsOpError::InvalidTarget {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    tracing::debug!(src = %src.display(), dst = %dst.display(), "copying tree");
    let mut created_dirs: Vec<(PathBuf, fs::Permissions)> = Vec::new();

    for item in WalkDir::new(src).follow_links(false).sort_by_file_name() {
        let item = item.map_err(|e| walk_error(e, src))?;
        cancel.check(item.path())?;

        let rel = item
            .path()
            .strip_prefix(src)
            .map_err(|e| FsOpError::Message(format!("walk escaped {}: {e}", src.display())))?;
        let target = if rel.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(rel)
        };

        match EntryKind::from_file_type(item.file_type()) {
            EntryKind::Directory => {
                fs::create_dir(&target).at(&target)?;
                let perms = item.metadata().map_err(|e| walk_error(e, src))?.permissions();
                created_dirs.push((target, perms));
            }
            EntryKind::File => {
                copy::copy_file(item.path(), &target)?;
            }
            EntryKind::Symlink => symlink::copy_symlink(item.path(), &target)?,
            EntryKind::Other => return Err(special_file(item.path())),
        }
    }

    // Deepest first, so restricting a parent never blocks fixing a child.
    for (dir, perms) in created_dirs.into_iter().rev() {
        fs::set_permissions(&dir, perms).at(&dir)?;
    }
    Ok(())
}

/// Remove a single entry without recursing.
///
/// Files and symlinks are unlinked. Directories are removed only when
/// empty; a populated directory yields [`FsOpError::DirectoryNotEmpty`] so
/// the caller can ask before calling [`delete_tree`].
pub fn remove_entry(path: &Path) -> FsResult<()> {
    let md = fs::symlink_metadata(path).at(path)?;
    if !md.is_dir() {
        return fs::remove_file(path).at(path);
    }
    match fs::remove_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if is_not_empty(&e) => Err(FsOpError::DirectoryNotEmpty(path.to_path_buf())),
        Err(e) => Err(FsOpError::from_io(path, e)),
    }
}

fn is_not_empty(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(code) if code == libc::ENOTEMPTY || code == libc::EEXIST)
}

/// Recursively delete `path`: every descendant first, then `path` itself.
pub fn delete_tree(path: &Path, cancel: &CancelToken) -> FsResult<()> {
    let md = fs::symlink_metadata(path).at(path)?;
    if !md.is_dir() {
        return fs::remove_file(path).at(path);
    }

    tracing::debug!(path = %path.display(), "deleting tree");
    for item in WalkDir::new(path)
        .follow_links(false)
        .contents_first(true)
        .sort_by_file_name()
    {
        let item = item.map_err(|e| walk_error(e, path))?;
        cancel.check(item.path())?;
        if item.file_type().is_dir() {
            fs::remove_dir(item.path()).at(item.path())?;
        } else {
            fs::remove_file(item.path()).at(item.path())?;
        }
    }
    Ok(())
}

/// Decides whether a file name is a search hit.
pub trait NameMatcher {
    fn matches(&self, name: &str) -> bool;
}

impl<F> NameMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, name: &str) -> bool {
        self(name)
    }
}

/// Case-insensitive substring match. An empty term matches every name.
#[derive(Debug, Clone)]
pub struct Substring {
    needle: String,
}

impl Substring {
    pub fn case_insensitive(term: &str) -> Self {
        Substring {
            needle: term.to_lowercase(),
        }
    }
}

impl NameMatcher for Substring {
    fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }
}

/// Regular-expression match against the file name.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(expr: &str) -> Result<Self, regex::Error> {
        Ok(Pattern(Regex::new(expr)?))
    }
}

impl NameMatcher for Pattern {
    fn matches(&self, name: &str) -> bool {
        self.0.is_match(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Lazy depth-first search results. See [`search_tree`].
pub struct SearchIter<M> {
    walk: Option<walkdir::IntoIter>,
    matcher: M,
}

impl<M: NameMatcher> Iterator for SearchIter<M> {
    type Item = SearchHit;

    fn next(&mut self) -> Option<SearchHit> {
        let walk = self.walk.as_mut()?;
        loop {
            match walk.next()? {
                Ok(item) => {
                    let hit = self.matcher.matches(&item.file_name().to_string_lossy());
                    if hit {
                        return Some(SearchHit {
                            kind: EntryKind::from_file_type(item.file_type()),
                            path: item.into_path(),
                        });
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry during search");
                }
            }
        }
    }
}

/// Walk everything below `root` and yield entries whose name matches.
///
/// Directories are descended whether or not they matched. A `root` that is
/// missing or not a directory yields nothing. A `root` that is itself a link
/// to a directory is entered; links below it are not. Unreadable
/// subdirectories are skipped. Each call walks the live filesystem again.
pub fn search_tree<M: NameMatcher>(root: &Path, matcher: M) -> SearchIter<M> {
    let walk = fs::metadata(root).is_ok_and(|md| md.is_dir()).then(|| {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
    });
    SearchIter { walk, matcher }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_entry_reports_non_empty_directory() {
        let td = tempdir().unwrap();
        let dir = td.path().join("full");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("f"), b"x").unwrap();

        let err = remove_entry(&dir).unwrap_err();
        assert!(matches!(err, FsOpError::DirectoryNotEmpty(ref p) if p == &dir));
        assert!(dir.exists());

        let empty = td.path().join("empty");
        fs::create_dir(&empty).unwrap();
        remove_entry(&empty).unwrap();
        assert!(!empty.exists());
    }

    #[test]
    fn special_file_inside_tree_fails_the_copy_at_its_path() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), b"a").unwrap();
        let fifo = src.join("pipe");
        nix::unistd::mkfifo(&fifo, nix::sys::stat::Mode::S_IRWXU).unwrap();

        let err = copy_tree(&src, &td.path().join("dst"), &CancelToken::new()).unwrap_err();
        match err {
            FsOpError::Io { path, source } => {
                assert_eq!(path, fifo);
                assert_eq!(source.kind(), io::ErrorKind::Unsupported);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = copy_tree(&fifo, &td.path().join("lone"), &CancelToken::new()).unwrap_err();
        assert!(matches!(err, FsOpError::Io { ref path, .. } if path == &fifo));
    }

    #[test]
    fn cancelled_token_stops_before_first_entry() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a"), b"a").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = copy_tree(&src, &td.path().join("dst"), &cancel).unwrap_err();
        assert!(matches!(err, FsOpError::Cancelled(_)));

        cancel.reset();
        delete_tree(&src, &cancel).unwrap();
        assert!(!src.exists());
    }

    #[test]
    fn copy_into_own_subtree_is_rejected() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        fs::create_dir_all(src.join("inner")).unwrap();

        let err = copy_tree(&src, &src.join("inner/copy"), &CancelToken::new()).unwrap_err();
        assert!(matches!(err, FsOpError::InvalidTarget { .. }));
        assert!(!src.join("inner/copy").exists());
    }

    #[test]
    fn substring_matching_ignores_case_and_empty_matches_all() {
        let m = Substring::case_insensitive("ReAd");
        assert!(m.matches("README.md"));
        assert!(!m.matches("main.rs"));
        assert!(Substring::case_insensitive("").matches("anything"));
    }

    #[test]
    fn search_on_a_file_root_yields_nothing() {
        let td = tempdir().unwrap();
        let f = td.path().join("f.txt");
        fs::write(&f, b"x").unwrap();
        assert_eq!(search_tree(&f, Substring::case_insensitive("f")).count(), 0);
        assert_eq!(search_tree(&td.path().join("missing"), |_: &str| true).count(), 0);
    }

    #[test]
    fn regex_pattern_matches_names() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("one.rs"), b"").unwrap();
        fs::write(td.path().join("two.txt"), b"").unwrap();
        let hits: Vec<_> = search_tree(td.path(), Pattern::new(r"\.rs$").unwrap()).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, td.path().join("one.rs"));
        assert_eq!(hits[0].kind, EntryKind::File);
    }
}
