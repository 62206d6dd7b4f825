//! Bounded most-recent-first history of touched files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RECENT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFiles {
    items: Vec<PathBuf>,
    #[serde(skip, default = "default_max")]
    max: usize,
}

fn default_max() -> usize {
    DEFAULT_MAX_RECENT
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_RECENT)
    }
}

impl RecentFiles {
    pub fn with_capacity(max: usize) -> Self {
        RecentFiles {
            items: Vec::new(),
            max: max.max(1),
        }
    }

    /// Record `path` as the most recent entry. A path already in the list
    /// moves to the front instead of appearing twice; the oldest entry
    /// falls off once the list is full.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.items.retain(|p| p != &path);
        self.items.insert(0, path);
        self.items.truncate(self.max);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.items.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    /// Load a history saved by [`RecentFiles::save`]. A missing file is an
    /// empty history; entries beyond `max` are dropped.
    pub fn load(path: &Path, max: usize) -> io::Result<Self> {
        let mut recent = match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<RecentFiles>(&s)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => RecentFiles::default(),
            Err(e) => return Err(e),
        };
        recent.max = max.max(1);
        recent.items.truncate(recent.max);
        Ok(recent)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let data = serde_json::to_vec_pretty(self).map_err(io::Error::other)?;
        crate::fs_op::create::write_atomic(path, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn push_dedupes_and_bounds() {
        let mut r = RecentFiles::with_capacity(3);
        for p in ["/a", "/b", "/c", "/b", "/d"] {
            r.push(p);
        }
        let got: Vec<_> = r.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(got, vec!["/d", "/b", "/c"]);
    }

    #[test]
    fn save_then_load_keeps_order() {
        let td = tempdir().unwrap();
        let file = td.path().join("state/recent.json");
        let mut r = RecentFiles::default();
        r.push("/one");
        r.push("/two");
        r.save(&file).unwrap();

        let back = RecentFiles::load(&file, 1).unwrap();
        assert_eq!(back.iter().collect::<Vec<_>>(), vec![Path::new("/two")]);
        assert_eq!(back.capacity(), 1);
    }

    #[test]
    fn missing_history_file_is_empty() {
        let td = tempdir().unwrap();
        let r = RecentFiles::load(&td.path().join("nope.json"), 10).unwrap();
        assert!(r.is_empty());
    }
}
