//! File-system collaborator.
//!
//! The handlers only need three operations: read a file, list a directory,
//! and check existence. They live behind the [`FileStore`] trait so the
//! handlers can be exercised against an in-memory store.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// Read-only file access as the handlers see it.
///
/// Paths are relative; each implementation decides what they are relative
/// to. Listing failures are reported as an empty list, not an error.
pub trait FileStore: Send + Sync {
    /// Reads the file at `path` in full.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Lists the entry names directly under `path`, in sorted order.
    /// An unreadable or missing directory yields an empty list.
    fn list(&self, path: &str) -> Vec<String>;

    /// Returns `true` if `path` names an existing file or directory.
    fn exists(&self, path: &str) -> bool;
}

/// The production store: relative paths resolved against a root directory.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStore for DiskStore {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(path))
    }

    fn list(&self, path: &str) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.root.join(path)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn exists(&self, path: &str) -> bool {
        self.root.join(path).exists()
    }
}

/// An in-memory store keyed by relative path. Used by tests and demos.
///
/// # Examples
///
/// ```
/// use minihttpd::files::{FileStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.insert("www/root.html", "<html>${links}</html>");
/// assert!(store.exists("www/root.html"));
/// assert_eq!(store.list("www"), vec!["root.html"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}")))
    }

    fn list(&self, path: &str) -> Vec<String> {
        let prefix = format!("{path}/");
        self.files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_owned)
            .collect()
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
