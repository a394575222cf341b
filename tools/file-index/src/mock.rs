use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};

use crate::filesystem::{DirectoryEntry, FileSystem, FileSystemError, Result};

#[derive(Debug, Clone)]
struct MockEntry {
    parent: PathBuf,
    name: String,
    is_directory: bool,
    size: u64,
    modified: DateTime<Utc>,
}

impl MockEntry {
    fn to_entry(&self) -> DirectoryEntry {
        DirectoryEntry {
            path: self.parent.join(&self.name),
            name: self.name.clone(),
            is_directory: self.is_directory,
            size: if self.is_directory { 0 } else { self.size },
            accessed: self.modified,
            modified: self.modified,
            permissions: if self.is_directory { 0o40755 } else { 0o100644 },
        }
    }
}

/// In-memory filesystem. Entries are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<Vec<MockEntry>>>,
    directories: Arc<Mutex<Vec<PathBuf>>>,
}

fn split(path: &Path) -> (PathBuf, String) {
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (parent, name)
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, size: u64, modified: DateTime<Utc>) {
        let (parent, name) = split(&path.into());
        let mut entries = self.entries.lock().unwrap();
        entries.push(MockEntry {
            parent,
            name,
            is_directory: false,
            size,
            modified,
        });
    }

    pub fn add_directory(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut directories = self.directories.lock().unwrap();
        if directories.contains(&path) {
            return;
        }
        directories.push(path.clone());

        let (parent, name) = split(&path);
        if !name.is_empty() {
            let mut entries = self.entries.lock().unwrap();
            entries.push(MockEntry {
                parent,
                name,
                is_directory: true,
                size: 0,
                modified: DateTime::default(),
            });
        }
    }

    /// Adds the `.` and `..` pseudo entries some platforms enumerate.
    pub fn add_dot_entries(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        let mut entries = self.entries.lock().unwrap();
        for name in [".", ".."] {
            entries.push(MockEntry {
                parent: dir.clone(),
                name: name.to_string(),
                is_directory: true,
                size: 0,
                modified: DateTime::default(),
            });
        }
    }

    fn ensure_directory(&self, path: &Path) -> Result<()> {
        let directories = self.directories.lock().unwrap();
        if directories.iter().any(|d| d == path) {
            Ok(())
        } else {
            Err(FileSystemError::PathNotFound {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            })
        }
    }

    fn children(&self, path: &Path) -> Vec<MockEntry> {
        let entries = self.entries.lock().unwrap();
        entries.iter().filter(|e| e.parent == path).cloned().collect()
    }

    fn walk_into(&self, path: &Path, results: &mut Vec<DirectoryEntry>) {
        for child in self.children(path) {
            if child.is_directory && child.name != "." && child.name != ".." {
                self.walk_into(&child.parent.join(&child.name), results);
            }
            results.push(child.to_entry());
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.ensure_directory(path)?;
        Ok(self.children(path).iter().map(MockEntry::to_entry).collect())
    }

    fn walk_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.ensure_directory(path)?;
        let mut results = Vec::new();
        self.walk_into(path, &mut results);
        Ok(results)
    }
}
