use std::path::Path;
use log::debug;

use crate::filesystem::{DirectoryEntry, FileSystem, FileSystemError, Result};

/// Entries of one directory, partitioned by kind. Each side keeps the
/// order the filesystem enumerated them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub directories: Vec<DirectoryEntry>,
    pub files: Vec<DirectoryEntry>,
}

impl Listing {
    fn push(&mut self, entry: DirectoryEntry) {
        if entry.name == "." || entry.name == ".." {
            return;
        }
        if entry.is_directory {
            self.directories.push(entry);
        } else {
            self.files.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct DirectoryLister<FS: FileSystem> {
    filesystem: FS,
}

impl<FS: FileSystem> DirectoryLister<FS> {
    pub fn new(filesystem: FS) -> Self {
        Self { filesystem }
    }

    /// Lists the immediate entries of `path`.
    pub fn list(&self, path: &str) -> Result<Listing> {
        if path.is_empty() {
            return Err(FileSystemError::InvalidPath);
        }
        debug!("Listing directory: {}", path);

        let entries = self.filesystem.read_directory(Path::new(path))?;
        Ok(Self::partition(entries))
    }

    /// Lists every entry below `path`, children before their directory.
    pub fn list_recursive(&self, path: &str) -> Result<Listing> {
        if path.is_empty() {
            return Err(FileSystemError::InvalidPath);
        }
        debug!("Listing directory recursively: {}", path);

        let entries = self.filesystem.walk_directory(Path::new(path))?;
        Ok(Self::partition(entries))
    }

    fn partition(entries: Vec<DirectoryEntry>) -> Listing {
        let mut listing = Listing::default();
        for entry in entries {
            listing.push(entry);
        }
        debug!(
            "Found {} directories, {} files",
            listing.directories.len(),
            listing.files.len()
        );
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFileSystem;
    use chrono::Utc;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_list_partitions_in_enumeration_order() {
        let fs = MockFileSystem::new();
        fs.add_directory("/site");
        fs.add_directory("/site/zeta");
        fs.add_file("/site/b.txt", 10, Utc::now());
        fs.add_directory("/site/alpha");
        fs.add_file("/site/a.txt", 20, Utc::now());

        let lister = DirectoryLister::new(fs);
        let listing = lister.list("/site").unwrap();

        assert_eq!(names(&listing.directories), vec!["zeta", "alpha"]);
        assert_eq!(names(&listing.files), vec!["b.txt", "a.txt"]);
        assert_eq!(listing.files[1].size, 20);
        assert_eq!(listing.directories[0].size, 0);
    }

    #[test]
    fn test_list_skips_dot_entries() {
        let fs = MockFileSystem::new();
        fs.add_directory("/site");
        fs.add_dot_entries("/site");
        fs.add_directory("/site/css");

        let listing = DirectoryLister::new(fs).list("/site").unwrap();

        assert_eq!(names(&listing.directories), vec!["css"]);
        assert!(listing.files.is_empty());
    }

    #[test]
    fn test_list_empty_path_is_invalid() {
        let lister = DirectoryLister::new(MockFileSystem::new());
        assert!(matches!(lister.list(""), Err(FileSystemError::InvalidPath)));
        assert!(matches!(lister.list_recursive(""), Err(FileSystemError::InvalidPath)));
    }

    #[test]
    fn test_list_missing_path() {
        let lister = DirectoryLister::new(MockFileSystem::new());
        match lister.list("/nonexistent/path") {
            Err(FileSystemError::PathNotFound { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/path"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_list_recursive_children_first() {
        let fs = MockFileSystem::new();
        fs.add_directory("/site");
        fs.add_directory("/site/wki");
        fs.add_file("/site/wki/linux.html", 5, Utc::now());
        fs.add_file("/site/index.html", 5, Utc::now());

        let listing = DirectoryLister::new(fs).list_recursive("/site").unwrap();

        assert_eq!(names(&listing.directories), vec!["wki"]);
        assert_eq!(names(&listing.files), vec!["linux.html", "index.html"]);
        assert_eq!(listing.len(), 3);
    }
}
