mod real;

pub use real::RealFileSystem;

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("Path given is empty string.")]
    InvalidPath,

    #[error("Path cannot be opened: {}", path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

/// One item found directly inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_directory: bool,
    /// Byte count for files, zero for directories.
    pub size: u64,
    pub accessed: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    /// Platform permission bits, opaque.
    pub permissions: u32,
}

pub trait FileSystem: Send + Sync {
    /// Immediate entries of `path`, in enumeration order.
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;

    /// All entries below `path`, children before the directory holding them.
    fn walk_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;
}
