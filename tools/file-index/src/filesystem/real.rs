use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use filetime::FileTime;
use log::warn;
use walkdir::WalkDir;

use super::{DirectoryEntry, FileSystem, FileSystemError, Result};

#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn open_error(path: &Path) -> impl FnOnce(io::Error) -> FileSystemError {
    let path = path.to_path_buf();
    move |source| FileSystemError::PathNotFound { path, source }
}

fn to_datetime(time: FileTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(time.unix_seconds(), time.nanoseconds()).unwrap_or_default()
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

fn build_entry(path: PathBuf, metadata: &fs::Metadata) -> DirectoryEntry {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let is_directory = metadata.is_dir();

    DirectoryEntry {
        name,
        is_directory,
        size: if is_directory { 0 } else { metadata.len() },
        accessed: to_datetime(FileTime::from_last_access_time(metadata)),
        modified: to_datetime(FileTime::from_last_modification_time(metadata)),
        permissions: permission_bits(metadata),
        path,
    }
}

impl FileSystem for RealFileSystem {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let mut results = Vec::new();

        // The handle is dropped on every return path, including `?`.
        let entries = fs::read_dir(path).map_err(open_error(path))?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let entry_path = entry.path();
            // Follow symlinks; fall back to the link itself when dangling.
            let metadata = match fs::metadata(&entry_path).or_else(|_| entry.metadata()) {
                Ok(m) => m,
                Err(e) => {
                    warn!("Skipping {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            results.push(build_entry(entry_path, &metadata));
        }

        Ok(results)
    }

    fn walk_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        // Surface an unopenable root the same way as the flat listing.
        drop(fs::read_dir(path).map_err(open_error(path))?);

        let mut results = Vec::new();

        for entry in WalkDir::new(path).min_depth(1).contents_first(true) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", path.display(), e);
                    continue;
                }
            };

            let metadata = match fs::metadata(entry.path())
                .or_else(|_| entry.metadata().map_err(io::Error::from))
            {
                Ok(m) => m,
                Err(e) => {
                    warn!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            results.push(build_entry(entry.into_path(), &metadata));
        }

        Ok(results)
    }
}
