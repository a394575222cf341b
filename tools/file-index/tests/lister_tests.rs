use file_index::{DirectoryLister, FileSystemError, ListingRenderer, ListingRequest, RealFileSystem, RenderConfig};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn create_test_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_real_listing_matches_directory_contents() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("wki")).unwrap();
    fs::create_dir(root.join("media")).unwrap();
    create_test_file(&root.join("index.html"), b"<p>index</p>");
    create_test_file(&root.join("wki").join("nested.txt"), b"nested");

    let lister = DirectoryLister::new(RealFileSystem::new());
    let listing = lister.list(root.to_str().unwrap()).unwrap();

    let listed: BTreeSet<String> = listing
        .directories
        .iter()
        .chain(listing.files.iter())
        .map(|e| e.name.clone())
        .collect();
    let actual: BTreeSet<String> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(listed, actual);
    assert!(!listed.contains(".") && !listed.contains(".."));
    assert!(listing.directories.iter().all(|e| e.is_directory && e.size == 0));

    let index = &listing.files[0];
    assert_eq!(index.name, "index.html");
    assert_eq!(index.size, 12);
    assert_eq!(index.path, root.join("index.html"));
}

#[test]
fn test_real_listing_reads_timestamps() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("old.txt");
    create_test_file(&file, b"old");

    let an_hour_ago = SystemTime::now() - Duration::from_secs(3600);
    let file_time = filetime::FileTime::from(an_hour_ago);
    filetime::set_file_times(&file, file_time, file_time).unwrap();

    let listing = DirectoryLister::new(RealFileSystem::new())
        .list(temp.path().to_str().unwrap())
        .unwrap();
    let entry = &listing.files[0];

    assert_eq!(entry.modified.timestamp(), file_time.unix_seconds());
    assert_eq!(entry.accessed.timestamp(), file_time.unix_seconds());
    assert_ne!(entry.permissions, 0);
}

#[test]
fn test_real_listing_errors() {
    let lister = DirectoryLister::new(RealFileSystem::new());

    assert!(matches!(lister.list(""), Err(FileSystemError::InvalidPath)));
    assert!(matches!(
        lister.list("/nonexistent/path"),
        Err(FileSystemError::PathNotFound { .. })
    ));

    let temp = TempDir::new().unwrap();
    let file = temp.path().join("plain.txt");
    create_test_file(&file, b"not a directory");
    assert!(matches!(
        lister.list(file.to_str().unwrap()),
        Err(FileSystemError::PathNotFound { .. })
    ));
}

#[test]
fn test_real_recursive_listing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    create_test_file(&root.join("a").join("b").join("deep.txt"), b"deep");
    create_test_file(&root.join("top.txt"), b"top");

    let listing = DirectoryLister::new(RealFileSystem::new())
        .list_recursive(root.to_str().unwrap())
        .unwrap();

    let dirs: Vec<&str> = listing.directories.iter().map(|e| e.name.as_str()).collect();
    // Children are reported before the directory holding them.
    assert_eq!(dirs, vec!["b", "a"]);

    let files: BTreeSet<&str> = listing.files.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(files, BTreeSet::from(["deep.txt", "top.txt"]));
}

#[test]
fn test_real_render_is_idempotent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("css")).unwrap();
    fs::create_dir(temp.path().join("linux")).unwrap();

    let renderer = ListingRenderer::new(
        RealFileSystem::new(),
        RenderConfig::default().with_self_dir(temp.path()),
    );
    let request = ListingRequest::current_directory();

    let first = renderer.render(&request).unwrap();
    let second = renderer.render(&request).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("<!DOCTYPE html>"));
}
