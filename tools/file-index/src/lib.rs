pub mod config;
pub mod filesystem;
pub mod lister;
pub mod render;
pub mod shortcode;

pub mod mock;

pub use config::{RenderConfig, SiteRoots};
pub use filesystem::{DirectoryEntry, FileSystem, FileSystemError, RealFileSystem};
pub use lister::{DirectoryLister, Listing};
pub use render::{ListingRenderer, ListingRequest, RenderError};
pub use shortcode::{invoke, ShortcodeArgs};
