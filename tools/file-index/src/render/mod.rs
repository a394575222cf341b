mod format;
mod page;

pub use format::{escape_html, format_name, format_size, src_from_file};
pub use page::{page_html, STYLESHEET};

use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::RenderConfig;
use crate::filesystem::{FileSystem, FileSystemError};
use crate::lister::{DirectoryLister, Listing};

pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Returned in place of a listing when no base path can be resolved.
pub const ERROR_SENTINEL: &str = "Error.";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot resolve base path: {0}")]
    Resolution(String),

    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
}

/// What to list and how to present it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRequest {
    /// Directory relative to the site root. `None` or empty lists the
    /// configured self directory.
    pub directory: Option<String>,
    /// Cap on rendered files; defaults to [`DEFAULT_MAX_ITEMS`].
    /// Directories are never capped.
    pub max_items: Option<usize>,
    pub emit_full_page: bool,
    /// Render files as well as directories. Off by default: the listing
    /// has always shown directories only.
    pub include_files: bool,
}

impl ListingRequest {
    /// Self-index of the current directory, as a full page.
    pub fn current_directory() -> Self {
        Self {
            emit_full_page: true,
            ..Self::default()
        }
    }

    pub fn for_directory(directory: impl Into<String>) -> Self {
        let directory = directory.into();
        if directory.is_empty() {
            return Self::current_directory();
        }
        Self {
            directory: Some(directory),
            ..Self::default()
        }
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn with_files(mut self, include_files: bool) -> Self {
        self.include_files = include_files;
        self
    }

    pub fn with_full_page(mut self, emit_full_page: bool) -> Self {
        self.emit_full_page = emit_full_page;
        self
    }

    pub fn max_items(&self) -> usize {
        self.max_items.unwrap_or(DEFAULT_MAX_ITEMS)
    }

    fn target(&self) -> Option<&str> {
        self.directory.as_deref().filter(|d| !d.is_empty())
    }
}

pub struct ListingRenderer<FS: FileSystem> {
    lister: DirectoryLister<FS>,
    config: RenderConfig,
}

impl<FS: FileSystem> ListingRenderer<FS> {
    pub fn new(filesystem: FS, config: RenderConfig) -> Self {
        Self {
            lister: DirectoryLister::new(filesystem),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the listing for `request`.
    ///
    /// An unresolvable base path yields [`ERROR_SENTINEL`] rather than an
    /// error; filesystem failures are returned to the caller.
    pub fn render(&self, request: &ListingRequest) -> Result<String, RenderError> {
        match self.try_render(request) {
            Err(RenderError::Resolution(reason)) => {
                warn!("Cannot resolve base path: {}", reason);
                Ok(ERROR_SENTINEL.to_string())
            }
            other => other,
        }
    }

    fn try_render(&self, request: &ListingRequest) -> Result<String, RenderError> {
        let base_path = self.base_path(request)?;
        let path = base_path.to_str().ok_or_else(|| {
            RenderError::Resolution(format!("not valid UTF-8: {}", base_path.display()))
        })?;
        info!("Rendering listing of {}", path);

        let listing = self.lister.list(path)?;
        let mut html = self.fragment(&listing, request);

        if request.emit_full_page {
            html = page_html(&html, &self.config.item_type);
        }
        Ok(html)
    }

    fn base_path(&self, request: &ListingRequest) -> Result<PathBuf, RenderError> {
        match request.target() {
            None => self.config.self_dir.clone().ok_or_else(|| {
                RenderError::Resolution("no directory to self-index".to_string())
            }),
            Some(directory) => {
                let root = self.config.roots.resolve().ok_or_else(|| {
                    RenderError::Resolution("no site root configured".to_string())
                })?;
                debug!("Resolving {} against site root {}", directory, root.display());
                Ok(resolve_directory(root, directory))
            }
        }
    }

    fn fragment(&self, listing: &Listing, request: &ListingRequest) -> String {
        let mut html = format!(
            "<article class=\"{}\">\n",
            escape_html(&self.config.css_class())
        );
        html.push_str("<ol>\n");

        for directory in &listing.directories {
            html.push_str(&format!(
                "<li><a href=\"{}/\">{}</a></li>\n",
                escape_html(&directory.name),
                escape_html(&format_name(&directory.name))
            ));
        }

        if request.include_files {
            let site_root = request.target().and(self.config.roots.resolve());
            for file in listing.files.iter().take(request.max_items()) {
                let src = match site_root {
                    Some(root) => src_from_file(&file.path, root),
                    None => file.name.clone(),
                };
                html.push_str(&format!(
                    "<li class=\"file\"><a href=\"{}\">{}</a> <small>{}</small></li>\n",
                    escape_html(&src),
                    escape_html(&file.name),
                    format_size(file.size)
                ));
            }
        }

        html.push_str("</ol>\n");
        html.push_str("</article>\n");
        html
    }
}

fn resolve_directory(root: &Path, directory: &str) -> PathBuf {
    root.join(directory.trim_start_matches('/'))
}
