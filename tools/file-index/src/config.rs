use std::path::{Path, PathBuf};

pub const DEFAULT_SUPERTYPE: &str = "file";
pub const DEFAULT_ITEM_TYPE: &str = "directory";

/// Candidate site roots, checked in order: explicit site path, install
/// root, then the hosting environment's document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteRoots {
    pub site_path: Option<PathBuf>,
    pub install_root: Option<PathBuf>,
    pub document_root: Option<PathBuf>,
}

impl SiteRoots {
    pub fn resolve(&self) -> Option<&Path> {
        self.site_path
            .as_deref()
            .or(self.install_root.as_deref())
            .or(self.document_root.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Directory listed when a request names no directory.
    pub self_dir: Option<PathBuf>,
    pub roots: SiteRoots,
    pub supertype: String,
    pub item_type: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            self_dir: None,
            roots: SiteRoots::default(),
            supertype: DEFAULT_SUPERTYPE.to_string(),
            item_type: DEFAULT_ITEM_TYPE.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn with_self_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.self_dir = Some(dir.into());
        self
    }

    pub fn with_roots(mut self, roots: SiteRoots) -> Self {
        self.roots = roots;
        self
    }

    /// CSS class for the listing container. The type token is only
    /// appended when the supertype does not already contain it.
    pub fn css_class(&self) -> String {
        if self.supertype.contains(self.item_type.as_str()) {
            self.supertype.clone()
        } else {
            format!("{} {}", self.supertype, self.item_type)
        }
    }
}
