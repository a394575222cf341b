use std::collections::BTreeMap;
use std::sync::LazyLock;
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

use crate::filesystem::FileSystem;
use crate::render::{escape_html, ListingRenderer, ListingRequest};

pub const SHORTCODE_TAG: &str = "file-index";

pub const MISSING_ARGS_COMMENT: &str =
    "<!-- Missing the directory to process. [file-index dir=\"\"]-->";

static SHORTCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[file-index((?:\s[^\]]*)?)\]\s*$").expect("valid shortcode pattern")
});

static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid attribute pattern")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Invalid value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Attribute mapping handed to the `file-index` shortcode callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeArgs {
    attrs: BTreeMap<String, String>,
}

impl ShortcodeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Parses shortcode text such as `[file-index dir="wki" max="10"]`.
    /// Returns `None` when the text is not a `file-index` shortcode or
    /// carries no attributes, so the callback reports the missing directory.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = SHORTCODE_PATTERN.captures(text)?;
        let body = captures.get(1).map_or("", |m| m.as_str());

        let mut args = Self::new();
        for cap in ATTRIBUTE_PATTERN.captures_iter(body) {
            let value = cap.get(2).or_else(|| cap.get(3)).map_or("", |m| m.as_str());
            args = args.with(&cap[1], value);
        }
        if args.attrs.is_empty() {
            debug!("Shortcode has no attributes: {}", text);
            return None;
        }
        debug!("Parsed shortcode arguments: {:?}", args.attrs);
        Some(args)
    }

    pub fn to_request(&self) -> Result<ListingRequest, ArgumentError> {
        let mut request = ListingRequest::for_directory(self.get("dir").unwrap_or_default());

        if let Some(max) = self.get("max") {
            let max = max.trim().parse().map_err(|_| ArgumentError::InvalidValue {
                key: "max".to_string(),
                value: max.to_string(),
            })?;
            request = request.with_max_items(max);
        }

        if let Some(files) = self.get("files") {
            let include = match files.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                _ => {
                    return Err(ArgumentError::InvalidValue {
                        key: "files".to_string(),
                        value: files.to_string(),
                    })
                }
            };
            request = request.with_files(include);
        }

        Ok(request)
    }
}

fn comment(message: &str) -> String {
    format!("<!-- {} -->", escape_html(message).replace("--", "&#45;&#45;"))
}

/// Shortcode callback. Every failure is reported inline as an HTML comment.
pub fn invoke<FS: FileSystem>(renderer: &ListingRenderer<FS>, args: Option<&ShortcodeArgs>) -> String {
    let Some(args) = args else {
        return MISSING_ARGS_COMMENT.to_string();
    };

    let request = match args.to_request() {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected shortcode arguments: {}", e);
            return comment(&e.to_string());
        }
    };

    match renderer.render(&request) {
        Ok(html) => html,
        Err(e) => {
            warn!("Listing failed: {}", e);
            comment(&e.to_string())
        }
    }
}
