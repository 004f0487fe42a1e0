//! Generated documents shown inside content surfaces.
//!
//! The blank page and error pages are written under the cache directory and
//! loaded by `file://` URL. When the directory is unusable the HTML is handed
//! to the surface inline instead. Either way the UI never sees the internal
//! URL: tabs showing these documents report the root placeholder.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};
use url::Url;

use crate::security::normalize_url;

pub mod codes;
mod render;

pub use codes::{error_text, is_http_error, ABORTED_CODE, CRASHED_CODE, UNKNOWN_ERROR};
pub use render::{blank_html, error_html};

/// Url shown to the UI for internal documents.
pub const ROOT_PLACEHOLDER: &str = "/";
pub const BLANK_TITLE: &str = "Blank Page";
pub const ERROR_TITLE: &str = "cannot open the page";

const BLANK_FILE: &str = "blank.html";
const ERROR_PREFIX: &str = "error-";

/// How a generated document should be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDocument {
    Url(String),
    Html(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalPage {
    Blank,
    Error,
}

impl InternalPage {
    pub fn title(self) -> &'static str {
        match self {
            Self::Blank => BLANK_TITLE,
            Self::Error => ERROR_TITLE,
        }
    }
}

#[derive(Debug)]
pub struct PageStore {
    dir: Option<PathBuf>,
    prefix: Option<String>,
    next_error: AtomicU64,
}

impl PageStore {
    /// Store rooted at `dir`. Stale error pages from earlier runs are removed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "pages directory unusable, using inline documents");
            return Self::in_memory();
        }

        let prefix = match dir_url(&dir) {
            Some(prefix) => prefix,
            None => {
                warn!(dir = %dir.display(), "pages directory has no file URL, using inline documents");
                return Self::in_memory();
            }
        };

        remove_stale_errors(&dir);

        Self {
            dir: Some(dir),
            prefix: Some(prefix),
            next_error: AtomicU64::new(0),
        }
    }

    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            dir: None,
            prefix: None,
            next_error: AtomicU64::new(0),
        }
    }

    /// `file://` prefix under which every generated page lives.
    pub fn url_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn blank(&self) -> PageDocument {
        self.write(BLANK_FILE.to_string(), blank_html())
    }

    pub fn error(&self, code: i32, text: &str, url: &str) -> PageDocument {
        let seq = self.next_error.fetch_add(1, Ordering::Relaxed);
        self.write(format!("{ERROR_PREFIX}{seq}.html"), error_html(code, text, url))
    }

    /// Classify `url` if it points at a generated document.
    pub fn classify(&self, url: &str) -> Option<InternalPage> {
        if url == "about:blank" {
            return Some(InternalPage::Blank);
        }
        let url = normalize_url(url)?;
        let rest = url.strip_prefix(self.prefix.as_deref()?)?;
        let name = rest.split(['?', '#']).next().unwrap_or(rest);
        if name.contains('/') {
            return None;
        }
        if name == BLANK_FILE {
            Some(InternalPage::Blank)
        } else if name.starts_with(ERROR_PREFIX) {
            Some(InternalPage::Error)
        } else {
            None
        }
    }

    pub fn is_internal(&self, url: &str) -> bool {
        self.classify(url).is_some()
    }

    fn write(&self, name: String, html: String) -> PageDocument {
        let Some(dir) = &self.dir else {
            return PageDocument::Html(html);
        };
        let path = dir.join(&name);
        if let Err(e) = std::fs::write(&path, &html) {
            warn!(path = %path.display(), error = %e, "failed to write page, loading inline");
            return PageDocument::Html(html);
        }
        match Url::from_file_path(&path) {
            Ok(url) => {
                debug!(page = %name, "generated page written");
                PageDocument::Url(url.to_string())
            }
            Err(()) => PageDocument::Html(html),
        }
    }
}

fn dir_url(dir: &Path) -> Option<String> {
    let absolute = std::fs::canonicalize(dir).ok()?;
    let url = Url::from_directory_path(absolute).ok()?;
    Some(url.to_string())
}

fn remove_stale_errors(dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(ERROR_PREFIX) {
            if let Err(e) = std::fs::remove_file(entry.path()) {
                debug!(path = %entry.path().display(), error = %e, "stale error page not removed");
            }
        }
    }
}
