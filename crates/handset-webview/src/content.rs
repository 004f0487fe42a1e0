//! Serving the bundled UI through the `handset://` custom protocol.
//!
//! The trusted UI surface loads `handset://localhost/index.html`; the provider
//! maps the request path onto the UI directory so no local HTTP server is
//! needed.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Scheme registered for the bundled UI.
pub const UI_SCHEME: &str = "handset";

/// Entry document of the UI surface.
pub const UI_ENTRY_URL: &str = "handset://localhost/index.html";

/// Serves the UI bundle from its directory.
pub struct ContentProvider {
    base_dir: PathBuf,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a request path to `(mime, bytes)`.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Vec<u8>)> {
        let clean = path.split(['?', '#']).next().unwrap_or(path);
        let clean = clean.trim_start_matches('/');
        let clean = if clean.is_empty() { "index.html" } else { clean };

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            debug!(path = %clean, "content request outside UI directory refused");
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&file_path), data))
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
