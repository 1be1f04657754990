// src/sitemap/page_url.rs
// =============================================================================
// Maps a file on disk to the public URL it is served at.
//
// Examples (base_url = "https://example.com"):
//   index.html             -> https://example.com/
//   about.html             -> https://example.com/about.html
//   blog/index.html        -> https://example.com/blog/
//   blog/2024/post.html    -> https://example.com/blog/2024/post.html
//
// Directory index pages keep their trailing slash; the site root is the base
// URL followed by exactly one slash.
// =============================================================================

use std::path::{Component, Path};

const INDEX_PAGE: &str = "index.html";

/// Path of `file` relative to `root`, with forward slashes on every platform.
/// Returns None when `file` is not under `root`.
pub fn relative_path(root: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

pub fn page_url(base_url: &str, relative: &str) -> String {
    let relative = relative.replace('\\', "/");

    // Only a whole final segment counts: "myindex.html" stays as it is.
    let clean = match relative.strip_suffix(INDEX_PAGE) {
        Some(dir) if dir.is_empty() || dir.ends_with('/') => dir,
        _ => relative.as_str(),
    };

    // "" -> "https://example.com/", "blog/" -> "https://example.com/blog/"
    format!("{}/{}", base_url, clean)
}
