// src/sitemap/mod.rs
// =============================================================================
// This module contains everything that builds the sitemap document.
//
// Submodules:
// - walker: finds HTML files under the site root
// - page_url: turns a file path into its public URL
// - images: pulls image URLs out of a page
// - render: writes the XML text
// =============================================================================

mod images;
mod page_url;
mod render;
mod walker;

use std::collections::BTreeSet;

pub use images::{scan_page, PageScan};
pub use page_url::{page_url, relative_path};
pub use render::render_sitemap;
pub use walker::{find_html_files, WalkIssue};

/// One discovered HTML page and the images it references.
///
/// Records are never merged: if two files map to the same URL, both appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Forward-slash path relative to the site root
    pub relative_path: String,
    pub public_url: String,
    /// Absolute image URLs, deduplicated
    pub images: BTreeSet<String>,
}
