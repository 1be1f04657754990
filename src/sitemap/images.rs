// src/sitemap/images.rs
// =============================================================================
// This module extracts image URLs from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken or partial markup still produces a tree
//
// Every <img src="..."> becomes an absolute URL anchored at the SITE ROOT,
// not at the page's own directory:
//   "https://cdn.example.com/a.png" -> unchanged
//   "/logo.png"                     -> base_url + "/logo.png"
//   "pic.jpg" (on /blog/)           -> base_url + "/pic.jpg"
// "." and ".." segments are passed through untouched.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of scanning one page. A failed page still gets a sitemap entry,
/// just without images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScan {
    Scanned(BTreeSet<String>),
    Failed { reason: String },
}

impl PageScan {
    pub fn images(&self) -> BTreeSet<String> {
        match self {
            PageScan::Scanned(images) => images.clone(),
            PageScan::Failed { .. } => BTreeSet::new(),
        }
    }
}

/// Reads one HTML file and collects its images.
///
/// Never returns an error: read and decode failures are logged and turned
/// into `PageScan::Failed`.
pub fn scan_page(base_url: &str, path: &Path) -> PageScan {
    // fs::read opens and closes the file before we start parsing
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "error reading page");
            return PageScan::Failed {
                reason: e.to_string(),
            };
        }
    };

    match String::from_utf8(bytes) {
        Ok(html) => {
            let images = extract_image_urls(&html, base_url);
            debug!(path = %path.display(), images = images.len(), "scanned page");
            PageScan::Scanned(images)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "page is not valid UTF-8");
            PageScan::Failed {
                reason: format!("invalid UTF-8: {}", e),
            }
        }
    }
}

/// Collects the absolute URL of every <img> with a non-empty src.
pub fn extract_image_urls(html: &str, base_url: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    // The selector is a constant and known to be valid
    let selector = Selector::parse("img[src]").expect("img[src] is a valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(|src| normalize_image_src(base_url, src))
        .collect()
}

pub fn normalize_image_src(base_url: &str, src: &str) -> String {
    if src.starts_with("http") {
        src.to_string()
    } else if src.starts_with('/') {
        format!("{}{}", base_url, src)
    } else {
        format!("{}/{}", base_url, src)
    }
}
