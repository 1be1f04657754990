// src/sitemap/walker.rs
// =============================================================================
// Finds every HTML file under the site root.
//
// How it works:
// 1. walkdir descends the tree, sorted by file name so runs are repeatable
// 2. filter_entry prunes excluded directories before they are read, so
//    nothing below them is ever visited, at any depth
// 3. Only regular files ending in ".html" are kept
//
// Unreadable directories do not stop the walk. They are logged and handed
// back as WalkIssue values so the run report can count them.
// Symbolic links are not followed.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub const HTML_EXTENSION: &str = ".html";

/// A directory entry the walk had to skip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkIssue {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Result of one walk: the HTML files in traversal order, plus anything skipped
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub html_files: Vec<PathBuf>,
    pub issues: Vec<WalkIssue>,
}

pub fn find_html_files(root: &Path, excluded_dirs: &BTreeSet<String>) -> WalkOutcome {
    let mut outcome = WalkOutcome::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, excluded_dirs));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if is_html_file(&entry) {
                    outcome.html_files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf);
                warn!(path = ?path, error = %e, "skipping unreadable entry");
                outcome.issues.push(WalkIssue {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(
        files = outcome.html_files.len(),
        skipped = outcome.issues.len(),
        "directory walk finished"
    );
    outcome
}

// The root itself (depth 0) is never pruned, even if its name is excluded.
fn is_excluded(entry: &DirEntry, excluded_dirs: &BTreeSet<String>) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let excluded = entry
        .file_name()
        .to_str()
        .is_some_and(|name| excluded_dirs.contains(name));
    if excluded {
        debug!(path = %entry.path().display(), "pruning excluded directory");
    }
    excluded
}

fn is_html_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(HTML_EXTENSION))
}
