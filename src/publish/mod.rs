// src/publish/mod.rs
// =============================================================================
// Writes the finished document to its output path.
//
// The document is written next to the target as ".<name>.tmp", given its
// owner and mode, and only then renamed over the real path. A reader of the
// sitemap sees either the old file or the complete new one. If any step
// fails the temp file is removed and the old sitemap is left alone.
// =============================================================================

mod ownership;

pub use ownership::{ModeOnly, OwnershipSetter, SystemOwnership, OUTPUT_MODE};
#[cfg(test)]
pub use ownership::lookup_gid;

use crate::error::{Result, SitemapError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn publish_document(
    output_path: &Path,
    document: &str,
    account: &str,
    ownership: &dyn OwnershipSetter,
) -> Result<()> {
    let temp_path = temp_path_for(output_path)?;
    debug!(temp = %temp_path.display(), bytes = document.len(), "writing sitemap");

    let result = fs::write(&temp_path, document)
        .map_err(|source| SitemapError::OutputWrite {
            path: temp_path.clone(),
            source,
        })
        .and_then(|()| ownership.apply(&temp_path, account, OUTPUT_MODE))
        .and_then(|()| {
            fs::rename(&temp_path, output_path).map_err(|source| SitemapError::OutputWrite {
                path: output_path.to_path_buf(),
                source,
            })
        });

    if result.is_err() {
        // Best effort; the original error is what matters to the caller.
        let _ = fs::remove_file(&temp_path);
        return result;
    }

    info!(path = %output_path.display(), account, "sitemap published");
    Ok(())
}

fn temp_path_for(output_path: &Path) -> Result<PathBuf> {
    let name = output_path.file_name().ok_or_else(|| {
        SitemapError::Config(format!(
            "output path {} has no file name",
            output_path.display()
        ))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(output_path.with_file_name(temp_name))
}
