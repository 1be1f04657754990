// src/generator.rs
// =============================================================================
// Runs the whole pipeline for one configuration.
//
// What happens here:
// 1. Walk the site root for HTML files (excluded directories pruned)
// 2. For each file: derive its public URL and scan it for images
// 3. Render every record into one XML string, in memory
// 4. Publish: write, set owner/mode, rename into place
//
// Steps 1-3 never fail. Per-page problems are logged and counted in the
// RunReport; only configuration and publishing errors stop the run.
// =============================================================================

use crate::config::SitemapConfig;
use crate::error::Result;
use crate::publish::{publish_document, OwnershipSetter};
use crate::sitemap::{self, PageRecord, WalkIssue};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// A page that is in the sitemap without images because it could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPage {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of one run, printed with --json
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub pages: usize,
    pub images: usize,
    pub failed_pages: Vec<FailedPage>,
    pub skipped_entries: Vec<WalkIssue>,
}

/// Builds one record per HTML file, in traversal order.
pub fn collect_records(config: &SitemapConfig) -> (Vec<PageRecord>, RunReport) {
    let walk = sitemap::find_html_files(&config.site_root, &config.excluded_dirs);

    let mut records = Vec::with_capacity(walk.html_files.len());
    let mut failed_pages = Vec::new();

    for path in walk.html_files {
        let Some(relative_path) = sitemap::relative_path(&config.site_root, &path) else {
            warn!(path = %path.display(), "file is outside the site root, skipping");
            continue;
        };

        let scan = sitemap::scan_page(&config.base_url, &path);
        if let sitemap::PageScan::Failed { reason } = &scan {
            failed_pages.push(FailedPage {
                path: path.clone(),
                reason: reason.clone(),
            });
        }

        records.push(PageRecord {
            public_url: sitemap::page_url(&config.base_url, &relative_path),
            relative_path,
            images: scan.images(),
        });
    }

    let report = RunReport {
        output_path: config.output_path.clone(),
        pages: records.len(),
        images: records.iter().map(|r| r.images.len()).sum(),
        failed_pages,
        skipped_entries: walk.issues,
    };
    (records, report)
}

/// Builds the sitemap document without writing anything.
pub fn generate(config: &SitemapConfig) -> (String, RunReport) {
    let (records, report) = collect_records(config);
    let document = sitemap::render_sitemap(&records, &config.stylesheet_href);
    (document, report)
}

/// Builds and publishes the sitemap.
pub fn run(config: &SitemapConfig, ownership: &dyn OwnershipSetter) -> Result<RunReport> {
    config.validate()?;
    info!(
        root = %config.site_root.display(),
        base_url = %config.base_url,
        "generating sitemap"
    );

    let (document, report) = generate(config);
    publish_document(
        &config.output_path,
        &document,
        &config.service_account,
        ownership,
    )?;

    info!(
        pages = report.pages,
        images = report.images,
        failed = report.failed_pages.len(),
        skipped = report.skipped_entries.len(),
        "sitemap complete"
    );
    Ok(report)
}
