// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every argument is optional: running `sitemap-forge` with nothing else uses
// the built-in defaults (see config.rs), which is how cron usually calls it.
// Flags override values from the --config file, which override the defaults.
// =============================================================================

use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-forge",
    version,
    about = "Generate an XML sitemap (with image entries) for a static HTML site",
    long_about = "sitemap-forge walks a directory of static HTML files, collects each page's \
                  public URL and the images it references, and writes sitemap.xml into the \
                  site root, owned by the web server's account."
)]
pub struct Cli {
    /// TOML file with any of: site_root, base_url, output_path, excluded_dirs,
    /// service_account, stylesheet_href
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory that is published as the website (absolute path)
    #[arg(long, value_name = "DIR")]
    pub site_root: Option<PathBuf>,

    /// Public URL of the site root, e.g. https://example.com
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Where to write the sitemap (default: <site-root>/sitemap.xml)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory name to skip at any depth; repeat to give several.
    /// Replaces the default list.
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// User and group that will own the sitemap
    #[arg(long, value_name = "ACCOUNT")]
    pub owner: Option<String>,

    /// Href of the XSL stylesheet referenced by the sitemap
    #[arg(long, value_name = "HREF")]
    pub stylesheet: Option<String>,

    /// Only set permissions; do not chown (for runs without root)
    #[arg(long)]
    pub skip_ownership: bool,

    /// Print the sitemap to stdout instead of writing it
    #[arg(long, conflicts_with = "json")]
    pub stdout: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The flags that were actually given, as a config layer
    pub fn overrides(&self) -> Overrides {
        Overrides {
            site_root: self.site_root.clone(),
            base_url: self.base_url.clone(),
            output_path: self.output.clone(),
            excluded_dirs: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            service_account: self.owner.clone(),
            stylesheet_href: self.stylesheet.clone(),
        }
    }
}
