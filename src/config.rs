// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the generator needs is passed in as a SitemapConfig value; there
// are no global constants. Values are layered:
//
//   built-in defaults  <  TOML file (--config)  <  command-line flags
//
// The defaults match a stock Debian/Ubuntu web server layout, so running the
// binary with no arguments at all does the right thing there.
// =============================================================================

use crate::error::{Result, SitemapError};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_SITE_ROOT: &str = "/var/www/html";
pub const DEFAULT_BASE_URL: &str = "https://yourdomain.com";
pub const DEFAULT_OUTPUT_NAME: &str = "sitemap.xml";
pub const DEFAULT_SERVICE_ACCOUNT: &str = "www-data";
pub const DEFAULT_STYLESHEET_HREF: &str = "/sitemap.xsl";
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["assets", "cgi-bin", "tmp", "404", "tags", "authors"];

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapConfig {
    /// Directory that mirrors the public URL structure
    pub site_root: PathBuf,
    /// Public URL prefix, never with a trailing slash
    pub base_url: String,
    /// Where the sitemap is written
    pub output_path: PathBuf,
    /// Directory basenames pruned at any depth
    pub excluded_dirs: BTreeSet<String>,
    /// OS user (and group of the same name) that will own the output
    pub service_account: String,
    /// Site-relative href of the XSL stylesheet
    pub stylesheet_href: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        let site_root = PathBuf::from(DEFAULT_SITE_ROOT);
        Self {
            output_path: site_root.join(DEFAULT_OUTPUT_NAME),
            site_root,
            base_url: DEFAULT_BASE_URL.to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            service_account: DEFAULT_SERVICE_ACCOUNT.to_string(),
            stylesheet_href: DEFAULT_STYLESHEET_HREF.to_string(),
        }
    }
}

// Shape of the TOML file. Every key is optional; missing keys keep the
// value from the layer below.
//
// Example:
//   site_root = "/srv/www/blog"
//   base_url = "https://blog.example.org"
//   excluded_dirs = ["drafts", "tmp"]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub site_root: Option<PathBuf>,
    pub base_url: Option<String>,
    pub output_path: Option<PathBuf>,
    pub excluded_dirs: Option<Vec<String>>,
    pub service_account: Option<String>,
    pub stylesheet_href: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SitemapError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| SitemapError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// One layer of optional overrides (the config file or the CLI flags).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub site_root: Option<PathBuf>,
    pub base_url: Option<String>,
    pub output_path: Option<PathBuf>,
    pub excluded_dirs: Option<Vec<String>>,
    pub service_account: Option<String>,
    pub stylesheet_href: Option<String>,
}

impl From<ConfigFile> for Overrides {
    fn from(file: ConfigFile) -> Self {
        Self {
            site_root: file.site_root,
            base_url: file.base_url,
            output_path: file.output_path,
            excluded_dirs: file.excluded_dirs,
            service_account: file.service_account,
            stylesheet_href: file.stylesheet_href,
        }
    }
}

impl SitemapConfig {
    /// Applies layers in order. The output path follows the final site root
    /// unless some layer set it explicitly.
    pub fn layered(layers: impl IntoIterator<Item = Overrides>) -> Self {
        let mut config = Self::default();
        let mut explicit_output = None;

        for layer in layers {
            if let Some(root) = layer.site_root {
                config.site_root = root;
            }
            if let Some(base) = layer.base_url {
                config.base_url = base;
            }
            if let Some(output) = layer.output_path {
                explicit_output = Some(output);
            }
            if let Some(dirs) = layer.excluded_dirs {
                config.excluded_dirs = dirs.into_iter().collect();
            }
            if let Some(account) = layer.service_account {
                config.service_account = account;
            }
            if let Some(href) = layer.stylesheet_href {
                config.stylesheet_href = href;
            }
        }

        config.output_path =
            explicit_output.unwrap_or_else(|| config.site_root.join(DEFAULT_OUTPUT_NAME));
        config.base_url = normalize_base_url(&config.base_url);
        config
    }

    /// Checks everything that can be checked before touching the tree.
    pub fn validate(&self) -> Result<()> {
        if !self.site_root.is_absolute() {
            return Err(SitemapError::Config(format!(
                "site root must be an absolute path, got {}",
                self.site_root.display()
            )));
        }
        if !self.site_root.is_dir() {
            return Err(SitemapError::Config(format!(
                "site root {} is not a directory",
                self.site_root.display()
            )));
        }

        let parsed = Url::parse(&self.base_url)
            .map_err(|e| SitemapError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SitemapError::Config(format!(
                "base URL must use http or https, got '{}'",
                self.base_url
            )));
        }
        if self.base_url.ends_with('/') {
            return Err(SitemapError::Config(format!(
                "base URL must not end with '/', got '{}'",
                self.base_url
            )));
        }

        if self.service_account.trim().is_empty() {
            return Err(SitemapError::Config("service account must not be empty".to_string()));
        }
        if self.excluded_dirs.iter().any(|d| d.is_empty() || d.contains('/')) {
            return Err(SitemapError::Config(
                "excluded directories must be bare directory names".to_string(),
            ));
        }
        Ok(())
    }
}

// "https://example.com/" -> "https://example.com"
fn normalize_base_url(base: &str) -> String {
    let trimmed = base.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_layout() {
        let config = SitemapConfig::default();
        assert_eq!(config.output_path, PathBuf::from("/var/www/html/sitemap.xml"));
        assert!(config.excluded_dirs.contains("cgi-bin"));
        assert_eq!(config.excluded_dirs.len(), 6);
        assert_eq!(config.service_account, "www-data");
    }

    #[test]
    fn test_output_follows_site_root() {
        let config = SitemapConfig::layered([Overrides {
            site_root: Some(PathBuf::from("/srv/site")),
            ..Default::default()
        }]);
        assert_eq!(config.output_path, PathBuf::from("/srv/site/sitemap.xml"));
    }

    #[test]
    fn test_later_layer_wins() {
        let file = Overrides {
            base_url: Some("https://file.example".to_string()),
            output_path: Some(PathBuf::from("/tmp/from-file.xml")),
            ..Default::default()
        };
        let cli = Overrides {
            base_url: Some("https://cli.example/".to_string()),
            ..Default::default()
        };
        let config = SitemapConfig::layered([file, cli]);
        assert_eq!(config.base_url, "https://cli.example");
        assert_eq!(config.output_path, PathBuf::from("/tmp/from-file.xml"));
    }

    #[test]
    fn test_parse_config_file() {
        let file = ConfigFile::parse(
            r#"
            site_root = "/srv/www"
            excluded_dirs = ["drafts"]
            "#,
        )
        .unwrap();
        let config = SitemapConfig::layered([file.into()]);
        assert_eq!(config.site_root, PathBuf::from("/srv/www"));
        assert_eq!(config.excluded_dirs.len(), 1);
        assert!(config.excluded_dirs.contains("drafts"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFile::parse("site_dir = \"/srv\"").is_err());
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SitemapConfig::layered([Overrides {
            site_root: Some(dir.path().to_path_buf()),
            ..Default::default()
        }]);
        assert!(config.validate().is_ok());

        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://example.com".to_string();
        config.site_root = PathBuf::from("relative/root");
        assert!(config.validate().is_err());
    }
}
