// src/error.rs
// =============================================================================
// Fatal errors for a sitemap run.
//
// Only failures that must stop the run live here. A page that cannot be read
// is NOT an error: it is recorded as a failed scan and the run keeps going
// (see sitemap/images.rs).
//
// Rust concepts:
// - thiserror: derives Display and Error from the #[error(...)] attributes
// - #[source]: keeps the underlying io::Error in the error chain
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitemapError {
    /// The configuration cannot be used (bad base URL, missing site root, ...)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The config file exists but could not be read
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for our schema
    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Writing or renaming the output document failed
    #[error("failed to write sitemap to {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The service account does not exist in the user or group database
    #[error("unknown {kind} '{name}' (not found in the system {kind} database)")]
    UnknownAccount { kind: &'static str, name: String },

    /// The user or group database itself could not be queried
    #[error("failed to look up {kind} '{name}'")]
    AccountLookup {
        kind: &'static str,
        name: String,
        #[source]
        source: io::Error,
    },

    /// chown/chmod was refused, usually because we are not running as root
    #[error("failed to set {what} on {path}; changing file ownership requires root or CAP_CHOWN")]
    Ownership {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SitemapError>;
