// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Layer defaults, the optional config file, and the flags into one config
// 3. Generate the sitemap and publish it (or print it with --stdout)
// 4. Exit with proper code (0 = success, 1 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - layered run configuration
mod error;      // src/error.rs - fatal error types
mod generator;  // src/generator.rs - the walk/scan/render/publish pipeline
mod logging;    // src/logging.rs - tracing setup
mod publish;    // src/publish/ - atomic write + owner/mode
mod sitemap;    // src/sitemap/ - walking, URLs, images, XML

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{ConfigFile, Overrides, SitemapConfig};
use publish::{ModeOnly, OwnershipSetter, SystemOwnership};

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(&cli.log_level);

    let mut layers: Vec<Overrides> = Vec::new();
    if let Some(path) = &cli.config {
        let file = ConfigFile::load(path).context("loading configuration")?;
        layers.push(file.into());
    }
    layers.push(cli.overrides());
    let config = SitemapConfig::layered(layers);

    if cli.stdout {
        config.validate().context("checking configuration")?;
        let (document, _report) = generator::generate(&config);
        println!("{}", document);
        return Ok(());
    }

    let ownership: Box<dyn OwnershipSetter> = if cli.skip_ownership {
        Box::new(ModeOnly)
    } else {
        Box::new(SystemOwnership)
    };

    let report = generator::run(&config, ownership.as_ref())
        .with_context(|| format!("generating {}", config.output_path.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Sitemap successfully generated at {}", report.output_path.display());
    }
    Ok(())
}
