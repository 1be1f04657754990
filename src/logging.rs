// src/logging.rs
// =============================================================================
// Sets up tracing output.
//
// RUST_LOG wins when it is set; otherwise --log-level is used. Everything
// goes to stderr so --stdout and --json output on stdout stays parseable.
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
