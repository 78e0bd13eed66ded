//! Logging setup.
//!
//! Installs a `tracing` subscriber writing to stderr. `RUST_LOG` takes
//! precedence; otherwise the configured log level is used.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` if set and valid, else `level`, else `error`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("error"))
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init_logging(config: &Config) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
