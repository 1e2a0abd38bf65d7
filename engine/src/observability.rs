//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Logs go to stderr
/// so stdout stays reserved for evaluation output.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
