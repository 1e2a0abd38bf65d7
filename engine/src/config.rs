//! Engine Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tier/badge snapshot file (optional; empty snapshot otherwise)
    pub snapshot_path: Option<PathBuf>,

    /// Evaluation request file (optional; stdin otherwise)
    pub request_path: Option<PathBuf>,

    /// Log output format (default: json)
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let log_format = match env::var("MA_LOG_FORMAT").ok().as_deref() {
            None | Some("" | "json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => bail!("MA_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"),
        };

        Ok(Self {
            snapshot_path: non_empty_var("MA_SNAPSHOT_PATH").map(PathBuf::from),
            request_path: non_empty_var("MA_REQUEST_PATH").map(PathBuf::from),
            log_format,
            log_filter: env::var("MA_LOG_FILTER").unwrap_or_else(|_| "ma_engine=info".into()),
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            snapshot_path: None,
            request_path: None,
            log_format: LogFormat::Pretty,
            log_filter: "ma_engine=debug".into(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
