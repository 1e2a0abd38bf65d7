//! Error Types

/// Errors raised while loading configuration data.
///
/// Tag normalization and access decisions never fail; only reading a
/// configuration snapshot can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
