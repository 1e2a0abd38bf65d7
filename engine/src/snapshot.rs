//! Config snapshot loading.

use std::path::Path;

use ma_common::{ConfigSnapshot, Result};
use tracing::info;

/// Load a tier/badge snapshot from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<ConfigSnapshot> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let snapshot = ConfigSnapshot::from_json_str(&raw)?;

    info!(
        tiers = snapshot.tiers().len(),
        badges = snapshot.badges().len(),
        "Config snapshot loaded"
    );

    Ok(snapshot)
}

/// Load the snapshot at `path`, or an empty one when no path is configured.
pub fn load_optional(path: Option<&Path>) -> Result<ConfigSnapshot> {
    match path {
        Some(path) => load_snapshot(path),
        None => {
            tracing::warn!("No config snapshot configured; tags use palette colors only");
            Ok(ConfigSnapshot::default())
        }
    }
}
