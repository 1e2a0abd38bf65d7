//! Member Access Engine - Main Entry Point
//!
//! Reads an evaluation request (JSON) from `MA_REQUEST_PATH` or stdin and
//! writes the evaluation report (JSON) to stdout.

use std::io::{self, Read};

use anyhow::{Context, Result};
use tracing::info;

use ma_engine::evaluate::{evaluate, EvaluationRequest};
use ma_engine::{config, observability, snapshot};

fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    observability::init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting member access evaluation"
    );

    let snapshot = snapshot::load_optional(config.snapshot_path.as_deref())
        .context("failed to load config snapshot")?;

    let raw = match &config.request_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    let request: EvaluationRequest =
        serde_json::from_str(&raw).context("invalid evaluation request")?;

    let report = evaluate(request, &snapshot);

    info!(
        profile_id = %report.profile_id,
        resources = report.decisions.len(),
        "Evaluation complete"
    );

    serde_json::to_writer_pretty(io::stdout().lock(), &report)
        .context("failed to write evaluation report")?;
    println!();

    Ok(())
}
