//! `lbxtract` binary entry point.
//!
//! Parses arguments, initializes logging, validates configuration and
//! runs the extractor over the input directory.

use anyhow::{Context, Result};
use lbxtract::{ExtractConfig, Extractor};
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

fn main() -> Result<()> {
    let config = ExtractConfig::from_args();

    // Logs go to stderr; stdout carries the per-archive report
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::from(config.log_level)).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    let extractor = Extractor::new(&config)?;
    let summary = extractor
        .run()
        .with_context(|| format!("extraction into {} failed", extractor.output_root().display()))?;

    tracing::info!(
        "processed {} archive(s): {} file(s), {} skipped",
        summary.archives,
        summary.files,
        summary.failed
    );
    Ok(())
}
