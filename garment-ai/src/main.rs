//! garment-ai - Garment attribute inference
//!
//! Runs one inference over an image file and prints the resulting
//! `ItemAttributeAnalysis` as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use garment_ai::{EngineConfig, InferenceEngine};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Infer garment attributes from a photograph")]
struct Args {
    /// Image file to analyze
    image: PathBuf,

    /// Config file (overrides GARMENT_AI_CONFIG and the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = garment_common::logging::init_tracing()?;

    let config = EngineConfig::load(args.config.clone()).context("Failed to load configuration")?;
    log_filter.apply(&config.logging)?;

    info!(
        "Starting garment-ai v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let engine = InferenceEngine::from_config(&config).context("Failed to build inference engine")?;

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    let filename = args
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let analysis = engine
        .infer(&image, &filename)
        .await
        .context("Attribute inference failed")?;

    let json = if args.compact {
        serde_json::to_string(&analysis)?
    } else {
        serde_json::to_string_pretty(&analysis)?
    };
    println!("{}", json);

    Ok(())
}
