//! susa-aub - SUSA-navet vocational training importer
//!
//! Fetches the vocational slice of the Swedish SUSA-navet education
//! catalog, joins offering locations onto program descriptors, aggregates
//! the result into per-SSYK-code buckets, and writes the catalog artifact
//! as JSON for downstream dashboards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use susa_aub::{ImportPipeline, TomlConfig};

/// Command-line arguments for susa-aub
#[derive(Parser, Debug)]
#[command(name = "susa-aub")]
#[command(about = "SUSA-navet vocational training catalog importer")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "SUSA_AUB_CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the catalog artifact (overrides the configured path)
    #[arg(short, long, env = "SUSA_AUB_OUTPUT")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "susa_aub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting susa-aub v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let mut config =
        TomlConfig::resolve(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(output) = args.output {
        config.output_path = output;
    }

    info!("Catalog API: {}", config.base_url);
    info!("Artifact path: {}", config.output_path.display());

    let pipeline = ImportPipeline::new(&config).context("Failed to initialize import pipeline")?;
    let catalog = pipeline.run().await.context("Catalog import failed")?;

    catalog
        .save(&config.output_path)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    info!(
        buckets = catalog.bucket_count(),
        records = catalog.record_count(),
        path = %config.output_path.display(),
        "Catalog artifact written"
    );

    Ok(())
}
