//! Crop Advisor - crop recommendation web service
//!
//! Loads the preprocessor, classifier and label encoder artifacts once, then
//! serves the recommendation form and JSON lookups over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Serve with ./crop_advisor.toml or built-in defaults
//! cargo run --release
//!
//! # Explicit config, address and model directory
//! ./crop-advisor --config /etc/crop-advisor.toml --addr 127.0.0.1:8000 --models-dir ./models
//!
//! # Load and cross-check the artifacts without serving
//! ./crop-advisor check
//!
//! # Print the effective configuration as TOML
//! ./crop-advisor print-config
//! ```
//!
//! # Environment Variables
//!
//! - `CROP_ADVISOR_CONFIG`: Config file tried before `./crop_advisor.toml` when
//!   `--config` is not given; falls back if missing or invalid
//! - `CROP_ADVISOR_ADDR`: HTTP bind address (overrides the config file)
//! - `CROP_ADVISOR_CORS_ORIGINS`: Comma-separated origins allowed by CORS
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crop_advisor::api::{create_app, AppState};
use crop_advisor::config::{defaults, AppConfig, ConfigSource};
use crop_advisor::model::ArtifactStore;
use crop_advisor::FeatureRow;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "crop-advisor")]
#[command(about = "Crop recommendation service")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (skips the default search, fails if unreadable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:5000")
    #[arg(short, long, env = defaults::SERVER_ADDR_ENV)]
    addr: Option<String>,

    /// Override the directory holding the model artifacts
    #[arg(long, value_name = "DIR")]
    models_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Load and cross-check the model artifacts, run one sample row, then exit
    Check,
    /// Print the effective configuration as TOML
    PrintConfig,
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolve the config file, then apply CLI overrides and re-validate.
fn resolve_config(args: &CliArgs) -> Result<(AppConfig, ConfigSource)> {
    let (mut config, source) = match &args.config {
        Some(path) => {
            let config = AppConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            (config, ConfigSource::File(path.clone()))
        }
        None => AppConfig::load(),
    };

    if let Some(addr) = &args.addr {
        config.server.addr.clone_from(addr);
    }
    if let Some(dir) = &args.models_dir {
        config.artifacts.dir.clone_from(dir);
    }
    config.validate().context("Invalid configuration")?;

    Ok((config, source))
}

fn load_artifacts(config: &AppConfig) -> Result<ArtifactStore> {
    let paths = config.artifacts.paths();
    let store = ArtifactStore::load(&paths).with_context(|| {
        format!(
            "Failed to load model artifacts from {}",
            config.artifacts.dir.display()
        )
    })?;
    let fp = store.fingerprint();
    info!(
        preprocessor = %fp.preprocessor,
        classifier = %fp.classifier,
        label_encoder = %fp.label_encoder,
        "Artifact fingerprints"
    );
    Ok(store)
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_check(config: &AppConfig) -> Result<()> {
    let store = load_artifacts(config)?;
    let pipeline = store.pipeline();

    // A mid-range row exercises the whole chain end to end
    let row = FeatureRow::from_array([70.0, 72.5, 102.5, 26.0, 57.0, 6.75, 160.0]);
    let prediction = pipeline
        .predict(&row, &config.ranking)
        .context("Sample prediction failed")?;

    info!(
        classes = pipeline.encoder().len(),
        classifier = pipeline.classifier().kind(),
        sample = %prediction.crop,
        "✓ Artifacts OK"
    );
    Ok(())
}

// ============================================================================
// HTTP Server
// ============================================================================

async fn serve(config: AppConfig, cancel_token: CancellationToken) -> Result<()> {
    let store = load_artifacts(&config)?;
    let app = create_app(AppState::new(store, config.ranking));

    let addr = config.server.addr.as_str();
    info!("🌐 Starting HTTP server on {}...", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("✓ HTTP server listening on {}", addr);
    info!("🌱 Form available at: http://{}", addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await;

    match result {
        Ok(()) => {
            info!("[HttpServer] Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("[HttpServer] Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let (config, source) = resolve_config(&args)?;
    info!(source = %source, "Configuration loaded");

    match args.command {
        Some(SubCommand::Check) => return run_check(&config),
        Some(SubCommand::PrintConfig) => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        None => {}
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Crop Advisor v{}", env!("CARGO_PKG_VERSION"));
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    serve(config, cancel_token).await?;

    info!("✓ Crop Advisor shutdown complete");
    Ok(())
}
