use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use shipment_eta::config::Config;
use shipment_eta::logging;
use shipment_eta::metrics::{self, StartupMetrics};
use shipment_eta::model::{ModelArtifacts, Predictor};
use shipment_eta::web::{self, AppState};

#[derive(Parser)]
#[command(name = "shipment_eta")]
#[command(about = "Predict whether a shipment will reach on time")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to bind
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Classifier artifact (JSON)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Normalizer artifact (JSON)
    #[arg(long, global = true)]
    normalizer: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the artifacts and serve the web front-end (default)
    Serve,
    /// Load and validate the artifacts, then exit
    Check,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = &self.model {
            config.artifacts.model_path = model.clone();
        }
        if let Some(normalizer) = &self.normalizer {
            config.artifacts.normalizer_path = normalizer.clone();
        }
    }
}

fn load_artifacts(config: &Config) -> Result<ModelArtifacts> {
    let started = Instant::now();
    let artifacts = ModelArtifacts::load(
        &config.artifacts.model_path,
        &config.artifacts.normalizer_path,
    )
    .context("Failed to load model artifacts")?;
    StartupMetrics::record_artifacts_loaded(started.elapsed().as_secs_f64());
    Ok(artifacts)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    let _log_guard = logging::init_logging(&config.logging.dir).with_context(|| {
        format!("Failed to initialize logging in {}", config.logging.dir.display())
    })?;
    let metrics_handle = metrics::init_metrics();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let artifacts = load_artifacts(&config).inspect_err(|e| error!("{:#}", e))?;
            let state = AppState::new(Arc::new(artifacts)).with_metrics(metrics_handle);

            web::start_server(state, &config.bind_addr())
                .await
                .with_context(|| format!("Server on {} failed", config.bind_addr()))?;
            info!("Server stopped");
        }
        Commands::Check => {
            let artifacts = load_artifacts(&config)?;
            let summary = artifacts.summary();
            println!("classifier: {} ({})", summary.classifier_kind, config.artifacts.model_path.display());
            println!("normalizer: {} ({})", summary.normalizer_kind, config.artifacts.normalizer_path.display());
            if let Some(digest) = &summary.classifier_sha256 {
                println!("classifier sha256: {digest}");
            }
            if let Some(digest) = &summary.normalizer_sha256 {
                println!("normalizer sha256: {digest}");
            }
            println!("artifacts valid");
        }
    }
    Ok(())
}
