use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use shipment_eta::model::{ModelArtifacts, Predictor};

/// Validate a classifier/normalizer artifact pair against the pinned feature order.
#[derive(Parser, Debug)]
#[command(name = "validate-artifacts", version, about = "Validate model artifacts before deploying them")]
struct Cli {
    /// Classifier artifact (JSON)
    model: PathBuf,

    /// Normalizer artifact (JSON)
    normalizer: PathBuf,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    match ModelArtifacts::load(&args.model, &args.normalizer) {
        Ok(artifacts) => {
            let summary = artifacts.summary();
            println!("valid ({} + {})", summary.classifier_kind, summary.normalizer_kind);
            Ok(())
        }
        Err(e) => {
            eprintln!("invalid: {e}");
            std::process::exit(1)
        }
    }
}
