//! Evaluation driver
//!
//! Reads raw per-sample inference output (true label plus softmax vector,
//! JSONL), runs the metrics pipeline, and writes the dashboard's artifact
//! set. Deterministic: the same input and flags reproduce identical files.

use clap::Parser;
use failscope::{ArtifactStore, EvalConfig, EvalReport, LabelSet, RecordBuilder};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;

#[derive(Parser, Debug)]
#[command(
    name = "failscope-evaluator",
    about = "Derive classifier failure-analysis artifacts from raw inference output"
)]
struct Args {
    /// Inference output as JSONL: {"index", "trueLabel", "probabilities"}
    #[arg(long)]
    input: PathBuf,

    /// Directory the artifact set is written to
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Label file, one class name per line in canonical order.
    /// Defaults to the CIFAR-10 labels.
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Confidence threshold separating confident from unsure predictions
    #[arg(long, default_value_t = failscope::eval::config::HIGH_CONFIDENCE_THRESHOLD)]
    threshold: f64,

    /// Ranked predictions kept per record
    #[arg(long, default_value_t = failscope::eval::config::DEFAULT_TOP_K)]
    top_k: usize,

    /// Reliability bins for the calibration report
    #[arg(long, default_value_t = failscope::eval::config::DEFAULT_CALIBRATION_BINS)]
    bins: usize,

    /// Base URL prefixed to each record's image path
    #[arg(long)]
    image_base_url: Option<String>,

    #[arg(long, default_value = "unknown")]
    model_name: String,

    #[arg(long, default_value = "unknown")]
    dataset_name: String,

    /// Abort on the first malformed input record instead of excluding it
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let labels = match &args.labels {
        Some(path) => LabelSet::new(input::load_labels(path)?)?,
        None => LabelSet::cifar10(),
    };
    tracing::info!(classes = labels.len(), "label set loaded");

    let config = EvalConfig {
        high_confidence_threshold: args.threshold,
        top_k: args.top_k,
        calibration_bins: args.bins,
        model_name: args.model_name.clone(),
        dataset_name: args.dataset_name.clone(),
        image_base_url: args.image_base_url.clone(),
        ..EvalConfig::default()
    };
    config.validate()?;

    let builder = RecordBuilder::new(&labels, &config);
    let (records, skipped) = input::load_records(&args.input, &builder, args.strict)?;
    if skipped > 0 {
        tracing::warn!(skipped, "excluded malformed input records");
    }
    tracing::info!(records = records.len(), "inference output loaded");

    let report = EvalReport::compute(records, &labels, &config)?;

    let store = ArtifactStore::new(&args.output_dir);
    store.save(&report)?;

    let overview = &report.overview;
    println!("Accuracy: {:.2}%", overview.accuracy * 100.0);
    println!("Total Failures: {}", overview.total_failures);
    println!(
        "High Confidence Errors: {:.1}%",
        overview.wrong_confident
    );
    println!("Expected Calibration Error: {:.4}", report.calibration.ece);
    println!("Artifacts saved to: {}", args.output_dir.display());

    Ok(())
}
