//! Artifact persistence
//!
//! One file per artifact under a single directory, the layout the serving
//! layer loads at startup:
//!
//! ```text
//! predictions.jsonl      one PredictionRecord per line, id order
//! confusion_matrix.json
//! confidence_curve.json
//! errors_by_class.json
//! calibration.json
//! overview.json
//! labels.json
//! ```
//!
//! Artifacts carry no timestamps or run metadata: rerunning the pipeline on
//! the same input produces byte-identical files.

use crate::artifacts::{
    CalibrationReport, ClassErrorStats, ConfidenceCurvePoint, ConfusionMatrix, OverviewMetrics,
    PredictionRecord,
};
use crate::eval::report::EvalReport;
use failscope_types::{Result, anyhow, bail};
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const PREDICTIONS_FILE: &str = "predictions.jsonl";
pub const CONFUSION_MATRIX_FILE: &str = "confusion_matrix.json";
pub const CONFIDENCE_CURVE_FILE: &str = "confidence_curve.json";
pub const ERRORS_BY_CLASS_FILE: &str = "errors_by_class.json";
pub const CALIBRATION_FILE: &str = "calibration.json";
pub const OVERVIEW_FILE: &str = "overview.json";
pub const LABELS_FILE: &str = "labels.json";

/// Reads and writes the artifact set of one evaluation run
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

/// Everything the serving layer needs, loaded back from disk
#[derive(Debug, Clone)]
pub struct StoredArtifacts {
    pub overview: OverviewMetrics,
    pub confusion: ConfusionMatrix,
    pub confidence_curve: Vec<ConfidenceCurvePoint>,
    pub errors_by_class: Vec<ClassErrorStats>,
    pub calibration: CalibrationReport,
    pub labels: Vec<String>,
    pub predictions: Vec<PredictionRecord>,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ArtifactStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a full report, creating the directory if needed
    pub fn save(&self, report: &EvalReport) -> Result<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| anyhow!("Failed to create {}: {e}", self.root.display()))?;

        self.write_json(OVERVIEW_FILE, &report.overview)?;
        self.write_json(CONFUSION_MATRIX_FILE, &report.confusion)?;
        self.write_json(CONFIDENCE_CURVE_FILE, &report.confidence_curve)?;
        self.write_json(ERRORS_BY_CLASS_FILE, &report.errors_by_class)?;
        self.write_json(CALIBRATION_FILE, &report.calibration)?;
        self.write_json(LABELS_FILE, &report.labels)?;
        self.write_jsonl(PREDICTIONS_FILE, &report.records)?;

        tracing::info!(
            dir = %self.root.display(),
            records = report.records.len(),
            "artifacts saved"
        );
        Ok(())
    }

    /// Load the full artifact set. Every file must be present: a missing
    /// artifact means the evaluation run never finished and the consumer
    /// must not serve partial data.
    pub fn load(&self) -> Result<StoredArtifacts> {
        Ok(StoredArtifacts {
            overview: self.read_json(OVERVIEW_FILE)?,
            confusion: self.read_json(CONFUSION_MATRIX_FILE)?,
            confidence_curve: self.read_json(CONFIDENCE_CURVE_FILE)?,
            errors_by_class: self.read_json(ERRORS_BY_CLASS_FILE)?,
            calibration: self.read_json(CALIBRATION_FILE)?,
            labels: self.read_json(LABELS_FILE)?,
            predictions: self.read_jsonl(PREDICTIONS_FILE)?,
        })
    }

    fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.root.join(name);
        let file = File::create(&path)
            .map_err(|e| anyhow!("Failed to create {}: {e}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| anyhow!("Failed to serialize {name}: {e}"))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn write_jsonl<T: serde::Serialize>(&self, name: &str, values: &[T]) -> Result<()> {
        let path = self.root.join(name);
        let file = File::create(&path)
            .map_err(|e| anyhow!("Failed to create {}: {e}", path.display()))?;
        let mut writer = BufWriter::new(file);
        for value in values {
            serde_json::to_writer(&mut writer, value)
                .map_err(|e| anyhow!("Failed to serialize a {name} line: {e}"))?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        if !path.exists() {
            bail!("Artifact file not found: {}", path.display());
        }
        let file =
            File::open(&path).map_err(|e| anyhow!("Failed to open {}: {e}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| anyhow!("Failed to parse {name}: {e}"))
    }

    fn read_jsonl<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            bail!("Artifact file not found: {}", path.display());
        }
        let file =
            File::open(&path).map_err(|e| anyhow!("Failed to open {}: {e}", path.display()))?;
        let mut values = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| anyhow!("Failed to read {name} line {i}: {e}"))?;
            if line.trim().is_empty() {
                continue;
            }
            values.push(
                serde_json::from_str(&line)
                    .map_err(|e| anyhow!("Failed to parse {name} line {i}: {e}"))?,
            );
        }
        Ok(values)
    }
}
