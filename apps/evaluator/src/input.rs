//! Raw inference input
//!
//! The driver consumes the model's test-set output as JSONL, one object per
//! sample: `{"index": 0, "trueLabel": 3, "probabilities": [0.1, ...]}`.

use failscope::{EvalError, PredictionRecord, RecordBuilder};
use failscope_types::{Result, anyhow};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrediction {
    pub index: usize,
    pub true_label: usize,
    pub probabilities: Vec<f64>,
}

/// Read raw predictions and build records.
///
/// A malformed probability vector aborts the run under `strict`; otherwise
/// the sample is excluded with a warning. A label outside the configured set
/// is always fatal, in either mode: it means model and dataset disagree on
/// the label schema.
pub fn load_records(
    path: &Path,
    builder: &RecordBuilder<'_>,
    strict: bool,
) -> Result<(Vec<PredictionRecord>, usize)> {
    let file = File::open(path).map_err(|e| anyhow!("Failed to open {}: {e}", path.display()))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| anyhow!("Failed to read line {line_no}: {e}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: RawPrediction = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(e) if strict => {
                return Err(anyhow!("Invalid input on line {line_no}: {e}"));
            }
            Err(e) => {
                tracing::warn!(line = line_no, "Skipping unparsable input line: {e}");
                skipped += 1;
                continue;
            }
        };

        match builder.build(raw.index, raw.true_label, raw.probabilities) {
            Ok(record) => records.push(record),
            Err(err @ EvalError::MalformedProbabilityVector { .. }) if !strict => {
                tracing::warn!(line = line_no, "Excluding sample: {err}");
                skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok((records, skipped))
}

/// One label per non-empty line, order defining the canonical index
pub fn load_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| anyhow!("Failed to open {}: {e}", path.display()))?;
    let mut labels = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            labels.push(trimmed.to_string());
        }
    }
    Ok(labels)
}
