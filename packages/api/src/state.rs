use failscope::store::{ArtifactStore, StoredArtifacts};
use failscope::{
    CalibrationReport, ClassErrorStats, ConfidenceCurvePoint, ConfusionMatrix, OverviewMetrics,
    PredictionRecord,
};
use failscope_types::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use utoipa::ToSchema;

pub type AppState = Arc<State>;

/// Largest page a single predictions request may ask for
pub const MAX_PAGE_SIZE: usize = 100;

/// Sort order for the predictions listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    ConfidenceDesc,
    ConfidenceAsc,
}

/// Filter predicates shared by the exploration and export endpoints
#[derive(Debug, Clone, Default)]
pub struct PredictionFilter {
    pub only_errors: bool,
    pub only_high_confidence_errors: bool,
    pub true_label: Option<String>,
    pub predicted_label: Option<String>,
    pub min_confidence: Option<f64>,
    pub max_confidence: Option<f64>,
}

impl PredictionFilter {
    fn matches(&self, record: &PredictionRecord) -> bool {
        if self.only_errors && record.is_correct {
            return false;
        }
        if self.only_high_confidence_errors && !record.is_high_confidence_error {
            return false;
        }
        if let Some(label) = &self.true_label {
            if record.true_label != *label {
                return false;
            }
        }
        if let Some(label) = &self.predicted_label {
            if record.predicted_label != *label {
                return false;
            }
        }
        if let Some(min) = self.min_confidence {
            if record.confidence < min {
                return false;
            }
        }
        if let Some(max) = self.max_confidence {
            if record.confidence > max {
                return false;
            }
        }
        true
    }
}

/// In-memory, read-only view over one evaluation run's artifacts.
/// Loaded once at startup; the serving layer re-derives nothing.
pub struct State {
    pub overview: OverviewMetrics,
    pub confusion: ConfusionMatrix,
    pub confidence_curve: Vec<ConfidenceCurvePoint>,
    pub errors_by_class: Vec<ClassErrorStats>,
    pub calibration: CalibrationReport,
    pub labels: Vec<String>,
    predictions: Vec<PredictionRecord>,
    by_id: HashMap<String, usize>,
}

impl State {
    /// Load every artifact from `dir`. A missing or unparsable artifact is a
    /// boot failure; the API never serves partial data.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let artifacts = ArtifactStore::new(dir.as_ref()).load()?;
        tracing::info!(
            dir = %dir.as_ref().display(),
            records = artifacts.predictions.len(),
            classes = artifacts.labels.len(),
            "artifacts loaded"
        );
        Ok(Self::from_artifacts(artifacts))
    }

    pub fn from_artifacts(artifacts: StoredArtifacts) -> Self {
        let by_id = artifacts
            .predictions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        State {
            overview: artifacts.overview,
            confusion: artifacts.confusion,
            confidence_curve: artifacts.confidence_curve,
            errors_by_class: artifacts.errors_by_class,
            calibration: artifacts.calibration,
            labels: artifacts.labels,
            predictions: artifacts.predictions,
            by_id,
        }
    }

    pub fn predictions(&self) -> &[PredictionRecord] {
        &self.predictions
    }

    pub fn prediction_by_id(&self, id: &str) -> Option<&PredictionRecord> {
        self.by_id.get(id).map(|&i| &self.predictions[i])
    }

    /// Filtered and sorted view over the record list. Confidence ties break
    /// on record id so pagination stays stable across requests and runs.
    pub fn query_predictions(
        &self,
        filter: &PredictionFilter,
        sort: SortOrder,
    ) -> Vec<&PredictionRecord> {
        let mut filtered: Vec<&PredictionRecord> = self
            .predictions
            .iter()
            .filter(|record| filter.matches(record))
            .collect();

        filtered.sort_by(|a, b| {
            let by_confidence = match sort {
                SortOrder::ConfidenceDesc => b
                    .confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(Ordering::Equal),
                SortOrder::ConfidenceAsc => a
                    .confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(Ordering::Equal),
            };
            by_confidence.then_with(|| a.id.cmp(&b.id))
        });
        filtered
    }
}
