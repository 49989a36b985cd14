//! Persisted artifact schemas
//!
//! Every statistic the dashboard consumes is an explicit struct with field
//! names fixed at the serialization boundary (camelCase on the wire, matching
//! the visualization client's types). Artifacts are computed once per
//! evaluation run and read-only thereafter.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Single entry of a record's ranked top-k predictions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TopPrediction {
    pub label: String,
    pub probability: f64,
}

/// One evaluated test sample, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// Stable identifier, unique within a dataset version (`pred_00042`)
    pub id: String,
    /// URL of the underlying sample image, when an image base is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub true_label: String,
    pub predicted_label: String,
    /// Probability mass assigned to the predicted label
    pub confidence: f64,
    /// Full probability vector over all classes, canonical label order
    pub class_probabilities: Vec<f64>,
    pub is_correct: bool,
    /// Wrong prediction made with confidence at or above the configured threshold
    pub is_high_confidence_error: bool,
    /// Highest-probability labels, descending; ties broken by canonical label index
    pub top_predictions: Vec<TopPrediction>,
}

/// Label-indexed count matrix: `matrix[t][p]` counts records with true label
/// `t` predicted as `p`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConfusionMatrix {
    /// Class labels in the order rows and columns are indexed
    pub labels: Vec<String>,
    pub matrix: Vec<Vec<u64>>,
}

/// Single bucket of the confidence-vs-accuracy curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceCurvePoint {
    /// Human-readable bucket range, e.g. `"0.80-0.90"`
    pub confidence_bucket: String,
    pub confidence_min: f64,
    pub confidence_max: f64,
    pub total_count: u64,
    pub correct_count: u64,
    pub incorrect_count: u64,
    /// `correct / total`; 0 when the bucket is empty
    pub accuracy_in_bucket: f64,
}

/// Error statistics for a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ClassErrorStats {
    pub class_name: String,
    pub total_samples: u64,
    pub correct_count: u64,
    pub error_count: u64,
    /// `error / total`; 0 when the class has no samples
    pub error_rate: f64,
    /// Mean confidence over this class's error records only; 0 when error-free
    pub avg_confidence_on_errors: f64,
}

/// Single reliability bin of the calibration report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CalibrationBin {
    /// Inclusive lower bound of the confidence range
    pub range_min: f64,
    /// Exclusive upper bound, except the last bin which closes at 1.0
    pub range_max: f64,
    pub count: u64,
    /// Mean confidence of records in this bin; 0 when empty
    pub avg_confidence: f64,
    /// Fraction of correct records in this bin; 0 when empty
    pub accuracy: f64,
}

/// Reliability bins plus the Expected Calibration Error scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalibrationReport {
    pub bins: Vec<CalibrationBin>,
    /// `Σ (bin.count / total) * |bin.accuracy - bin.avg_confidence|`
    pub ece: f64,
}

/// Headline metrics for the dashboard's overview panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    pub model_name: String,
    pub dataset_name: String,
    pub total_samples: u64,
    pub accuracy: f64,
    /// Macro-averaged precision over all classes
    pub precision: f64,
    /// Macro-averaged recall over all classes
    pub recall: f64,
    /// Harmonic mean of the macro-averaged precision and recall
    pub f1_score: f64,
    pub avg_confidence: f64,
    /// Percentage of records correct with confidence >= threshold
    pub correct_confident: f64,
    /// Percentage of records correct with confidence < threshold
    pub correct_unsure: f64,
    /// Percentage of records wrong with confidence < threshold
    pub wrong_unsure: f64,
    /// Percentage of records wrong with confidence >= threshold. These are
    /// the dashboard's headline risk indicator.
    pub wrong_confident: f64,
    pub total_failures: u64,
}
