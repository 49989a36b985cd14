//! Pipeline orchestrator
//!
//! Runs every aggregator over the same immutable record slice and bundles
//! the full artifact set of one evaluation run. Aggregators have no mutual
//! dependency; only the overview consumes the confusion matrix, so it runs
//! last.

use crate::artifacts::{
    CalibrationReport, ClassErrorStats, ConfidenceCurvePoint, ConfusionMatrix, OverviewMetrics,
    PredictionRecord,
};
use crate::error::{EvalError, EvalResult};
use crate::eval::config::EvalConfig;
use crate::eval::label::LabelSet;
use crate::eval::{calibration, class_errors, confusion, curve, overview};

/// Complete artifact set of one evaluation run, read-only once computed
#[derive(Debug, Clone)]
pub struct EvalReport {
    pub overview: OverviewMetrics,
    pub confusion: ConfusionMatrix,
    pub confidence_curve: Vec<ConfidenceCurvePoint>,
    pub errors_by_class: Vec<ClassErrorStats>,
    pub calibration: CalibrationReport,
    pub records: Vec<PredictionRecord>,
    pub labels: Vec<String>,
}

impl EvalReport {
    /// Derive every artifact from `records`.
    ///
    /// Rejects an empty record set up front so "no data" can never read as
    /// a zero-filled report downstream.
    pub fn compute(
        records: Vec<PredictionRecord>,
        labels: &LabelSet,
        config: &EvalConfig,
    ) -> EvalResult<Self> {
        if records.is_empty() {
            return Err(EvalError::EmptyDataset);
        }
        config.validate()?;

        let confusion = confusion::confusion_matrix(&records, labels)?;
        let confidence_curve = curve::confidence_curve(&records, config.curve_buckets())?;
        let errors_by_class = class_errors::errors_by_class(&records, labels)?;
        let calibration = calibration::calibration_report(&records, config.calibration_bins)?;
        let overview = overview::overview(&records, &confusion, config)?;

        tracing::info!(
            total = records.len(),
            accuracy = overview.accuracy,
            failures = overview.total_failures,
            ece = calibration.ece,
            "evaluation complete"
        );

        Ok(EvalReport {
            overview,
            confusion,
            confidence_curve,
            errors_by_class,
            calibration,
            records,
            labels: labels.names().to_vec(),
        })
    }
}
