//! Overview summarizer
//!
//! Combines global accuracy, macro-averaged precision/recall/F1, and the
//! four-way correct/wrong × confident/unsure breakdown driving the
//! dashboard's stacked risk bar. Shares the confusion matrix instead of
//! re-deriving per-class counts.

use crate::artifacts::{ConfusionMatrix, OverviewMetrics, PredictionRecord};
use crate::error::{EvalError, EvalResult};
use crate::eval::config::EvalConfig;

/// Derive the overview metrics. `matrix` must have been computed over the
/// same `records` slice.
pub fn overview(
    records: &[PredictionRecord],
    matrix: &ConfusionMatrix,
    config: &EvalConfig,
) -> EvalResult<OverviewMetrics> {
    if records.is_empty() {
        return Err(EvalError::EmptyDataset);
    }

    let total = records.len() as f64;
    let classes = matrix.labels.len();

    let mut correct = 0u64;
    let mut confidence_sum = 0.0;
    let mut correct_confident = 0u64;
    let mut correct_unsure = 0u64;
    let mut wrong_unsure = 0u64;
    let mut wrong_confident = 0u64;

    for record in records {
        confidence_sum += record.confidence;
        let confident = record.confidence >= config.high_confidence_threshold;
        match (record.is_correct, confident) {
            (true, true) => correct_confident += 1,
            (true, false) => correct_unsure += 1,
            (false, false) => wrong_unsure += 1,
            (false, true) => wrong_confident += 1,
        }
        if record.is_correct {
            correct += 1;
        }
    }

    let precision: f64 =
        (0..classes).map(|c| matrix.precision(c)).sum::<f64>() / classes as f64;
    let recall: f64 = (0..classes).map(|c| matrix.recall(c)).sum::<f64>() / classes as f64;
    let f1_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Ok(OverviewMetrics {
        model_name: config.model_name.clone(),
        dataset_name: config.dataset_name.clone(),
        total_samples: records.len() as u64,
        accuracy: correct as f64 / total,
        precision,
        recall,
        f1_score,
        avg_confidence: confidence_sum / total,
        correct_confident: 100.0 * correct_confident as f64 / total,
        correct_unsure: 100.0 * correct_unsure as f64 / total,
        wrong_unsure: 100.0 * wrong_unsure as f64 / total,
        wrong_confident: 100.0 * wrong_confident as f64 / total,
        total_failures: records.len() as u64 - correct,
    })
}
