//! Shared fixtures for aggregator tests

use crate::artifacts::{PredictionRecord, TopPrediction};
use crate::eval::config::HIGH_CONFIDENCE_THRESHOLD;
use crate::eval::label::LabelSet;

/// Hand-build a record with a consistent probability vector: `confidence`
/// on the predicted label, the remaining mass spread evenly over the rest.
pub fn make_record(
    labels: &LabelSet,
    index: usize,
    true_label: &str,
    predicted_label: &str,
    confidence: f64,
) -> PredictionRecord {
    let n = labels.len();
    let predicted_ix = labels.index_of(predicted_label).unwrap();
    let rest = if n > 1 {
        (1.0 - confidence) / (n - 1) as f64
    } else {
        0.0
    };
    let class_probabilities: Vec<f64> = (0..n)
        .map(|i| if i == predicted_ix { confidence } else { rest })
        .collect();

    let is_correct = true_label == predicted_label;
    PredictionRecord {
        id: format!("pred_{index:05}"),
        image_url: None,
        true_label: true_label.to_string(),
        predicted_label: predicted_label.to_string(),
        confidence,
        class_probabilities,
        is_correct,
        is_high_confidence_error: !is_correct && confidence >= HIGH_CONFIDENCE_THRESHOLD,
        top_predictions: vec![TopPrediction {
            label: predicted_label.to_string(),
            probability: confidence,
        }],
    }
}
