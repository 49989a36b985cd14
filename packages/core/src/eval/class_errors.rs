//! Per-class error aggregation
//!
//! One entry per label in canonical label-set order. Sorting for display
//! (worst class first and similar) is a presentation concern of the consumer.

use crate::artifacts::{ClassErrorStats, PredictionRecord};
use crate::error::EvalResult;
use crate::eval::label::LabelSet;

struct ClassAcc {
    total: u64,
    correct: u64,
    error_confidence_sum: f64,
}

/// Group records by true label and derive per-class totals, error rate, and
/// mean confidence conditioned on error.
pub fn errors_by_class(
    records: &[PredictionRecord],
    labels: &LabelSet,
) -> EvalResult<Vec<ClassErrorStats>> {
    let mut acc: Vec<ClassAcc> = (0..labels.len())
        .map(|_| ClassAcc {
            total: 0,
            correct: 0,
            error_confidence_sum: 0.0,
        })
        .collect();

    for record in records {
        let slot = &mut acc[labels.index_of(&record.true_label)?];
        slot.total += 1;
        if record.is_correct {
            slot.correct += 1;
        } else {
            slot.error_confidence_sum += record.confidence;
        }
    }

    Ok(acc
        .into_iter()
        .zip(labels.names())
        .map(|(class, name)| {
            let errors = class.total - class.correct;
            ClassErrorStats {
                class_name: name.clone(),
                total_samples: class.total,
                correct_count: class.correct,
                error_count: errors,
                error_rate: if class.total == 0 {
                    0.0
                } else {
                    errors as f64 / class.total as f64
                },
                avg_confidence_on_errors: if errors == 0 {
                    0.0
                } else {
                    class.error_confidence_sum / errors as f64
                },
            }
        })
        .collect())
}
