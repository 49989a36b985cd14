//! Confidence curve binner
//!
//! Buckets predictions by confidence into fixed-width bins and computes
//! per-bin accuracy. Buckets are emitted in ascending range order regardless
//! of the arrival order of the input.

use crate::artifacts::{ConfidenceCurvePoint, PredictionRecord};
use crate::error::EvalResult;
use crate::eval::{bin_bounds, bin_index};

struct BucketAcc {
    total: u64,
    correct: u64,
}

/// Compute the confidence-vs-accuracy curve with `buckets` fixed-width
/// buckets over [0,1]. The last bucket is closed at 1.0.
pub fn confidence_curve(
    records: &[PredictionRecord],
    buckets: usize,
) -> EvalResult<Vec<ConfidenceCurvePoint>> {
    let mut acc: Vec<BucketAcc> = (0..buckets)
        .map(|_| BucketAcc {
            total: 0,
            correct: 0,
        })
        .collect();

    for record in records {
        let slot = &mut acc[bin_index(record.confidence, buckets)];
        slot.total += 1;
        if record.is_correct {
            slot.correct += 1;
        }
    }

    Ok(acc
        .into_iter()
        .enumerate()
        .map(|(i, bucket)| {
            let (min, max) = bin_bounds(i, buckets);
            let accuracy = if bucket.total == 0 {
                0.0
            } else {
                bucket.correct as f64 / bucket.total as f64
            };
            ConfidenceCurvePoint {
                confidence_bucket: format!("{min:.2}-{max:.2}"),
                confidence_min: min,
                confidence_max: max,
                total_count: bucket.total,
                correct_count: bucket.correct,
                incorrect_count: bucket.total - bucket.correct,
                accuracy_in_bucket: accuracy,
            }
        })
        .collect())
}
