//! Calibration engine
//!
//! Bins predictions by confidence into equal-width reliability bins and
//! computes the Expected Calibration Error:
//!
//! `ECE = Σ_bins (bin.count / total) * |bin.accuracy - bin.avg_confidence|`
//!
//! The weighting denominator is the TOTAL record count, never the per-bin
//! count, and empty bins carry zero weight, so no NaN can reach the report.

use crate::artifacts::{CalibrationBin, CalibrationReport, PredictionRecord};
use crate::error::{EvalError, EvalResult};
use crate::eval::{bin_bounds, bin_index};

struct BinAcc {
    count: u64,
    confidence_sum: f64,
    correct: u64,
}

/// Compute the calibration report with `bins` equal-width bins, last bin
/// closed at 1.0 (same boundary rule as the confidence curve).
pub fn calibration_report(
    records: &[PredictionRecord],
    bins: usize,
) -> EvalResult<CalibrationReport> {
    if records.is_empty() {
        return Err(EvalError::EmptyDataset);
    }

    let mut acc: Vec<BinAcc> = (0..bins)
        .map(|_| BinAcc {
            count: 0,
            confidence_sum: 0.0,
            correct: 0,
        })
        .collect();

    for record in records {
        let slot = &mut acc[bin_index(record.confidence, bins)];
        slot.count += 1;
        slot.confidence_sum += record.confidence;
        if record.is_correct {
            slot.correct += 1;
        }
    }

    let total = records.len() as f64;
    let mut ece = 0.0;
    let report_bins: Vec<CalibrationBin> = acc
        .into_iter()
        .enumerate()
        .map(|(i, bin)| {
            let (range_min, range_max) = bin_bounds(i, bins);
            let (avg_confidence, accuracy) = if bin.count == 0 {
                (0.0, 0.0)
            } else {
                (
                    bin.confidence_sum / bin.count as f64,
                    bin.correct as f64 / bin.count as f64,
                )
            };
            ece += (bin.count as f64 / total) * (accuracy - avg_confidence).abs();
            CalibrationBin {
                range_min,
                range_max,
                count: bin.count,
                avg_confidence,
                accuracy,
            }
        })
        .collect();

    Ok(CalibrationReport {
        bins: report_bins,
        ece,
    })
}

#[cfg(test)]
mod tests {
    use super::calibration_report;
    use crate::error::EvalError;
    use crate::eval::label::LabelSet;
    use crate::eval::test_support::make_record;

    fn two_labels() -> LabelSet {
        LabelSet::new(vec!["a".into(), "b".into()]).unwrap()
    }

    #[test]
    fn test_empty_dataset_is_error() {
        let err = calibration_report(&[], 10).unwrap_err();
        assert!(matches!(err, EvalError::EmptyDataset));
    }

    #[test]
    fn test_ece_zero_for_perfectly_calibrated_input() {
        let labels = two_labels();
        // Four records at confidence 0.75, three of them correct:
        // bin accuracy == bin mean confidence == 0.75
        let records = vec![
            make_record(&labels, 0, "a", "a", 0.75),
            make_record(&labels, 1, "a", "a", 0.75),
            make_record(&labels, 2, "a", "a", 0.75),
            make_record(&labels, 3, "a", "b", 0.75),
        ];

        let report = calibration_report(&records, 10).unwrap();
        assert!(report.ece.abs() < 1e-12);
    }

    #[test]
    fn test_ece_weighted_by_total_count() {
        let labels = two_labels();
        // Bin [0.9,1.0]: 1 record, correct, conf 0.95 → gap 0.05
        // Bin [0.5,0.6): 3 records, none correct, conf 0.55 → gap 0.55
        let records = vec![
            make_record(&labels, 0, "a", "a", 0.95),
            make_record(&labels, 1, "a", "b", 0.55),
            make_record(&labels, 2, "a", "b", 0.55),
            make_record(&labels, 3, "a", "b", 0.55),
        ];

        let report = calibration_report(&records, 10).unwrap();
        let expected = (1.0 / 4.0) * 0.05 + (3.0 / 4.0) * 0.55;
        assert!((report.ece - expected).abs() < 1e-12);
        assert!(report.ece >= 0.0 && report.ece <= 1.0);
    }

    #[test]
    fn test_empty_bins_are_zeroed_not_nan() {
        let labels = two_labels();
        let records = vec![make_record(&labels, 0, "a", "a", 0.95)];

        let report = calibration_report(&records, 10).unwrap();
        assert!(report.ece.is_finite());
        for bin in &report.bins[..9] {
            assert_eq!(bin.count, 0);
            assert_eq!(bin.avg_confidence, 0.0);
            assert_eq!(bin.accuracy, 0.0);
        }
        assert_eq!(report.bins[9].count, 1);
        assert!((report.bins[9].avg_confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_configurable_bin_count() {
        let labels = two_labels();
        let records = vec![
            make_record(&labels, 0, "a", "a", 0.2),
            make_record(&labels, 1, "a", "a", 0.8),
        ];

        let report = calibration_report(&records, 4).unwrap();
        assert_eq!(report.bins.len(), 4);
        assert_eq!(report.bins[0].count, 1);
        assert_eq!(report.bins[3].count, 1);
    }
}
