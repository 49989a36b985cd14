//! Prediction record builder
//!
//! Normalizes one raw inference result (true label index plus the model's
//! softmax vector) into an immutable [`PredictionRecord`]. The predicted
//! label is the arg-max of the vector with the lowest index winning exact
//! ties, so a rerun over the same outputs reproduces the same records.

use crate::artifacts::{PredictionRecord, TopPrediction};
use crate::error::{EvalError, EvalResult};
use crate::eval::config::{EvalConfig, PROB_SUM_TOLERANCE};
use crate::eval::label::LabelSet;

pub struct RecordBuilder<'a> {
    labels: &'a LabelSet,
    config: &'a EvalConfig,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(labels: &'a LabelSet, config: &'a EvalConfig) -> Self {
        RecordBuilder { labels, config }
    }

    /// Build the record for sample `index`.
    ///
    /// `probabilities` must have one entry per class, each in [0,1], summing
    /// to 1 within tolerance; anything else is a
    /// [`EvalError::MalformedProbabilityVector`].
    pub fn build(
        &self,
        index: usize,
        true_label: usize,
        probabilities: Vec<f64>,
    ) -> EvalResult<PredictionRecord> {
        self.validate_probabilities(index, &probabilities)?;
        let true_name = self.labels.name(true_label)?.to_string();

        let predicted = argmax(&probabilities);
        let predicted_name = self.labels.name(predicted)?.to_string();
        let confidence = probabilities[predicted];

        let is_correct = true_label == predicted;
        let is_high_confidence_error =
            !is_correct && confidence >= self.config.high_confidence_threshold;

        let top_predictions = self.top_k(&probabilities)?;

        Ok(PredictionRecord {
            id: format!("pred_{index:05}"),
            image_url: self
                .config
                .image_base_url
                .as_ref()
                .map(|base| format!("{}/{index:05}.png", base.trim_end_matches('/'))),
            true_label: true_name,
            predicted_label: predicted_name,
            confidence,
            class_probabilities: probabilities,
            is_correct,
            is_high_confidence_error,
            top_predictions,
        })
    }

    fn validate_probabilities(&self, index: usize, probabilities: &[f64]) -> EvalResult<()> {
        let expected = self.labels.len();
        if probabilities.len() != expected {
            return Err(EvalError::malformed(
                index,
                format!("expected {expected} entries, got {}", probabilities.len()),
            ));
        }
        let mut sum = 0.0;
        for (i, &p) in probabilities.iter().enumerate() {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(EvalError::malformed(
                    index,
                    format!("entry {i} is {p}, outside [0,1]"),
                ));
            }
            sum += p;
        }
        if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
            return Err(EvalError::malformed(
                index,
                format!("entries sum to {sum}, expected 1.0"),
            ));
        }
        Ok(())
    }

    /// Ranked (label, probability) pairs, probability descending, label index
    /// ascending on exact ties
    fn top_k(&self, probabilities: &[f64]) -> EvalResult<Vec<TopPrediction>> {
        let mut ranked: Vec<(usize, f64)> = probabilities.iter().copied().enumerate().collect();
        // Entries are validated finite before ranking
        ranked.sort_by(|(ia, pa), (ib, pb)| {
            pb.partial_cmp(pa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ia.cmp(ib))
        });
        ranked
            .into_iter()
            .take(self.config.top_k)
            .map(|(i, p)| {
                Ok(TopPrediction {
                    label: self.labels.name(i)?.to_string(),
                    probability: p,
                })
            })
            .collect()
    }
}

/// Index of the maximum entry; the lowest index wins exact ties
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{RecordBuilder, argmax};
    use crate::error::EvalError;
    use crate::eval::config::EvalConfig;
    use crate::eval::label::LabelSet;

    fn builder_fixtures() -> (LabelSet, EvalConfig) {
        let labels = LabelSet::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        (labels, EvalConfig::default())
    }

    #[test]
    fn test_argmax_lowest_index_wins_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.3]), 1);
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), 0);
        assert_eq!(argmax(&[0.1, 0.45, 0.45]), 1);
    }

    #[test]
    fn test_build_basic_record() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);

        let record = builder.build(7, 0, vec![0.1, 0.7, 0.2]).unwrap();
        assert_eq!(record.id, "pred_00007");
        assert_eq!(record.true_label, "a");
        assert_eq!(record.predicted_label, "b");
        assert_eq!(record.confidence, 0.7);
        assert!(!record.is_correct);
        assert!(!record.is_high_confidence_error);
    }

    #[test]
    fn test_high_confidence_error_flag() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);

        let record = builder.build(0, 0, vec![0.1, 0.85, 0.05]).unwrap();
        assert!(record.is_high_confidence_error);

        // Correct predictions never carry the flag, however confident
        let record = builder.build(1, 1, vec![0.05, 0.9, 0.05]).unwrap();
        assert!(!record.is_high_confidence_error);
    }

    #[test]
    fn test_top_k_order_and_tie_break() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);

        let record = builder.build(0, 0, vec![0.25, 0.5, 0.25]).unwrap();
        let top: Vec<&str> = record
            .top_predictions
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        // 0.25 tie between "a" and "c" resolves to the lower index
        assert_eq!(top, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_top_k_truncates() {
        let labels = LabelSet::cifar10();
        let config = EvalConfig::default();
        let builder = RecordBuilder::new(&labels, &config);

        let mut probs = vec![0.0; 10];
        probs[4] = 1.0;
        let record = builder.build(0, 4, probs).unwrap();
        assert_eq!(record.top_predictions.len(), 3);
        assert_eq!(record.top_predictions[0].label, "deer");
        assert!(record.is_correct);
    }

    #[test]
    fn test_wrong_length_vector_rejected() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);

        let err = builder.build(3, 0, vec![0.5, 0.5]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::MalformedProbabilityVector { index: 3, .. }
        ));
    }

    #[test]
    fn test_bad_sum_rejected() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);
        assert!(builder.build(0, 0, vec![0.5, 0.5, 0.5]).is_err());
    }

    #[test]
    fn test_out_of_range_entry_rejected() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);
        assert!(builder.build(0, 0, vec![1.2, -0.1, -0.1]).is_err());
        assert!(builder.build(0, 0, vec![f64::NAN, 0.5, 0.5]).is_err());
    }

    #[test]
    fn test_unknown_true_label_rejected() {
        let (labels, config) = builder_fixtures();
        let builder = RecordBuilder::new(&labels, &config);
        let err = builder.build(0, 9, vec![0.2, 0.3, 0.5]).unwrap_err();
        assert!(matches!(err, EvalError::UnknownLabelIndex { index: 9, .. }));
    }

    #[test]
    fn test_image_url_from_base() {
        let (labels, mut config) = builder_fixtures();
        config.image_base_url = Some("/static/images/test/".into());
        let builder = RecordBuilder::new(&labels, &config);

        let record = builder.build(42, 0, vec![1.0, 0.0, 0.0]).unwrap();
        assert_eq!(
            record.image_url.as_deref(),
            Some("/static/images/test/00042.png")
        );
    }
}
