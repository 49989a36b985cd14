//! Confusion matrix aggregation
//!
//! Accumulates predictions into a labels×labels count matrix and exposes the
//! per-class sums the overview summarizer derives precision and recall from.

use crate::artifacts::{ConfusionMatrix, PredictionRecord};
use crate::error::EvalResult;
use crate::eval::label::LabelSet;

/// Build the confusion matrix `matrix[true][predicted]` over all records.
///
/// Any record naming a label outside `labels` aborts the aggregation: a
/// label-set mismatch between model and dataset would silently corrupt every
/// downstream statistic.
pub fn confusion_matrix(
    records: &[PredictionRecord],
    labels: &LabelSet,
) -> EvalResult<ConfusionMatrix> {
    let n = labels.len();
    let mut matrix = vec![vec![0u64; n]; n];

    for record in records {
        let t = labels.index_of(&record.true_label)?;
        let p = labels.index_of(&record.predicted_label)?;
        matrix[t][p] += 1;
    }

    Ok(ConfusionMatrix {
        labels: labels.names().to_vec(),
        matrix,
    })
}

impl ConfusionMatrix {
    /// Count of records with true label `t` (row sum)
    pub fn row_sum(&self, t: usize) -> u64 {
        self.matrix[t].iter().sum()
    }

    /// Count of records predicted as `p` (column sum)
    pub fn col_sum(&self, p: usize) -> u64 {
        self.matrix.iter().map(|row| row[p]).sum()
    }

    /// Diagonal entry for class `c`
    pub fn true_positives(&self, c: usize) -> u64 {
        self.matrix[c][c]
    }

    /// Total records counted
    pub fn total(&self) -> u64 {
        self.matrix.iter().flatten().sum()
    }

    /// Per-class precision `TP/(TP+FP)`, 0 when the class was never predicted
    pub fn precision(&self, c: usize) -> f64 {
        let tp = self.true_positives(c);
        let predicted = self.col_sum(c);
        if predicted == 0 {
            0.0
        } else {
            tp as f64 / predicted as f64
        }
    }

    /// Per-class recall `TP/(TP+FN)`, 0 when the class has no samples
    pub fn recall(&self, c: usize) -> f64 {
        let tp = self.true_positives(c);
        let actual = self.row_sum(c);
        if actual == 0 {
            0.0
        } else {
            tp as f64 / actual as f64
        }
    }
}
