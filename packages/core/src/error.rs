//! Error types for the evaluation pipeline

use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised while building records or aggregating metrics
#[derive(Error, Debug)]
pub enum EvalError {
    /// Input probability vector failed shape, range, or sum checks.
    /// Fatal for that record: the caller either aborts the run or excludes
    /// the record with a log line, never coerces it into a valid shape.
    #[error("Malformed probability vector for sample {index}: {reason}")]
    MalformedProbabilityVector { index: usize, reason: String },

    /// A record references a label outside the configured label set.
    /// Fatal for the whole aggregation: it signals a schema mismatch between
    /// model and dataset that would corrupt every downstream statistic.
    #[error("Unknown label `{label}`: not part of the configured label set")]
    UnknownLabel { label: String },

    /// A label index is out of range for the configured label set
    #[error("Label index {index} out of range: label set has {class_count} classes")]
    UnknownLabelIndex { index: usize, class_count: usize },

    /// Aggregation was invoked with zero records. Reported distinctly from
    /// all-zero metrics so consumers cannot mistake "no data" for perfect
    /// accuracy via vacuous truth.
    #[error("Evaluation invoked with an empty record set")]
    EmptyDataset,

    /// The label set itself is unusable (empty or duplicated names)
    #[error("Invalid label set: {0}")]
    InvalidLabelSet(String),

    /// A pipeline tunable is out of its valid range
    #[error("Invalid evaluation config: {0}")]
    InvalidConfig(String),
}

impl EvalError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        EvalError::MalformedProbabilityVector {
            index,
            reason: reason.into(),
        }
    }

    pub fn unknown_label(label: impl Into<String>) -> Self {
        EvalError::UnknownLabel {
            label: label.into(),
        }
    }
}
