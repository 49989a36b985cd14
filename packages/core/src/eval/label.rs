//! Fixed, ordered label set
//!
//! Canonical label order is the position in the configured list; every
//! artifact that is "per class" iterates in this order.

use crate::error::{EvalError, EvalResult};
use std::collections::HashMap;

/// CIFAR-10 class labels, the dataset the dashboard was first built around
pub const CIFAR10_LABELS: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

#[derive(Debug, Clone)]
pub struct LabelSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelSet {
    /// Build a label set from an ordered list of class names.
    /// Rejects empty lists and duplicate names.
    pub fn new(labels: Vec<String>) -> EvalResult<Self> {
        if labels.is_empty() {
            return Err(EvalError::InvalidLabelSet(
                "label set must contain at least one class".into(),
            ));
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(EvalError::InvalidLabelSet(format!(
                    "duplicate label `{label}`"
                )));
            }
        }
        Ok(LabelSet { labels, index })
    }

    pub fn cifar10() -> Self {
        let labels: Vec<String> = CIFAR10_LABELS.iter().map(|l| l.to_string()).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        LabelSet { labels, index }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Class name at a canonical index
    pub fn name(&self, index: usize) -> EvalResult<&str> {
        self.labels
            .get(index)
            .map(|s| s.as_str())
            .ok_or(EvalError::UnknownLabelIndex {
                index,
                class_count: self.labels.len(),
            })
    }

    /// Canonical index of a class name
    pub fn index_of(&self, label: &str) -> EvalResult<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| EvalError::unknown_label(label))
    }

    /// All names in canonical order
    pub fn names(&self) -> &[String] {
        &self.labels
    }
}
