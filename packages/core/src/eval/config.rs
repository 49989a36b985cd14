//! Evaluation configuration
//!
//! Single owner of every tunable in the pipeline. Components receive the
//! values they need from here explicitly; nothing re-declares the threshold
//! locally.

use crate::error::{EvalError, EvalResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Confidence at or above which a wrong prediction counts as a
/// high-confidence error. The source material disagreed between 0.7 and 0.8;
/// 0.8 is canonical here and the value stays configurable.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Ranked predictions kept per record
pub const DEFAULT_TOP_K: usize = 3;

/// Width of each confidence-curve bucket
pub const DEFAULT_CURVE_BUCKET_WIDTH: f64 = 0.1;

/// Reliability bins used for the calibration report
pub const DEFAULT_CALIBRATION_BINS: usize = 10;

/// Allowed deviation of a probability vector's sum from 1.0
pub const PROB_SUM_TOLERANCE: f64 = 1e-4;

/// Tunables for one evaluation run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvalConfig {
    pub high_confidence_threshold: f64,
    pub top_k: usize,
    pub curve_bucket_width: f64,
    pub calibration_bins: usize,
    pub model_name: String,
    pub dataset_name: String,
    /// When set, each record gets `{base}/{index:05}.png` as its image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            high_confidence_threshold: HIGH_CONFIDENCE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            curve_bucket_width: DEFAULT_CURVE_BUCKET_WIDTH,
            calibration_bins: DEFAULT_CALIBRATION_BINS,
            model_name: "unknown".to_string(),
            dataset_name: "unknown".to_string(),
            image_base_url: None,
        }
    }
}

impl EvalConfig {
    /// Number of confidence-curve buckets implied by the bucket width
    pub fn curve_buckets(&self) -> usize {
        (1.0 / self.curve_bucket_width).round() as usize
    }

    pub fn validate(&self) -> EvalResult<()> {
        if !(0.0..=1.0).contains(&self.high_confidence_threshold) {
            return Err(EvalError::InvalidConfig(format!(
                "high_confidence_threshold must be in [0,1], got {}",
                self.high_confidence_threshold
            )));
        }
        if self.top_k == 0 {
            return Err(EvalError::InvalidConfig("top_k must be at least 1".into()));
        }
        if !(self.curve_bucket_width > 0.0 && self.curve_bucket_width <= 1.0) {
            return Err(EvalError::InvalidConfig(format!(
                "curve_bucket_width must be in (0,1], got {}",
                self.curve_bucket_width
            )));
        }
        let buckets = 1.0 / self.curve_bucket_width;
        if (buckets - buckets.round()).abs() > 1e-9 {
            return Err(EvalError::InvalidConfig(format!(
                "curve_bucket_width {} does not evenly divide [0,1]",
                self.curve_bucket_width
            )));
        }
        if self.calibration_bins == 0 {
            return Err(EvalError::InvalidConfig(
                "calibration_bins must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::EvalConfig;

    #[test]
    fn test_default_config_is_valid() {
        let config = EvalConfig::default();
        config.validate().unwrap();
        assert_eq!(config.curve_buckets(), 10);
    }

    #[test]
    fn test_uneven_bucket_width_rejected() {
        let config = EvalConfig {
            curve_bucket_width: 0.3,
            ..EvalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = EvalConfig {
            high_confidence_threshold: 1.5,
            ..EvalConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
