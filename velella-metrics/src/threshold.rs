//! Threshold grids for binned metrics.
//!
//! A [`Thresholds`] grid is an immutable, strictly increasing sequence of
//! decision cutoffs in `[0, 1]` that always starts at 0 and ends at 1. Scores
//! are mapped onto the grid with [`Thresholds::rank`] (how many cutoffs a
//! score reaches) and [`Thresholds::quantize_down`] (the largest cutoff not
//! exceeding a score).

use velella_core::{Result, VelellaError};

/// Number of evenly spaced thresholds used when no grid is specified.
pub const DEFAULT_NUM_THRESHOLDS: usize = 100;

/// How to build a threshold grid.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdSpec {
    /// `Count(k)` produces k evenly spaced values over `[0, 1]` inclusive.
    Count(usize),
    /// An explicit ascending sequence, validated as-is.
    Explicit(Vec<f64>),
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        ThresholdSpec::Count(DEFAULT_NUM_THRESHOLDS)
    }
}

/// A validated threshold grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    values: Vec<f64>,
}

impl Thresholds {
    /// Build a grid from a spec.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the count is below 2, or if an explicit
    /// sequence has fewer than 2 values, is not strictly increasing, leaves
    /// `[0, 1]`, or does not start at 0 and end at 1.
    pub fn new(spec: &ThresholdSpec) -> Result<Self> {
        match spec {
            ThresholdSpec::Count(k) => {
                if *k < 2 {
                    return Err(VelellaError::Config(format!(
                        "threshold count must be at least 2, got {}",
                        k
                    )));
                }
                let step = (*k - 1) as f64;
                let values = (0..*k).map(|i| i as f64 / step).collect();
                Ok(Self { values })
            }
            ThresholdSpec::Explicit(values) => {
                if values.len() < 2 {
                    return Err(VelellaError::Config(format!(
                        "threshold grid must have at least 2 values, got {}",
                        values.len()
                    )));
                }
                for pair in values.windows(2) {
                    if pair[1] <= pair[0] {
                        return Err(VelellaError::Config(
                            "threshold values must be strictly increasing".into(),
                        ));
                    }
                }
                if values.iter().any(|v| !(0.0..=1.0).contains(v)) {
                    return Err(VelellaError::Config(
                        "threshold values must lie in [0, 1]".into(),
                    ));
                }
                if values[0] != 0.0 {
                    return Err(VelellaError::Config(
                        "first threshold value must be 0".into(),
                    ));
                }
                if *values.last().unwrap() != 1.0 {
                    return Err(VelellaError::Config(
                        "last threshold value must be 1".into(),
                    ));
                }
                Ok(Self {
                    values: values.clone(),
                })
            }
        }
    }

    /// Number of thresholds in the grid.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a validated grid holds at least 2 values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The threshold values, ascending.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Count of thresholds less than or equal to `score`.
    ///
    /// A sample reaches bin `k` (its score is at or above `t_k`) exactly when
    /// `k < rank(score)`; a score equal to a threshold counts as reaching it.
    #[inline]
    pub fn rank(&self, score: f64) -> usize {
        self.values.partition_point(|&t| t <= score)
    }

    /// The largest threshold not exceeding `score`.
    ///
    /// Assumes `score` is in `[0, 1]`; a score below 0 maps to the first
    /// threshold rather than panicking.
    #[inline]
    pub fn quantize_down(&self, score: f64) -> f64 {
        self.values[self.rank(score).saturating_sub(1)]
    }
}
