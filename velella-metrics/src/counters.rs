//! Per-bin counter state and the two strategies that populate it.
//!
//! A [`BinnedCounts`] holds true-positive, false-positive, and
//! false-negative counts for every (class, bin) pair. Counts only ever grow:
//! updates add batch increments, and states from independent accumulators
//! merge by elementwise summation, so the final numbers are independent of
//! how a dataset was partitioned or in which order partial states arrive.

use std::str::FromStr;

use velella_core::{Mergeable, Result, VelellaError};

use crate::threshold::Thresholds;

/// Strategy used to turn a batch into per-bin count increments.
///
/// Both strategies produce bit-identical counts; they differ only in how
/// much transient memory the update allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optimization {
    /// Materialize the whole batch's threshold-reach indicator for every
    /// (sample, class) pair, then reduce over the batch dimension. Transient
    /// memory is O(batch x classes x bins).
    Vectorized,
    /// Walk the batch one class at a time through a rank histogram, keeping
    /// transient memory at O(bins) regardless of batch size.
    MemoryConserving,
}

impl Default for Optimization {
    fn default() -> Self {
        Optimization::Vectorized
    }
}

impl FromStr for Optimization {
    type Err = VelellaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vectorized" => Ok(Optimization::Vectorized),
            "memory-conserving" => Ok(Optimization::MemoryConserving),
            other => Err(VelellaError::Config(format!(
                "unknown optimization strategy: expected 'vectorized' or 'memory-conserving', got '{}'",
                other
            ))),
        }
    }
}

/// Per-bin true-positive / false-positive / false-negative counts.
///
/// Storage is row-major by class: the count for class `c` at bin `k` lives
/// at `c * num_bins + k`. For class `c` and bin threshold `t_k`, a sample
/// with score `p` and true label `y` contributes to `tp` if `y` is positive
/// and `p >= t_k`, to `fn` if `y` is positive and `p < t_k`, and to `fp` if
/// `y` is negative and `p >= t_k`. True negatives are never stored; they are
/// not needed for precision or recall.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinnedCounts {
    tp: Vec<u64>,
    fp: Vec<u64>,
    fne: Vec<u64>,
    num_classes: usize,
    num_bins: usize,
}

impl BinnedCounts {
    /// Create a zeroed counter block for `num_classes` classes over
    /// `num_bins` thresholds.
    pub fn new(num_classes: usize, num_bins: usize) -> Self {
        Self {
            tp: vec![0; num_classes * num_bins],
            fp: vec![0; num_classes * num_bins],
            fne: vec![0; num_classes * num_bins],
            num_classes,
            num_bins,
        }
    }

    /// Number of classes (or labels, or tasks).
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Number of threshold bins.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// True-positive counts for one class, indexed by bin.
    pub fn tp_row(&self, class: usize) -> &[u64] {
        &self.tp[class * self.num_bins..][..self.num_bins]
    }

    /// False-positive counts for one class, indexed by bin.
    pub fn fp_row(&self, class: usize) -> &[u64] {
        &self.fp[class * self.num_bins..][..self.num_bins]
    }

    /// False-negative counts for one class, indexed by bin.
    pub fn fn_row(&self, class: usize) -> &[u64] {
        &self.fne[class * self.num_bins..][..self.num_bins]
    }

    /// Add one batch into the counters.
    ///
    /// `scores` is row-major `(num_samples, num_classes)`; `positive(i, c)`
    /// reports whether sample `i` is a true instance of class `c`.
    ///
    /// # Errors
    ///
    /// Returns a `Shape` error if `scores` does not hold exactly
    /// `num_samples * num_classes` values.
    pub fn update<F>(
        &mut self,
        scores: &[f64],
        num_samples: usize,
        thresholds: &Thresholds,
        positive: F,
        strategy: Optimization,
    ) -> Result<()>
    where
        F: Fn(usize, usize) -> bool,
    {
        if scores.len() != num_samples * self.num_classes {
            return Err(VelellaError::Shape(format!(
                "scores holds {} values, expected {} samples x {} classes",
                scores.len(),
                num_samples,
                self.num_classes
            )));
        }
        match strategy {
            Optimization::Vectorized => {
                self.update_vectorized(scores, num_samples, thresholds, positive)
            }
            Optimization::MemoryConserving => {
                self.update_memory_conserving(scores, num_samples, thresholds, positive)
            }
        }
        Ok(())
    }

    /// One-hot style path: build the full (sample, class, bin) reach
    /// indicator, then collapse the batch dimension into the counters.
    fn update_vectorized<F>(
        &mut self,
        scores: &[f64],
        num_samples: usize,
        thresholds: &Thresholds,
        positive: F,
    ) where
        F: Fn(usize, usize) -> bool,
    {
        let nb = self.num_bins;
        let nc = self.num_classes;

        let mut reach = vec![0u8; num_samples * nc * nb];
        for (cell, &score) in reach.chunks_exact_mut(nb).zip(scores.iter()) {
            let rank = thresholds.rank(score);
            for flag in &mut cell[..rank] {
                *flag = 1;
            }
        }

        for i in 0..num_samples {
            for c in 0..nc {
                let row = &reach[(i * nc + c) * nb..][..nb];
                let base = c * nb;
                if positive(i, c) {
                    for (k, &flag) in row.iter().enumerate() {
                        self.tp[base + k] += u64::from(flag);
                        self.fne[base + k] += u64::from(1 - flag);
                    }
                } else {
                    for (k, &flag) in row.iter().enumerate() {
                        self.fp[base + k] += u64::from(flag);
                    }
                }
            }
        }
    }

    /// Per-class path: histogram each sample's rank, then turn suffix sums
    /// of the histogram into per-bin increments.
    fn update_memory_conserving<F>(
        &mut self,
        scores: &[f64],
        num_samples: usize,
        thresholds: &Thresholds,
        positive: F,
    ) where
        F: Fn(usize, usize) -> bool,
    {
        let nb = self.num_bins;
        let nc = self.num_classes;

        let mut pos_hist = vec![0u64; nb + 1];
        let mut neg_hist = vec![0u64; nb + 1];
        for c in 0..nc {
            pos_hist.fill(0);
            neg_hist.fill(0);
            for i in 0..num_samples {
                let rank = thresholds.rank(scores[i * nc + c]);
                if positive(i, c) {
                    pos_hist[rank] += 1;
                } else {
                    neg_hist[rank] += 1;
                }
            }

            // Bin k is reached by every sample whose rank exceeds k
            let total_pos: u64 = pos_hist.iter().sum();
            let base = c * nb;
            let mut pos_reach = 0u64;
            let mut neg_reach = 0u64;
            for k in (0..nb).rev() {
                pos_reach += pos_hist[k + 1];
                neg_reach += neg_hist[k + 1];
                self.tp[base + k] += pos_reach;
                self.fp[base + k] += neg_reach;
                self.fne[base + k] += total_pos - pos_reach;
            }
        }
    }
}

impl Mergeable for BinnedCounts {
    fn merge(&mut self, donor: Self) -> Result<()> {
        if self.num_classes != donor.num_classes || self.num_bins != donor.num_bins {
            return Err(VelellaError::Shape(format!(
                "cannot merge counters shaped ({}, {}) and ({}, {})",
                self.num_classes, self.num_bins, donor.num_classes, donor.num_bins
            )));
        }
        for (a, b) in self.tp.iter_mut().zip(donor.tp.iter()) {
            *a += b;
        }
        for (a, b) in self.fp.iter_mut().zip(donor.fp.iter()) {
            *a += b;
        }
        for (a, b) in self.fne.iter_mut().zip(donor.fne.iter()) {
            *a += b;
        }
        Ok(())
    }
}
