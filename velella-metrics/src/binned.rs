//! Binned AUPRC for binary, multiclass, and multilabel classification.
//!
//! Each accumulator absorbs `(scores, labels)` batches, can merge with peer
//! accumulators from other workers, and integrates a precision-recall curve
//! over a fixed threshold grid at compute time. The multiclass and
//! multilabel variants bin eagerly into per-bin counters, so memory stays
//! bounded no matter how many batches arrive. The binary variant keeps the
//! raw score/label buffers and defers binning to compute time: a binary
//! curve is cheap to build exactly, so there is no reason to give up
//! per-sample resolution before then.

use std::str::FromStr;

use velella_core::{Mergeable, Result, Summarizable, VelellaError};

use crate::counters::{BinnedCounts, Optimization};
use crate::threshold::{ThresholdSpec, Thresholds};

// ---------------------------------------------------------------------------
// Averaging & results
// ---------------------------------------------------------------------------

/// Averaging policy applied across classes or labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Average {
    /// Unweighted mean over classes with a defined score; classes with no
    /// positive samples are left out of the denominator.
    Macro,
    /// No averaging: one score per class, NaN where undefined.
    None,
}

impl Default for Average {
    fn default() -> Self {
        Average::Macro
    }
}

impl FromStr for Average {
    type Err = VelellaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "macro" => Ok(Average::Macro),
            "none" => Ok(Average::None),
            other => Err(VelellaError::Config(format!(
                "unknown averaging policy: expected 'macro' or 'none', got '{}'",
                other
            ))),
        }
    }
}

/// Result of an AUPRC computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuprcResult {
    /// A single averaged (or single-task) value.
    Scalar(f64),
    /// One value per class, label, or task; NaN marks entries whose class
    /// had no positive samples.
    PerClass(Vec<f64>),
}

impl AuprcResult {
    /// The scalar value, if this result is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AuprcResult::Scalar(v) => Some(*v),
            AuprcResult::PerClass(_) => None,
        }
    }

    /// The per-class values, if this result holds them.
    pub fn as_per_class(&self) -> Option<&[f64]> {
        match self {
            AuprcResult::Scalar(_) => None,
            AuprcResult::PerClass(v) => Some(v),
        }
    }
}

// ---------------------------------------------------------------------------
// Curve integration
// ---------------------------------------------------------------------------

/// Integrate one class's per-bin counts into a scalar AUPRC.
///
/// Bins are walked from the highest threshold down, so recall never
/// decreases. An empty bin (`tp + fp == 0`) contributes zero precision but
/// still anchors its recall step. Returns NaN when the class has no
/// positive samples anywhere, since recall is undefined for it.
fn integrate_class(tp: &[u64], fp: &[u64], fne: &[u64]) -> f64 {
    // tp + fn at any single bin is the class's total positive count
    let positives = tp[0] + fne[0];
    if positives == 0 {
        return f64::NAN;
    }
    let total = positives as f64;

    let mut auprc = 0.0;
    let mut prev_recall = 0.0;
    for k in (0..tp.len()).rev() {
        let predicted = tp[k] + fp[k];
        let precision = if predicted == 0 {
            0.0
        } else {
            tp[k] as f64 / predicted as f64
        };
        let recall = tp[k] as f64 / total;
        auprc += precision * (recall - prev_recall);
        prev_recall = recall;
    }
    auprc
}

fn compute_per_class(counts: &BinnedCounts) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..counts.num_classes())
            .into_par_iter()
            .map(|c| integrate_class(counts.tp_row(c), counts.fp_row(c), counts.fn_row(c)))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..counts.num_classes())
            .map(|c| integrate_class(counts.tp_row(c), counts.fp_row(c), counts.fn_row(c)))
            .collect()
    }
}

pub(crate) fn apply_average(per_class: Vec<f64>, average: Average) -> AuprcResult {
    match average {
        Average::None => AuprcResult::PerClass(per_class),
        Average::Macro => {
            let mut sum = 0.0;
            let mut defined = 0usize;
            for &v in &per_class {
                if !v.is_nan() {
                    sum += v;
                    defined += 1;
                }
            }
            if defined == 0 {
                AuprcResult::Scalar(f64::NAN)
            } else {
                AuprcResult::Scalar(sum / defined as f64)
            }
        }
    }
}

fn check_score(score: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(VelellaError::InvalidInput(format!(
            "score {} lies outside [0, 1]",
            score
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

/// Configuration for [`BinaryBinnedAuprc`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryBinnedAuprcConfig {
    /// Number of independent binary tasks evaluated together.
    pub num_tasks: usize,
    /// Threshold grid specification.
    pub threshold: ThresholdSpec,
}

impl Default for BinaryBinnedAuprcConfig {
    fn default() -> Self {
        Self {
            num_tasks: 1,
            threshold: ThresholdSpec::default(),
        }
    }
}

/// Streaming binned AUPRC over one or more independent binary tasks.
///
/// Keeps the raw score/label buffers verbatim and defers binning to
/// [`compute`](BinaryBinnedAuprc::compute); merging concatenates buffers.
/// `num_tasks == 1` computes to a [`AuprcResult::Scalar`], larger task
/// counts to one value per task.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryBinnedAuprc {
    scores: Vec<Vec<f64>>,
    labels: Vec<Vec<bool>>,
    thresholds: Thresholds,
    num_tasks: usize,
}

impl BinaryBinnedAuprc {
    /// Create an empty accumulator.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `num_tasks` is zero or the threshold
    /// spec is invalid.
    pub fn new(config: &BinaryBinnedAuprcConfig) -> Result<Self> {
        if config.num_tasks < 1 {
            return Err(VelellaError::Config(format!(
                "num_tasks must be at least 1, got {}",
                config.num_tasks
            )));
        }
        let thresholds = Thresholds::new(&config.threshold)?;
        Ok(Self {
            scores: vec![Vec::new(); config.num_tasks],
            labels: vec![Vec::new(); config.num_tasks],
            thresholds,
            num_tasks: config.num_tasks,
        })
    }

    /// Append one batch of per-task scores and labels.
    ///
    /// `input[t]` holds task t's confidence scores and `target[t]` the
    /// matching true labels; the two must pair up elementwise.
    ///
    /// # Errors
    ///
    /// Returns a `Shape` error on task-count or row-length mismatches and
    /// an `InvalidInput` error on scores outside `[0, 1]`. State is left
    /// untouched on error.
    pub fn update(&mut self, input: &[&[f64]], target: &[&[bool]]) -> Result<()> {
        if input.len() != self.num_tasks || target.len() != self.num_tasks {
            return Err(VelellaError::Shape(format!(
                "expected {} task rows, got {} input rows and {} target rows",
                self.num_tasks,
                input.len(),
                target.len()
            )));
        }
        for (task, (scores, labels)) in input.iter().zip(target.iter()).enumerate() {
            if scores.len() != labels.len() {
                return Err(VelellaError::Shape(format!(
                    "task {}: {} scores but {} labels",
                    task,
                    scores.len(),
                    labels.len()
                )));
            }
            for &score in *scores {
                check_score(score)?;
            }
        }
        for (task, (scores, labels)) in input.iter().zip(target.iter()).enumerate() {
            self.scores[task].extend_from_slice(scores);
            self.labels[task].extend_from_slice(labels);
        }
        Ok(())
    }

    /// The threshold grid this accumulator bins against.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Number of samples buffered per task.
    pub fn num_samples(&self) -> usize {
        self.scores.first().map_or(0, Vec::len)
    }

    /// Final metric over everything seen so far.
    ///
    /// Buffered scores are reduced onto the threshold grid (a score only
    /// matters through the largest threshold it reaches, so quantizing to
    /// the grid and counting are one step) and each task's curve is
    /// integrated independently. A task with no positive labels yields NaN.
    pub fn compute(&self) -> Result<AuprcResult> {
        let mut per_task = Vec::with_capacity(self.num_tasks);
        for task in 0..self.num_tasks {
            let scores = &self.scores[task];
            let labels = &self.labels[task];
            let mut counts = BinnedCounts::new(1, self.thresholds.len());
            counts.update(
                scores,
                scores.len(),
                &self.thresholds,
                |i, _| labels[i],
                Optimization::MemoryConserving,
            )?;
            per_task.push(integrate_class(
                counts.tp_row(0),
                counts.fp_row(0),
                counts.fn_row(0),
            ));
        }
        Ok(if self.num_tasks == 1 {
            AuprcResult::Scalar(per_task[0])
        } else {
            AuprcResult::PerClass(per_task)
        })
    }
}

impl Mergeable for BinaryBinnedAuprc {
    fn merge(&mut self, donor: Self) -> Result<()> {
        if self.num_tasks != donor.num_tasks {
            return Err(VelellaError::Shape(format!(
                "cannot merge accumulators with {} and {} tasks",
                self.num_tasks, donor.num_tasks
            )));
        }
        if self.thresholds != donor.thresholds {
            return Err(VelellaError::Shape(
                "cannot merge accumulators with different threshold grids".into(),
            ));
        }
        for (mine, theirs) in self.scores.iter_mut().zip(donor.scores) {
            mine.extend(theirs);
        }
        for (mine, theirs) in self.labels.iter_mut().zip(donor.labels) {
            mine.extend(theirs);
        }
        Ok(())
    }
}

impl Summarizable for BinaryBinnedAuprc {
    fn summary(&self) -> String {
        format!(
            "BinaryBinnedAuprc: tasks={}, bins={}, samples={}",
            self.num_tasks,
            self.thresholds.len(),
            self.num_samples(),
        )
    }
}

// ---------------------------------------------------------------------------
// Multiclass
// ---------------------------------------------------------------------------

/// Configuration for [`MulticlassBinnedAuprc`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MulticlassBinnedAuprcConfig {
    /// Number of mutually exclusive classes.
    pub num_classes: usize,
    /// Threshold grid specification.
    pub threshold: ThresholdSpec,
    /// Averaging policy applied at compute time.
    pub average: Average,
    /// Update strategy.
    pub optimization: Optimization,
}

impl Default for MulticlassBinnedAuprcConfig {
    fn default() -> Self {
        Self {
            num_classes: 2,
            threshold: ThresholdSpec::default(),
            average: Average::Macro,
            optimization: Optimization::Vectorized,
        }
    }
}

/// Streaming binned AUPRC over mutually exclusive classes.
///
/// Bins eagerly: every update folds the batch into per-(class, bin)
/// tp/fp/fn counters, so state size is independent of how much data has
/// been seen.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MulticlassBinnedAuprc {
    counts: BinnedCounts,
    thresholds: Thresholds,
    average: Average,
    optimization: Optimization,
    num_classes: usize,
}

impl MulticlassBinnedAuprc {
    /// Create an empty accumulator.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `num_classes` is below 2 or the
    /// threshold spec is invalid.
    pub fn new(config: &MulticlassBinnedAuprcConfig) -> Result<Self> {
        if config.num_classes < 2 {
            return Err(VelellaError::Config(format!(
                "num_classes must be at least 2, got {}",
                config.num_classes
            )));
        }
        let thresholds = Thresholds::new(&config.threshold)?;
        Ok(Self {
            counts: BinnedCounts::new(config.num_classes, thresholds.len()),
            thresholds,
            average: config.average,
            optimization: config.optimization,
            num_classes: config.num_classes,
        })
    }

    /// Absorb one batch.
    ///
    /// `input[i]` holds sample i's per-class scores; `target[i]` is its
    /// true class index.
    ///
    /// # Errors
    ///
    /// Returns a `Shape` error on input/target length or row-width
    /// mismatches, and an `InvalidInput` error on out-of-range scores or
    /// class indices. State is left untouched on error.
    pub fn update(&mut self, input: &[&[f64]], target: &[usize]) -> Result<()> {
        if input.len() != target.len() {
            return Err(VelellaError::Shape(format!(
                "input has {} samples but target has {}",
                input.len(),
                target.len()
            )));
        }
        let mut scores = Vec::with_capacity(input.len() * self.num_classes);
        for (i, row) in input.iter().enumerate() {
            if row.len() != self.num_classes {
                return Err(VelellaError::Shape(format!(
                    "sample {} has {} scores, expected num_classes = {}",
                    i,
                    row.len(),
                    self.num_classes
                )));
            }
            for &score in *row {
                check_score(score)?;
            }
            scores.extend_from_slice(row);
        }
        for (i, &class) in target.iter().enumerate() {
            if class >= self.num_classes {
                return Err(VelellaError::InvalidInput(format!(
                    "target class {} for sample {} is out of range for {} classes",
                    class, i, self.num_classes
                )));
            }
        }
        self.counts.update(
            &scores,
            input.len(),
            &self.thresholds,
            |i, c| target[i] == c,
            self.optimization,
        )
    }

    /// The threshold grid this accumulator bins against.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The per-bin counter state accumulated so far.
    pub fn counts(&self) -> &BinnedCounts {
        &self.counts
    }

    /// Final metric over everything seen so far.
    pub fn compute(&self) -> Result<AuprcResult> {
        Ok(apply_average(compute_per_class(&self.counts), self.average))
    }
}

impl Mergeable for MulticlassBinnedAuprc {
    fn merge(&mut self, donor: Self) -> Result<()> {
        if self.thresholds != donor.thresholds {
            return Err(VelellaError::Shape(
                "cannot merge accumulators with different threshold grids".into(),
            ));
        }
        self.counts.merge(donor.counts)
    }
}

impl Summarizable for MulticlassBinnedAuprc {
    fn summary(&self) -> String {
        format!(
            "MulticlassBinnedAuprc: classes={}, bins={}",
            self.num_classes,
            self.thresholds.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Multilabel
// ---------------------------------------------------------------------------

/// Configuration for [`MultilabelBinnedAuprc`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultilabelBinnedAuprcConfig {
    /// Number of independent labels.
    pub num_labels: usize,
    /// Threshold grid specification.
    pub threshold: ThresholdSpec,
    /// Averaging policy applied at compute time.
    pub average: Average,
    /// Update strategy.
    pub optimization: Optimization,
}

impl Default for MultilabelBinnedAuprcConfig {
    fn default() -> Self {
        Self {
            num_labels: 1,
            threshold: ThresholdSpec::default(),
            average: Average::Macro,
            optimization: Optimization::Vectorized,
        }
    }
}

/// Streaming binned AUPRC over independent per-label binary decisions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultilabelBinnedAuprc {
    counts: BinnedCounts,
    thresholds: Thresholds,
    average: Average,
    optimization: Optimization,
    num_labels: usize,
}

impl MultilabelBinnedAuprc {
    /// Create an empty accumulator.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `num_labels` is zero or the threshold
    /// spec is invalid.
    pub fn new(config: &MultilabelBinnedAuprcConfig) -> Result<Self> {
        if config.num_labels < 1 {
            return Err(VelellaError::Config(format!(
                "num_labels must be at least 1, got {}",
                config.num_labels
            )));
        }
        let thresholds = Thresholds::new(&config.threshold)?;
        Ok(Self {
            counts: BinnedCounts::new(config.num_labels, thresholds.len()),
            thresholds,
            average: config.average,
            optimization: config.optimization,
            num_labels: config.num_labels,
        })
    }

    /// Absorb one batch.
    ///
    /// `input[i]` holds sample i's per-label scores and `target[i]` its
    /// per-label truth; both rows must be `num_labels` wide.
    ///
    /// # Errors
    ///
    /// Returns a `Shape` error on input/target length or row-width
    /// mismatches, and an `InvalidInput` error on out-of-range scores.
    /// State is left untouched on error.
    pub fn update(&mut self, input: &[&[f64]], target: &[&[bool]]) -> Result<()> {
        if input.len() != target.len() {
            return Err(VelellaError::Shape(format!(
                "input has {} samples but target has {}",
                input.len(),
                target.len()
            )));
        }
        let mut scores = Vec::with_capacity(input.len() * self.num_labels);
        for (i, (row, truth)) in input.iter().zip(target.iter()).enumerate() {
            if row.len() != self.num_labels {
                return Err(VelellaError::Shape(format!(
                    "sample {} has {} scores, expected num_labels = {}",
                    i,
                    row.len(),
                    self.num_labels
                )));
            }
            if truth.len() != self.num_labels {
                return Err(VelellaError::Shape(format!(
                    "sample {} has {} label flags, expected num_labels = {}",
                    i,
                    truth.len(),
                    self.num_labels
                )));
            }
            for &score in *row {
                check_score(score)?;
            }
            scores.extend_from_slice(row);
        }
        self.counts.update(
            &scores,
            input.len(),
            &self.thresholds,
            |i, label| target[i][label],
            self.optimization,
        )
    }

    /// The threshold grid this accumulator bins against.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The per-bin counter state accumulated so far.
    pub fn counts(&self) -> &BinnedCounts {
        &self.counts
    }

    /// Final metric over everything seen so far.
    pub fn compute(&self) -> Result<AuprcResult> {
        Ok(apply_average(compute_per_class(&self.counts), self.average))
    }
}

impl Mergeable for MultilabelBinnedAuprc {
    fn merge(&mut self, donor: Self) -> Result<()> {
        if self.thresholds != donor.thresholds {
            return Err(VelellaError::Shape(
                "cannot merge accumulators with different threshold grids".into(),
            ));
        }
        self.counts.merge(donor.counts)
    }
}

impl Summarizable for MultilabelBinnedAuprc {
    fn summary(&self) -> String {
        format!(
            "MultilabelBinnedAuprc: labels={}, bins={}",
            self.num_labels,
            self.thresholds.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// One-shot functional forms
// ---------------------------------------------------------------------------

/// Binned AUPRC of a single batch of binary tasks.
///
/// Builds a [`BinaryBinnedAuprc`], runs one update, and computes.
pub fn binary_binned_auprc(
    input: &[&[f64]],
    target: &[&[bool]],
    config: &BinaryBinnedAuprcConfig,
) -> Result<AuprcResult> {
    let mut metric = BinaryBinnedAuprc::new(config)?;
    metric.update(input, target)?;
    metric.compute()
}

/// Binned AUPRC of a single multiclass batch.
pub fn multiclass_binned_auprc(
    input: &[&[f64]],
    target: &[usize],
    config: &MulticlassBinnedAuprcConfig,
) -> Result<AuprcResult> {
    let mut metric = MulticlassBinnedAuprc::new(config)?;
    metric.update(input, target)?;
    metric.compute()
}

/// Binned AUPRC of a single multilabel batch.
pub fn multilabel_binned_auprc(
    input: &[&[f64]],
    target: &[&[bool]],
    config: &MultilabelBinnedAuprcConfig,
) -> Result<AuprcResult> {
    let mut metric = MultilabelBinnedAuprc::new(config)?;
    metric.update(input, target)?;
    metric.compute()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// NaN-aware equality for per-class result vectors.
    fn same_results(a: &AuprcResult, b: &AuprcResult) -> bool {
        let same = |x: f64, y: f64| (x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-12;
        match (a, b) {
            (AuprcResult::Scalar(x), AuprcResult::Scalar(y)) => same(*x, *y),
            (AuprcResult::PerClass(xs), AuprcResult::PerClass(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(&x, &y)| same(x, y))
            }
            _ => false,
        }
    }

    fn arb_multilabel(num_labels: usize) -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<bool>>)> {
        (1..20usize).prop_flat_map(move |n| {
            (
                proptest::collection::vec(
                    proptest::collection::vec(0.0f64..=1.0, num_labels),
                    n,
                ),
                proptest::collection::vec(
                    proptest::collection::vec(proptest::bool::ANY, num_labels),
                    n,
                ),
            )
        })
    }

    fn rows<T>(data: &[Vec<T>]) -> Vec<&[T]> {
        data.iter().map(|v| v.as_slice()).collect()
    }

    proptest! {
        #[test]
        fn strategies_agree_at_compute_level((input, target) in arb_multilabel(3)) {
            let base = MultilabelBinnedAuprcConfig {
                num_labels: 3,
                threshold: ThresholdSpec::Count(7),
                average: Average::None,
                optimization: Optimization::Vectorized,
            };
            let vectorized =
                multilabel_binned_auprc(&rows(&input), &rows(&target), &base).unwrap();
            let config = MultilabelBinnedAuprcConfig {
                optimization: Optimization::MemoryConserving,
                ..base
            };
            let memory =
                multilabel_binned_auprc(&rows(&input), &rows(&target), &config).unwrap();
            prop_assert!(same_results(&vectorized, &memory));
        }

        #[test]
        fn split_update_merge_invariance(
            (input, target) in arb_multilabel(2),
            split in 0..100usize,
        ) {
            let config = MultilabelBinnedAuprcConfig {
                num_labels: 2,
                threshold: ThresholdSpec::Count(5),
                average: Average::None,
                optimization: Optimization::Vectorized,
            };

            let mut whole = MultilabelBinnedAuprc::new(&config).unwrap();
            whole.update(&rows(&input), &rows(&target)).unwrap();

            let at = split % (input.len() + 1);
            let mut first = MultilabelBinnedAuprc::new(&config).unwrap();
            first.update(&rows(&input[..at]), &rows(&target[..at])).unwrap();
            let mut second = MultilabelBinnedAuprc::new(&config).unwrap();
            second.update(&rows(&input[at..]), &rows(&target[at..])).unwrap();

            let merged = Mergeable::merge_all(vec![first, second]).unwrap();
            prop_assert!(same_results(
                &whole.compute().unwrap(),
                &merged.compute().unwrap()
            ));
        }

        #[test]
        fn merge_is_associative((input, target) in arb_multilabel(2)) {
            let config = MultilabelBinnedAuprcConfig {
                num_labels: 2,
                threshold: ThresholdSpec::Count(5),
                average: Average::None,
                optimization: Optimization::Vectorized,
            };
            let n = input.len();
            let (a_end, b_end) = (n / 3, 2 * n / 3);

            let part = |from: usize, to: usize| {
                let mut acc = MultilabelBinnedAuprc::new(&config).unwrap();
                acc.update(&rows(&input[from..to]), &rows(&target[from..to])).unwrap();
                acc
            };

            // (A + B) + C
            let mut left = part(0, a_end);
            left.merge(part(a_end, b_end)).unwrap();
            left.merge(part(b_end, n)).unwrap();

            // A + (B + C)
            let mut tail = part(a_end, b_end);
            tail.merge(part(b_end, n)).unwrap();
            let mut right = part(0, a_end);
            right.merge(tail).unwrap();

            prop_assert!(same_results(
                &left.compute().unwrap(),
                &right.compute().unwrap()
            ));
        }

        #[test]
        fn binary_fine_grid_matches_exact(
            steps in proptest::collection::vec(0u8..=100, 1..40),
            labels in proptest::collection::vec(proptest::bool::ANY, 40),
        ) {
            // Scores on the grid itself: binning loses nothing, so the
            // binned value must equal the exact rank-based AUPRC
            let scores: Vec<f64> = steps.iter().map(|&s| f64::from(s) / 100.0).collect();
            let labels = &labels[..scores.len()];

            let config = BinaryBinnedAuprcConfig {
                num_tasks: 1,
                threshold: ThresholdSpec::Count(101),
            };
            let binned = binary_binned_auprc(&[&scores], &[labels], &config)
                .unwrap()
                .as_scalar()
                .unwrap();
            let exact = crate::auprc::binary_auprc(&scores, labels).unwrap();

            prop_assert!(
                (binned.is_nan() && exact.is_nan()) || (binned - exact).abs() < 1e-12,
                "binned {} != exact {}", binned, exact
            );
        }
    }
}
