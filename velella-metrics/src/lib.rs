//! Streaming classification metrics over fixed threshold grids.
//!
//! The centerpiece is binned AUPRC: instead of retaining every raw score,
//! an accumulator keeps per-bin true/false-positive and false-negative
//! counts on a fixed threshold grid. Partial states from independent
//! workers merge by summation, and the precision-recall curve is integrated
//! once at compute time, so memory stays bounded no matter how many batches
//! or workers contribute.
//!
//! - [`threshold`] — validated threshold grids and score-to-bin mapping
//! - [`counters`] — per-bin counter state and the two update strategies
//! - [`binned`] — binary / multiclass / multilabel accumulators
//! - [`auprc`] — exact reference AUPRC from raw scores

pub mod auprc;
pub mod binned;
pub mod counters;
pub mod threshold;

pub use binned::{
    binary_binned_auprc, multiclass_binned_auprc, multilabel_binned_auprc, AuprcResult, Average,
    BinaryBinnedAuprc, BinaryBinnedAuprcConfig, MulticlassBinnedAuprc, MulticlassBinnedAuprcConfig,
    MultilabelBinnedAuprc, MultilabelBinnedAuprcConfig,
};
pub use counters::{BinnedCounts, Optimization};
pub use threshold::{ThresholdSpec, Thresholds, DEFAULT_NUM_THRESHOLDS};
