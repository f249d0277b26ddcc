//! Exact (unbinned) AUPRC from raw scores.
//!
//! These functions sweep every distinct score as a threshold instead of
//! using a fixed grid, so they are the reference that the binned
//! accumulators converge to as the grid refines. They need the full score
//! set in memory at once, which is what the binned variants exist to avoid.

use velella_core::{Result, VelellaError};

use crate::binned::{apply_average, Average, AuprcResult};

/// Exact AUPRC for one binary task.
///
/// Sweeps scores in descending order, absorbing tied scores as one group,
/// and accumulates precision times the recall increment at each distinct
/// score. Returns NaN when there are no positive labels.
///
/// # Errors
///
/// Returns a `Shape` error if the slices have different lengths and an
/// `InvalidInput` error if they are empty.
pub fn binary_auprc(scores: &[f64], labels: &[bool]) -> Result<f64> {
    if scores.len() != labels.len() {
        return Err(VelellaError::Shape(format!(
            "scores length {} != labels length {}",
            scores.len(),
            labels.len()
        )));
    }
    if scores.is_empty() {
        return Err(VelellaError::InvalidInput("empty input".into()));
    }

    let total_pos = labels.iter().filter(|&&l| l).count();
    if total_pos == 0 {
        return Ok(f64::NAN);
    }

    // Sort by descending score
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total = total_pos as f64;
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut auprc = 0.0;
    let mut prev_recall = 0.0;

    let mut i = 0;
    while i < indices.len() {
        // Absorb the whole tied-score group before emitting a point
        let current = scores[indices[i]];
        while i < indices.len() && scores[indices[i]] == current {
            if labels[indices[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }

        let precision = tp as f64 / (tp + fp) as f64;
        let recall = tp as f64 / total;
        auprc += precision * (recall - prev_recall);
        prev_recall = recall;
    }

    Ok(auprc)
}

/// Exact AUPRC over mutually exclusive classes.
///
/// Treats each class as a one-vs-rest binary task over its score column.
/// Classes that never occur in `target` report NaN and are excluded from
/// the macro mean.
///
/// # Errors
///
/// Returns a `Shape` error on input/target length or row-width mismatches
/// and an `InvalidInput` error on empty input or out-of-range class
/// indices.
pub fn multiclass_auprc(
    input: &[&[f64]],
    target: &[usize],
    num_classes: usize,
    average: Average,
) -> Result<AuprcResult> {
    if input.len() != target.len() {
        return Err(VelellaError::Shape(format!(
            "input has {} samples but target has {}",
            input.len(),
            target.len()
        )));
    }
    if input.is_empty() {
        return Err(VelellaError::InvalidInput("empty input".into()));
    }
    for (i, row) in input.iter().enumerate() {
        if row.len() != num_classes {
            return Err(VelellaError::Shape(format!(
                "sample {} has {} scores, expected num_classes = {}",
                i,
                row.len(),
                num_classes
            )));
        }
    }
    for (i, &class) in target.iter().enumerate() {
        if class >= num_classes {
            return Err(VelellaError::InvalidInput(format!(
                "target class {} for sample {} is out of range for {} classes",
                class, i, num_classes
            )));
        }
    }

    let mut per_class = Vec::with_capacity(num_classes);
    let mut column = Vec::with_capacity(input.len());
    let mut labels = Vec::with_capacity(input.len());
    for class in 0..num_classes {
        column.clear();
        labels.clear();
        for (row, &truth) in input.iter().zip(target.iter()) {
            column.push(row[class]);
            labels.push(truth == class);
        }
        per_class.push(binary_auprc(&column, &labels)?);
    }
    Ok(apply_average(per_class, average))
}

/// Exact AUPRC over independent labels.
///
/// # Errors
///
/// Returns a `Shape` error on input/target length or row-width mismatches
/// and an `InvalidInput` error on empty input.
pub fn multilabel_auprc(
    input: &[&[f64]],
    target: &[&[bool]],
    num_labels: usize,
    average: Average,
) -> Result<AuprcResult> {
    if input.len() != target.len() {
        return Err(VelellaError::Shape(format!(
            "input has {} samples but target has {}",
            input.len(),
            target.len()
        )));
    }
    if input.is_empty() {
        return Err(VelellaError::InvalidInput("empty input".into()));
    }
    for (i, (row, truth)) in input.iter().zip(target.iter()).enumerate() {
        if row.len() != num_labels || truth.len() != num_labels {
            return Err(VelellaError::Shape(format!(
                "sample {} rows are {} and {} wide, expected num_labels = {}",
                i,
                row.len(),
                truth.len(),
                num_labels
            )));
        }
    }

    let mut per_label = Vec::with_capacity(num_labels);
    let mut column = Vec::with_capacity(input.len());
    let mut labels = Vec::with_capacity(input.len());
    for label in 0..num_labels {
        column.clear();
        labels.clear();
        for (row, truth) in input.iter().zip(target.iter()) {
            column.push(row[label]);
            labels.push(truth[label]);
        }
        per_label.push(binary_auprc(&column, &labels)?);
    }
    Ok(apply_average(per_label, average))
}
