// src/algorithms/missing.rs

use crate::core::{Coordinate, Dataset, FeatureAxis, Result, VdError};
use log::debug;
use rand::Rng;
use std::collections::BTreeMap;

/// Every cell of `data` holding the missing sentinel, in row-major order.
pub fn locate_missing(data: &Dataset) -> Vec<Coordinate> {
    data.indexed_iter()
        .filter(|(_, v)| v.is_nan())
        .map(|(coord, _)| coord)
        .collect()
}

/// Missing-cell counts per feature, keyed (and therefore ordered) by feature index.
fn missing_counts(data: &Dataset, axis: FeatureAxis) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for coord in locate_missing(data) {
        *counts.entry(axis.feature_of(coord)).or_insert(0) += 1;
    }
    counts
}

/// Ascending indices of the features holding at least one missing value.
pub fn missing_features(data: &Dataset, axis: FeatureAxis) -> Vec<usize> {
    missing_counts(data, axis).into_keys().collect()
}

/// Fraction of missing entries of each feature that has any, in ascending feature order.
///
/// The order matches the restricted extraction of the same axis, so the i-th
/// weight belongs to the i-th feature of the extracted sub-table.
pub fn feature_weights(data: &Dataset, axis: FeatureAxis) -> Vec<f64> {
    let len = axis.feature_len(data) as f64;
    missing_counts(data, axis)
        .into_values()
        .map(|count| count as f64 / len)
        .collect()
}

/// Overall fraction of missing cells, 0 for an empty matrix.
pub fn missing_fraction(data: &Dataset) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let missing = data.iter().filter(|v| v.is_nan()).count();
    missing as f64 / data.len() as f64
}

pub(crate) fn check_bounds(data: &Dataset, coords: &[Coordinate]) -> Result<()> {
    let (nrows, ncols) = data.dim();
    match coords.iter().find(|&&(r, c)| r >= nrows || c >= ncols) {
        Some(&(row, col)) => Err(VdError::OutOfRangeCoordinate {
            row,
            col,
            nrows,
            ncols,
        }),
        None => Ok(()),
    }
}

/// A matrix shaped like `imputed`, missing everywhere except at `coords`,
/// where the imputed values are kept.
pub fn inverse_mask(imputed: &Dataset, coords: &[Coordinate]) -> Result<Dataset> {
    check_bounds(imputed, coords)?;
    let mut masked = Dataset::from_elem(imputed.dim(), f64::NAN);
    for &coord in coords {
        masked[coord] = imputed[coord];
    }
    Ok(masked)
}

/// Knocks out observed cells of `complete`, each independently with probability `rate`.
///
/// Cells that are already missing stay missing. Pair the result with an
/// imputation of it to score the imputer against known ground truth.
pub fn ampute<R: Rng + ?Sized>(complete: &Dataset, rate: f64, rng: &mut R) -> Result<Dataset> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(VdError::InvalidInput(format!(
            "Missingness rate must lie in [0, 1], got {}.",
            rate
        )));
    }
    let mut amputed = complete.clone();
    let mut knocked_out = 0usize;
    for v in amputed.iter_mut() {
        if !v.is_nan() && rng.gen_bool(rate) {
            *v = f64::NAN;
            knocked_out += 1;
        }
    }
    debug!(
        "Amputed {} of {} cells at rate {}",
        knocked_out,
        complete.len(),
        rate
    );
    Ok(amputed)
}
