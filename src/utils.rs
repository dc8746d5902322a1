// src/utils.rs

//! Reductions that skip missing (NaN) entries.

use crate::core::{Dataset, FeatureAxis};
use ndarray::{Array1, ArrayView1, Axis};

/// Mean of the observed entries of `lane`, NaN if none are observed.
pub fn nan_mean(lane: ArrayView1<f64>) -> f64 {
    let (sum, count) = lane
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

/// Variance of the observed entries of `lane` with `ddof` delta degrees of freedom.
/// NaN when `ddof` leaves no degrees of freedom.
pub fn nan_variance(lane: ArrayView1<f64>, ddof: usize) -> f64 {
    let count = lane.iter().filter(|v| !v.is_nan()).count();
    if count <= ddof {
        return f64::NAN;
    }
    let mean = nan_mean(lane);
    let sq_sum: f64 = lane
        .iter()
        .filter(|v| !v.is_nan())
        .map(|&v| (v - mean) * (v - mean))
        .sum();
    sq_sum / (count - ddof) as f64
}

/// Skip-missing variance of every feature of `table`, in feature index order.
pub fn feature_variances(table: &Dataset, axis: FeatureAxis, ddof: usize) -> Array1<f64> {
    // Each feature is a lane across the other axis.
    let lane_axis = match axis {
        FeatureAxis::Columns => Axis(1),
        FeatureAxis::Rows => Axis(0),
    };
    table
        .axis_iter(lane_axis)
        .map(|lane| nan_variance(lane, ddof))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn nan_mean_skips_missing() {
        let lane = array![1.0, f64::NAN, 3.0];
        assert_abs_diff_eq!(nan_mean(lane.view()), 2.0);
        assert!(nan_mean(array![f64::NAN, f64::NAN].view()).is_nan());
    }

    #[test]
    fn nan_variance_population_and_sample() {
        let lane = array![2.0, 4.0, f64::NAN, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_abs_diff_eq!(nan_variance(lane.view(), 0), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(nan_variance(lane.view(), 1), 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_variance_needs_enough_observations() {
        assert!(nan_variance(array![f64::NAN].view(), 0).is_nan());
        assert!(nan_variance(array![3.0].view(), 1).is_nan());
        assert_abs_diff_eq!(nan_variance(array![3.0].view(), 0), 0.0);
    }

    #[test]
    fn feature_variances_follow_axis() {
        let table = array![[1.0, 10.0], [3.0, 10.0]];
        let by_column = feature_variances(&table, FeatureAxis::Columns, 0);
        assert_eq!(by_column.len(), 2);
        assert_abs_diff_eq!(by_column[0], 1.0);
        assert_abs_diff_eq!(by_column[1], 0.0);

        let by_row = feature_variances(&table, FeatureAxis::Rows, 0);
        assert_abs_diff_eq!(by_row[0], 20.25);
        assert_abs_diff_eq!(by_row[1], 12.25);
    }
}
