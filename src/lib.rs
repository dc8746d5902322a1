// src/lib.rs

//! `impute_vd` computes the Variance Decrease (VD) score: how much an imputation
//! changed the variance of the features that had missing values.
//!
//! Missing entries are `f64::NAN`. For each feature holding at least one missing
//! cell, the skip-missing variance of the reference table is compared with the
//! variance of the imputed table, and the relative changes are averaged
//! (optionally weighted by each feature's missing fraction).
//!
//! ```
//! use impute_vd::{vd_score, FeatureAxis};
//! use ndarray::array;
//!
//! let reference = array![[1.0, f64::NAN], [2.0, 4.0], [3.0, 6.0]];
//! let imputed = array![[1.0, 5.0], [2.0, 4.0], [3.0, 6.0]];
//!
//! let score = vd_score(&reference, &imputed, FeatureAxis::Columns, true)?;
//! assert!(score > 0.0);
//! # Ok::<(), impute_vd::VdError>(())
//! ```

pub mod algorithms;
pub mod core;
pub mod utils;

// Re-export key components for easier use by library consumers
pub use crate::algorithms::{
    ampute, extract_subtable, feature_weights, inverse_mask, locate_missing, missing_features,
    missing_fraction, vd_ratio, vd_report, vd_score, VdCalculator, VdConfig,
};
pub use crate::core::{
    dataset_from_vec, Coordinate, Dataset, ExtractMode, Extracted, FeatureAxis, FeatureStatus,
    FeatureVd, Result, UndefinedReason, VdError, VdReport,
};
