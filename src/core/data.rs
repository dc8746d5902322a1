// src/core/data.rs
use crate::core::errors::Result;
use ndarray::{Array1, Array2};
use std::fmt;

/// A dense table of observations. `f64::NAN` marks a missing entry.
pub type Dataset = Array2<f64>;

/// Builds a [`Dataset`] from row-major values, failing if `values` does not fill `shape`.
pub fn dataset_from_vec(shape: (usize, usize), values: Vec<f64>) -> Result<Dataset> {
    Ok(Dataset::from_shape_vec(shape, values)?)
}

/// A (row, column) position inside a [`Dataset`].
pub type Coordinate = (usize, usize);

/// Which dimension of the table holds the features whose variance is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureAxis {
    /// Rows are samples, columns are features.
    #[default]
    Columns,
    /// Rows are features, columns are samples.
    Rows,
}

impl FeatureAxis {
    /// Number of features in `data` under this convention.
    pub fn feature_count(&self, data: &Dataset) -> usize {
        match self {
            FeatureAxis::Columns => data.ncols(),
            FeatureAxis::Rows => data.nrows(),
        }
    }

    /// Number of observations along a single feature.
    pub fn feature_len(&self, data: &Dataset) -> usize {
        match self {
            FeatureAxis::Columns => data.nrows(),
            FeatureAxis::Rows => data.ncols(),
        }
    }

    /// The feature a cell belongs to.
    pub fn feature_of(&self, (row, col): Coordinate) -> usize {
        match self {
            FeatureAxis::Columns => col,
            FeatureAxis::Rows => row,
        }
    }

    /// The restricted extraction that keeps whole features of this axis.
    pub fn extract_mode(&self) -> ExtractMode {
        match self {
            FeatureAxis::Columns => ExtractMode::Columns,
            FeatureAxis::Rows => ExtractMode::Rows,
        }
    }
}

impl fmt::Display for FeatureAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureAxis::Columns => write!(f, "columns"),
            FeatureAxis::Rows => write!(f, "rows"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// The values at exactly the given coordinates, in iteration order.
    Pointwise,
    /// Distinct rows named by the coordinates, all columns kept.
    Rows,
    /// Distinct columns named by the coordinates, all rows kept.
    Columns,
}

/// Output of the sub-table extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Values(Array1<f64>),
    Table(Dataset),
}

impl Extracted {
    pub fn into_values(self) -> Option<Array1<f64>> {
        match self {
            Extracted::Values(values) => Some(values),
            Extracted::Table(_) => None,
        }
    }

    pub fn into_table(self) -> Option<Dataset> {
        match self {
            Extracted::Table(table) => Some(table),
            Extracted::Values(_) => None,
        }
    }
}

/// Outcome of comparing one feature's variance before and after imputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureStatus {
    /// The feature contributed this VD ratio to the score.
    Scored(f64),
    /// Reference variance was exactly zero; excluded from the score.
    DegenerateVariance,
    /// A variance could not be computed (e.g. no observed values); excluded from the score.
    UndefinedVariance,
}

/// Per-feature record. Weight and VD travel together so that excluding a
/// feature drops both at once.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVd {
    /// Index of the feature in the original table.
    pub feature: usize,
    /// Missing fraction of the feature (1.0 when weighting is disabled).
    pub weight: f64,
    pub reference_variance: f64,
    pub imputed_variance: f64,
    pub status: FeatureStatus,
}

impl FeatureVd {
    pub fn vd(&self) -> Option<f64> {
        match self.status {
            FeatureStatus::Scored(vd) => Some(vd),
            _ => None,
        }
    }
}

/// Why a [`VdReport`] carries no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedReason {
    /// The reference matrix has no missing entries, so no feature is compared.
    NoMissingValues,
    /// Every candidate feature was excluded for a zero or undefined reference variance.
    NoScorableFeatures,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::NoMissingValues => write!(f, "reference matrix has no missing values"),
            UndefinedReason::NoScorableFeatures => {
                write!(f, "no feature has a usable reference variance")
            }
        }
    }
}

/// Full result of a VD computation.
#[derive(Debug, Clone)]
pub struct VdReport {
    /// The VD score, `f64::NAN` when undefined.
    pub score: f64,
    pub axis: FeatureAxis,
    pub weighted: bool,
    /// One record per feature holding at least one missing value, ascending by index.
    pub features: Vec<FeatureVd>,
    /// Set exactly when `score` is NaN.
    pub undefined_reason: Option<UndefinedReason>,
}

impl VdReport {
    pub fn is_defined(&self) -> bool {
        self.undefined_reason.is_none()
    }

    /// Records that contributed to the score.
    pub fn scored_features(&self) -> impl Iterator<Item = &FeatureVd> {
        self.features.iter().filter(|f| f.vd().is_some())
    }
}

impl fmt::Display for VdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VD Report:")?;
        writeln!(f, "  Feature axis: {}", self.axis)?;
        writeln!(f, "  Weighted:     {}", self.weighted)?;
        match self.undefined_reason {
            Some(reason) => writeln!(f, "  Score:        undefined ({})", reason)?,
            None => writeln!(f, "  Score:        {:.4}", self.score)?,
        }
        if !self.features.is_empty() {
            writeln!(f, "  Features:")?;
        }
        for feat in &self.features {
            match feat.status {
                FeatureStatus::Scored(vd) => writeln!(
                    f,
                    "    Feature {}: weight {:.4}, var {:.4} -> {:.4}, VD {:.4}",
                    feat.feature, feat.weight, feat.reference_variance, feat.imputed_variance, vd
                )?,
                FeatureStatus::DegenerateVariance => writeln!(
                    f,
                    "    Feature {}: excluded (zero reference variance)",
                    feat.feature
                )?,
                FeatureStatus::UndefinedVariance => writeln!(
                    f,
                    "    Feature {}: excluded (undefined variance)",
                    feat.feature
                )?,
            }
        }
        Ok(())
    }
}
