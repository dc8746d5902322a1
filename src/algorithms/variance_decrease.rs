// src/algorithms/variance_decrease.rs

use crate::algorithms::missing::{feature_weights, locate_missing, missing_features};
use crate::algorithms::subtable::extract_subtable;
use crate::core::{
    Coordinate, Dataset, Extracted, FeatureAxis, FeatureStatus, FeatureVd, Result,
    UndefinedReason, VdError, VdReport,
};
use crate::utils::feature_variances;
use log::{debug, warn};
use ndarray::Array1;

/// Relative absolute change between a feature's variance before and after imputation.
///
/// `reference_variance` must be non-zero; callers exclude degenerate features first.
pub fn vd_ratio(reference_variance: f64, imputed_variance: f64) -> f64 {
    ((reference_variance - imputed_variance) / reference_variance).abs()
}

/// Configuration for the VD calculator.
#[derive(Debug, Clone)]
pub struct VdConfig {
    pub axis: FeatureAxis,
    /// Weight each feature by its missing fraction instead of counting features equally.
    pub weighted: bool,
    /// Delta degrees of freedom of the variance (0 = population variance).
    pub ddof: usize,
    /// Reject imputed matrices that still hold NaN where the reference is missing.
    pub strict: bool,
}

impl Default for VdConfig {
    fn default() -> Self {
        VdConfig {
            axis: FeatureAxis::Columns,
            weighted: true,
            ddof: 0,
            strict: false,
        }
    }
}

impl VdConfig {
    pub fn axis(mut self, axis: FeatureAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub fn ddof(mut self, ddof: usize) -> Self {
        self.ddof = ddof;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Everything derived from the reference matrix alone, shared across imputed runs.
struct ReferenceProfile {
    shape: (usize, usize),
    coords: Vec<Coordinate>,
    features: Vec<usize>,
    weights: Vec<f64>,
    variances: Array1<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct VdCalculator {
    config: VdConfig,
}

impl VdCalculator {
    pub fn new(config: Option<VdConfig>) -> Self {
        VdCalculator {
            config: config.unwrap_or_default(),
        }
    }

    pub fn config(&self) -> &VdConfig {
        &self.config
    }

    /// VD score of `imputed` against `reference`; NaN when undefined.
    pub fn score(&self, reference: &Dataset, imputed: &Dataset) -> Result<f64> {
        Ok(self.report(reference, imputed)?.score)
    }

    /// VD score with the per-feature breakdown behind it.
    pub fn report(&self, reference: &Dataset, imputed: &Dataset) -> Result<VdReport> {
        check_shapes(reference, imputed)?;
        let profile = self.profile(reference)?;
        self.compare(&profile, imputed)
    }

    /// Scores several imputations of the same reference matrix.
    pub fn report_runs<'a, I>(&self, reference: &Dataset, runs: I) -> Result<Vec<VdReport>>
    where
        I: IntoIterator<Item = &'a Dataset>,
    {
        let profile = self.profile(reference)?;
        runs.into_iter()
            .map(|imputed| self.compare(&profile, imputed))
            .collect()
    }

    pub fn score_runs<'a, I>(&self, reference: &Dataset, runs: I) -> Result<Vec<f64>>
    where
        I: IntoIterator<Item = &'a Dataset>,
    {
        Ok(self
            .report_runs(reference, runs)?
            .into_iter()
            .map(|report| report.score)
            .collect())
    }

    fn profile(&self, reference: &Dataset) -> Result<ReferenceProfile> {
        let axis = self.config.axis;
        let coords = locate_missing(reference);
        let features = missing_features(reference, axis);
        let weights = if self.config.weighted {
            feature_weights(reference, axis)
        } else {
            vec![1.0; features.len()]
        };
        if weights.len() != features.len() {
            return Err(VdError::InternalError(format!(
                "{} weights computed for {} features.",
                weights.len(),
                features.len()
            )));
        }

        let table = restrict(reference, &coords, axis)?;
        let variances = feature_variances(&table, axis, self.config.ddof);
        debug!(
            "Reference has {} missing cells across {} of {} features ({} axis)",
            coords.len(),
            features.len(),
            axis.feature_count(reference),
            axis
        );

        Ok(ReferenceProfile {
            shape: reference.dim(),
            coords,
            features,
            weights,
            variances,
        })
    }

    fn compare(&self, profile: &ReferenceProfile, imputed: &Dataset) -> Result<VdReport> {
        let axis = self.config.axis;
        if imputed.dim() != profile.shape {
            return Err(VdError::ShapeMismatch {
                reference: profile.shape,
                imputed: imputed.dim(),
            });
        }
        self.check_filled(&profile.coords, imputed)?;

        let table = restrict(imputed, &profile.coords, axis)?;
        let imputed_variances = feature_variances(&table, axis, self.config.ddof);

        let features: Vec<FeatureVd> = profile
            .features
            .iter()
            .zip(&profile.weights)
            .zip(profile.variances.iter().zip(imputed_variances.iter()))
            .map(|((&feature, &weight), (&reference_variance, &imputed_variance))| {
                let status = if !reference_variance.is_finite() || !imputed_variance.is_finite() {
                    FeatureStatus::UndefinedVariance
                } else if reference_variance == 0.0 {
                    FeatureStatus::DegenerateVariance
                } else {
                    FeatureStatus::Scored(vd_ratio(reference_variance, imputed_variance))
                };
                FeatureVd {
                    feature,
                    weight,
                    reference_variance,
                    imputed_variance,
                    status,
                }
            })
            .collect();

        let (weighted_sum, weight_total) = features
            .iter()
            .filter_map(|f| f.vd().map(|vd| (vd, f.weight)))
            .fold((0.0, 0.0), |(sum, total), (vd, w)| (sum + vd * w, total + w));

        let undefined_reason = if profile.coords.is_empty() {
            Some(UndefinedReason::NoMissingValues)
        } else if weight_total == 0.0 {
            Some(UndefinedReason::NoScorableFeatures)
        } else {
            None
        };
        let score = match undefined_reason {
            Some(reason) => {
                warn!("VD score is undefined: {}", reason);
                f64::NAN
            }
            None => weighted_sum / weight_total,
        };

        let excluded = features.iter().filter(|f| f.vd().is_none()).count();
        if excluded > 0 {
            debug!("{} of {} features excluded from the VD score", excluded, features.len());
        }

        Ok(VdReport {
            score,
            axis,
            weighted: self.config.weighted,
            features,
            undefined_reason,
        })
    }

    fn check_filled(&self, coords: &[Coordinate], imputed: &Dataset) -> Result<()> {
        let unfilled: Vec<Coordinate> = coords
            .iter()
            .copied()
            .filter(|&coord| imputed[coord].is_nan())
            .collect();
        match unfilled.first() {
            None => Ok(()),
            Some(&(row, col)) if self.config.strict => {
                Err(VdError::UnfilledMissingValue { row, col })
            }
            Some(_) => {
                warn!(
                    "Imputed matrix leaves {} of {} missing cells unfilled; they are skipped",
                    unfilled.len(),
                    coords.len()
                );
                Ok(())
            }
        }
    }
}

fn check_shapes(reference: &Dataset, imputed: &Dataset) -> Result<()> {
    if reference.dim() != imputed.dim() {
        return Err(VdError::ShapeMismatch {
            reference: reference.dim(),
            imputed: imputed.dim(),
        });
    }
    Ok(())
}

/// The features of `data` that hold a missing cell in the reference, as a table.
fn restrict(data: &Dataset, coords: &[Coordinate], axis: FeatureAxis) -> Result<Dataset> {
    match extract_subtable(data, coords, axis.extract_mode())? {
        Extracted::Table(table) => Ok(table),
        Extracted::Values(_) => Err(VdError::InternalError(
            "Restricted extraction returned flat values.".to_string(),
        )),
    }
}

/// VD score of `imputed` against `reference` (NaN when undefined).
pub fn vd_score(reference: &Dataset, imputed: &Dataset, axis: FeatureAxis, weighted: bool) -> Result<f64> {
    vd_report(reference, imputed, axis, weighted).map(|report| report.score)
}

pub fn vd_report(
    reference: &Dataset,
    imputed: &Dataset,
    axis: FeatureAxis,
    weighted: bool,
) -> Result<VdReport> {
    let config = VdConfig::default().axis(axis).weighted(weighted);
    VdCalculator::new(Some(config)).report(reference, imputed)
}
