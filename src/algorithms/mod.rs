pub mod missing;
pub mod subtable;
pub mod variance_decrease;

pub use missing::{ampute, feature_weights, inverse_mask, locate_missing, missing_features, missing_fraction};
pub use subtable::extract_subtable;
pub use variance_decrease::{vd_ratio, vd_report, vd_score, VdCalculator, VdConfig};
