pub struct CostUtil;

/// Absolute change (in currency units) below which a delta counts as flat.
pub const CHANGE_EPSILON: f64 = 0.01;

impl CostUtil {
    /// `numerator / denominator`, or `0.0` when the denominator is zero or the
    /// result would not be finite.
    #[inline]
    pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
        if denominator == 0.0 {
            return 0.0;
        }
        let ratio = numerator / denominator;
        if ratio.is_finite() {
            ratio
        } else {
            0.0
        }
    }

    /// Percent change relative to `prior`. A zero prior reports `0.0`, so a brand
    /// new cost center shows no change rather than infinite growth.
    #[inline]
    pub fn percent_change(change: f64, prior: f64) -> f64 {
        Self::safe_ratio(change, prior) * 100.0
    }

    /// Treats missing or non-finite costs as zero.
    #[inline]
    pub fn cost_or_zero(value: Option<f64>) -> f64 {
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}
