//! Display domain for the change bars.

use crate::domain::{AnnotatedObservation, AxisDomain};

/// Headroom added above the largest absolute change.
const PADDING_RATIO: f64 = 0.10;

/// Symmetric domain around zero covering every change in `series`.
///
/// `limit = ceil(max_abs * 1.10)`; the ceiling is applied once to the padded
/// value. Falls back to `(-1, 1)` when there are no changes or all are zero.
pub fn mom_domain(series: &[AnnotatedObservation]) -> AxisDomain {
    let max_abs = series
        .iter()
        .filter_map(|p| p.period_change)
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

    let Some(max_abs) = max_abs else {
        return AxisDomain::FALLBACK;
    };

    let limit = (max_abs + max_abs * PADDING_RATIO).ceil();
    if limit <= 0.0 {
        return AxisDomain::FALLBACK;
    }
    AxisDomain::symmetric(limit)
}
