//! Trailing time-window filter.
//!
//! The window is anchored on the latest observation, and one point before the
//! cutoff is kept so the first visible bar still carries a change computed
//! against real prior data.

use chrono::{Months, NaiveDate};

use crate::domain::{AnnotatedObservation, TimeWindow};

/// Earliest date inside `window` when the newest observation is `latest`.
///
/// Month arithmetic clamps to the last valid day of the target month
/// (Mar 31 minus one month is Feb 28/29). `None` for `TimeWindow::All`.
pub fn cutoff(latest: NaiveDate, window: TimeWindow) -> Option<NaiveDate> {
    let months = window.months()?;
    // Only fails before the start of the representable calendar.
    Some(
        latest
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN),
    )
}

/// Restrict an ascending series to `window`, keeping one look-back point.
///
/// The result is always a contiguous suffix of `series`.
pub fn filter(series: &[AnnotatedObservation], window: TimeWindow) -> &[AnnotatedObservation] {
    let Some(last) = series.last() else {
        return series;
    };
    let Some(cutoff) = cutoff(last.date, window) else {
        return series;
    };

    let start = series.partition_point(|p| p.date < cutoff);
    if start == series.len() {
        return &series[series.len()..];
    }
    &series[start.saturating_sub(1)..]
}
