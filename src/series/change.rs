//! Period-over-period percent change.

use crate::domain::{AnnotatedObservation, DataAnomaly, Observation};

/// Round to two decimals, halves away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Percent change from `previous` to `current`, rounded to two decimals.
///
/// Returns `None` when `previous` is zero or the result is not finite.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let pct = round2((current - previous) / previous * 100.0);
    pct.is_finite().then_some(pct)
}

/// Annotate an ascending series with the change versus the previous point.
///
/// Must be called on the complete series; windowed views reuse these values.
pub fn annotate(series: &[Observation]) -> Vec<AnnotatedObservation> {
    let mut out = Vec::with_capacity(series.len());
    for (i, obs) in series.iter().enumerate() {
        let period_change = if i == 0 {
            None
        } else {
            percent_change(series[i - 1].value, obs.value)
        };
        out.push(AnnotatedObservation {
            date: obs.date,
            value: obs.value,
            period_change,
        });
    }
    out
}

/// Conditions under which `annotate` leaves changes blank beyond the first point.
pub fn anomalies(series: &[Observation]) -> Vec<DataAnomaly> {
    if series.len() < 2 {
        return vec![DataAnomaly::TooFewPoints {
            count: series.len(),
        }];
    }

    series
        .windows(2)
        .filter(|pair| pair[0].value == 0.0)
        .map(|pair| DataAnomaly::ZeroBase { date: pair[1].date })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn annotate_matches_three_point_scenario() {
        let series = vec![
            Observation::new(d(2024, 1, 1), 100.0),
            Observation::new(d(2024, 2, 1), 110.0),
            Observation::new(d(2024, 3, 1), 99.0),
        ];
        let out = annotate(&series);
        let changes: Vec<_> = out.iter().map(|o| o.period_change).collect();
        assert_eq!(changes, vec![None, Some(10.0), Some(-10.0)]);
        assert_eq!(out[2].value, 99.0);
        assert_eq!(out[2].date, d(2024, 3, 1));
    }

    #[test]
    fn zero_base_yields_blank_change() {
        let series = vec![
            Observation::new(d(2020, 3, 1), 1.5),
            Observation::new(d(2020, 4, 1), 0.0),
            Observation::new(d(2020, 5, 1), 0.05),
            Observation::new(d(2020, 6, 1), 0.1),
        ];
        let out = annotate(&series);
        assert_eq!(out[1].period_change, Some(-100.0));
        assert_eq!(out[2].period_change, None);
        assert_eq!(out[3].period_change, Some(100.0));

        assert_eq!(
            anomalies(&series),
            vec![DataAnomaly::ZeroBase { date: d(2020, 5, 1) }]
        );
    }

    #[test]
    fn short_series_is_reported() {
        assert!(annotate(&[]).is_empty());

        let one = [Observation::new(d(2024, 1, 1), 5.0)];
        let out = annotate(&one);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].period_change, None);
        assert_eq!(anomalies(&one), vec![DataAnomaly::TooFewPoints { count: 1 }]);
    }

    #[test]
    fn round2_rounds_halves_away_from_zero() {
        assert_eq!(round2(1.125), 1.13);
        assert_eq!(round2(-1.125), -1.13);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn percent_change_handles_negative_base() {
        // Divides by the signed base, so -2 -> -1 reads as -50%.
        assert_eq!(percent_change(-2.0, -1.0), Some(-50.0));
        assert_eq!(percent_change(0.0, 1.0), None);
    }
}
