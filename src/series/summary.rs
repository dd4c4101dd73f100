//! Latest-period change across indicators.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{IndicatorDefinition, Observation};
use crate::series::change::percent_change;

/// Change between the two most recent observations of one indicator.
#[derive(Debug, Clone, Serialize)]
pub struct LatestChange {
    pub indicator: &'static IndicatorDefinition,
    pub as_of: Option<NaiveDate>,
    pub latest: Option<f64>,
    /// `None` only when the previous value is zero.
    pub change: Option<f64>,
    /// Fewer than two observations were available; `change` is reported as 0.
    pub insufficient: bool,
}

/// Summarize the last two points of an ascending series.
pub fn latest_change(indicator: &'static IndicatorDefinition, series: &[Observation]) -> LatestChange {
    let latest = series.last();
    match series {
        [.., previous, current] => LatestChange {
            indicator,
            as_of: Some(current.date),
            latest: Some(current.value),
            change: percent_change(previous.value, current.value),
            insufficient: false,
        },
        _ => LatestChange {
            indicator,
            as_of: latest.map(|o| o.date),
            latest: latest.map(|o| o.value),
            change: Some(0.0),
            insufficient: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::INDICATORS;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn uses_last_two_points() {
        let def = INDICATORS.get("INFLATION").unwrap();
        let series = vec![
            Observation::new(d(2024, 1), 300.0),
            Observation::new(d(2024, 2), 310.0),
            Observation::new(d(2024, 3), 313.1),
        ];
        let row = latest_change(def, &series);
        assert_eq!(row.as_of, Some(d(2024, 3)));
        assert_eq!(row.change, Some(1.0));
        assert!(!row.insufficient);
    }

    #[test]
    fn single_point_reports_zero() {
        let def = INDICATORS.get("GDP").unwrap();
        let row = latest_change(def, &[Observation::new(d(2024, 1), 28_000.0)]);
        assert_eq!(row.change, Some(0.0));
        assert!(row.insufficient);
        assert_eq!(row.latest, Some(28_000.0));

        let empty = latest_change(def, &[]);
        assert!(empty.insufficient);
        assert_eq!(empty.as_of, None);
    }

    #[test]
    fn zero_previous_value_is_blank() {
        let def = INDICATORS.get("FED_RATE").unwrap();
        let series = vec![
            Observation::new(d(2021, 1), 0.0),
            Observation::new(d(2021, 2), 0.08),
        ];
        let row = latest_change(def, &series);
        assert_eq!(row.change, None);
        assert!(!row.insufficient);
    }
}
