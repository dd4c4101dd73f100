//! Shared "chart pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> annotate (full series) -> window filter -> axis domain
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::NaiveDate;

use crate::data::ObservationSource;
use crate::domain::{
    AnnotatedObservation, AxisDomain, DataAnomaly, INDICATORS, IndicatorDefinition, TimeWindow,
};
use crate::error::FetchError;
use crate::series::{self, LatestChange};

/// Observations per indicator needed for the latest-change summary.
pub const SUMMARY_LIMIT: usize = 2;

/// Fully annotated series for one indicator (the fetch result).
#[derive(Debug, Clone)]
pub struct ChartData {
    pub indicator: &'static IndicatorDefinition,
    pub series: Vec<AnnotatedObservation>,
    pub anomalies: Vec<DataAnomaly>,
}

/// Windowed projection of `ChartData`, ready to hand to a renderer.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub indicator: &'static IndicatorDefinition,
    pub window: TimeWindow,
    /// First in-window date; `None` for `TimeWindow::All` or an empty series.
    pub cutoff: Option<NaiveDate>,
    pub points: Vec<AnnotatedObservation>,
    pub domain: AxisDomain,
    /// Length of the unfiltered series.
    pub total: usize,
}

/// Fetch one indicator and annotate the complete series.
pub fn load_chart(
    source: &dyn ObservationSource,
    indicator: &'static IndicatorDefinition,
    limit: usize,
) -> Result<ChartData, FetchError> {
    let observations = source.fetch_series(indicator.series_key, limit)?;

    let anomalies = series::anomalies(&observations);
    for anomaly in &anomalies {
        tracing::warn!(indicator = indicator.id, %anomaly, "data anomaly");
    }

    Ok(ChartData {
        indicator,
        series: series::annotate(&observations),
        anomalies,
    })
}

/// Project `data` onto `window` and compute the bar axis domain.
pub fn chart_view(data: &ChartData, window: TimeWindow) -> ChartView {
    let points = series::filter(&data.series, window).to_vec();
    let domain = series::mom_domain(&points);
    let cutoff = data
        .series
        .last()
        .and_then(|last| series::cutoff(last.date, window));

    ChartView {
        indicator: data.indicator,
        window,
        cutoff,
        points,
        domain,
        total: data.series.len(),
    }
}

/// Latest period change for every registered indicator.
///
/// All-or-nothing: the first fetch failure fails the summary.
pub fn load_summary(source: &dyn ObservationSource) -> Result<Vec<LatestChange>, FetchError> {
    INDICATORS
        .iter()
        .map(|indicator| {
            let observations = source.fetch_series(indicator.series_key, SUMMARY_LIMIT)?;
            Ok(series::latest_change(indicator, &observations))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory `ObservationSource` shared by pipeline and dashboard tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use crate::data::ObservationSource;
    use crate::domain::Observation;
    use crate::error::FetchError;

    #[derive(Default)]
    pub struct StaticSource {
        pub series: HashMap<String, Result<Vec<Observation>, FetchError>>,
        pub calls: AtomicUsize,
        pub limits: Mutex<Vec<usize>>,
    }

    impl StaticSource {
        pub fn with(mut self, key: &str, result: Result<Vec<Observation>, FetchError>) -> Self {
            self.series.insert(key.to_string(), result);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ObservationSource for StaticSource {
        fn fetch_series(&self, series_key: &str, limit: usize) -> Result<Vec<Observation>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.limits.lock().unwrap().push(limit);
            let all = self
                .series
                .get(series_key)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Status { status: 400, message: "unknown series".into() }))?;
            let skip = all.len().saturating_sub(limit);
            Ok(all[skip..].to_vec())
        }
    }

    /// Monthly series starting at `year-01-01` with the given values.
    pub fn monthly(year: i32, values: &[f64]) -> Vec<Observation> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let y = year + (i / 12) as i32;
                let m = (i % 12) as u32 + 1;
                Observation::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), v)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{StaticSource, monthly};
    use super::*;

    #[test]
    fn load_chart_annotates_full_series_before_windowing() {
        let values: Vec<f64> = (0..24).map(|i| 100.0 + i as f64).collect();
        let source = StaticSource::default().with("UNRATE", Ok(monthly(2022, &values)));
        let indicator = INDICATORS.get("UNEMPLOYMENT").unwrap();

        let data = load_chart(&source, indicator, 500).unwrap();
        assert_eq!(data.series.len(), 24);
        assert!(data.anomalies.is_empty());

        let view = chart_view(&data, TimeWindow::ThreeMonths);
        // 2023-12 minus 3M = 2023-09; look-back point is 2023-08.
        assert_eq!(view.points.len(), 5);
        assert_eq!(view.points[0].date, NaiveDate::from_ymd_opt(2023, 8, 1).unwrap());
        assert_eq!(view.cutoff, NaiveDate::from_ymd_opt(2023, 9, 1));
        // Look-back point keeps its change against 2023-07 (118 -> 119).
        assert_eq!(view.points[0].period_change, Some(0.85));
        assert_eq!(view.total, 24);
        assert_eq!(view.domain, AxisDomain::symmetric(1.0));
    }

    #[test]
    fn fetch_errors_propagate() {
        let source = StaticSource::default()
            .with("GDP", Err(FetchError::Transport("timed out".to_string())));
        let err = load_chart(&source, INDICATORS.get("GDP").unwrap(), 500).unwrap_err();
        assert_eq!(err, FetchError::Transport("timed out".to_string()));
    }

    #[test]
    fn anomalies_are_collected() {
        let source = StaticSource::default().with("FEDFUNDS", Ok(monthly(2020, &[0.0, 0.05])));
        let data = load_chart(&source, INDICATORS.get("FED_RATE").unwrap(), 500).unwrap();
        assert_eq!(data.anomalies.len(), 1);
        assert_eq!(data.series[1].period_change, None);
    }

    #[test]
    fn summary_requests_two_points_per_indicator() {
        let mut source = StaticSource::default();
        for indicator in INDICATORS.iter() {
            source = source.with(indicator.series_key, Ok(monthly(2024, &[100.0, 102.0, 101.0])));
        }
        let rows = load_summary(&source).unwrap();
        assert_eq!(rows.len(), INDICATORS.len());
        assert_eq!(rows[0].change, Some(-0.98));
        assert!(source.limits.lock().unwrap().iter().all(|&l| l == SUMMARY_LIMIT));
    }

    #[test]
    fn summary_fails_as_a_whole() {
        let source = StaticSource::default().with("GDP", Ok(monthly(2024, &[1.0, 2.0])));
        assert!(load_summary(&source).is_err());
    }
}
