//! Property tests for the series transforms.
//!
//! Uses proptest to verify:
//! 1. Change formula: first point blank, later points match the rounded formula
//! 2. Window filter: `All` is the identity, any window yields a contiguous suffix
//! 3. Idempotence: re-filtering a windowed slice with `All` changes nothing
//! 4. Axis domain: symmetric around zero and covering every change

use chrono::{Days, NaiveDate};
use econ_dash::domain::{AnnotatedObservation, Observation, TimeWindow};
use econ_dash::series::{annotate, filter, mom_domain, round2};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        9 => (-5000.0..5000.0_f64).prop_map(|v| (v * 100.0).round() / 100.0),
        1 => Just(0.0),
    ]
}

/// Ascending series with irregular gaps (1 to 120 days).
fn arb_series() -> impl Strategy<Value = Vec<Observation>> {
    prop::collection::vec((1u64..120, arb_value()), 0..80).prop_map(|steps| {
        let mut date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        steps
            .into_iter()
            .map(|(gap, value)| {
                date = date.checked_add_days(Days::new(gap)).unwrap();
                Observation::new(date, value)
            })
            .collect()
    })
}

fn arb_window() -> impl Strategy<Value = TimeWindow> {
    prop::sample::select(TimeWindow::ALL.to_vec())
}

fn is_suffix(part: &[AnnotatedObservation], whole: &[AnnotatedObservation]) -> bool {
    part.len() <= whole.len() && whole[whole.len() - part.len()..] == *part
}

// ── 1. Change formula ────────────────────────────────────────────────

proptest! {
    #[test]
    fn annotate_matches_formula(series in arb_series()) {
        let annotated = annotate(&series);
        prop_assert_eq!(annotated.len(), series.len());

        for (i, point) in annotated.iter().enumerate() {
            prop_assert_eq!(point.date, series[i].date);
            prop_assert_eq!(point.value, series[i].value);
            if i == 0 {
                prop_assert_eq!(point.period_change, None);
                continue;
            }
            let prev = series[i - 1].value;
            if prev == 0.0 {
                prop_assert_eq!(point.period_change, None);
            } else {
                let expected = round2((series[i].value - prev) / prev * 100.0);
                prop_assert_eq!(point.period_change, Some(expected));
            }
        }
    }
}

// ── 2. Window filter ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn all_window_is_identity(series in arb_series()) {
        let annotated = annotate(&series);
        prop_assert_eq!(filter(&annotated, TimeWindow::All), annotated.as_slice());
    }

    #[test]
    fn window_is_contiguous_suffix(series in arb_series(), window in arb_window()) {
        let annotated = annotate(&series);
        let windowed = filter(&annotated, window);
        prop_assert!(is_suffix(windowed, &annotated));
        if !annotated.is_empty() {
            // The newest point is always visible.
            prop_assert_eq!(windowed.last(), annotated.last());
        }
    }

    #[test]
    fn wider_window_never_shows_less(series in arb_series()) {
        let annotated = annotate(&series);
        let lens: Vec<usize> = TimeWindow::ALL
            .iter()
            .map(|w| filter(&annotated, *w).len())
            .collect();
        prop_assert!(lens.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

// ── 3. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn refiltering_with_all_is_stable(series in arb_series(), window in arb_window()) {
        let annotated = annotate(&series);
        let once = filter(&annotated, window);
        prop_assert_eq!(filter(once, TimeWindow::All), once);
        prop_assert_eq!(filter(once, window), once);
    }
}

// ── 4. Axis domain ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn domain_is_symmetric_and_covers_changes(series in arb_series(), window in arb_window()) {
        let annotated = annotate(&series);
        let windowed = filter(&annotated, window);
        let domain = mom_domain(windowed);

        prop_assert_eq!(domain.low, -domain.high);
        prop_assert!(domain.low <= 0.0 && domain.high >= 0.0);
        prop_assert!(domain.high >= 1.0);
        prop_assert_eq!(domain.high, domain.high.ceil());
        for change in windowed.iter().filter_map(|p| p.period_change) {
            prop_assert!(domain.contains(change));
        }
    }
}
