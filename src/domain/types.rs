//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the fetch pipeline and held in memory for one selection
//! - projected into disposable windowed views
//! - printed by the CLI report without extra conversion

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One normalized upstream data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// An observation plus its percent change versus the preceding observation.
///
/// `period_change` is computed over the complete chronological series and is
/// never recomputed after windowing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedObservation {
    pub date: NaiveDate,
    pub value: f64,
    /// Percent change rounded to two decimals.
    ///
    /// `None` for the first point of a series and for points whose predecessor
    /// value is exactly zero.
    pub period_change: Option<f64>,
}

/// Trailing window used to restrict the visible part of a series.
///
/// The window is anchored on the latest date present in the series, not on
/// wall-clock time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum TimeWindow {
    #[serde(rename = "3M")]
    #[value(name = "3m", alias = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    #[value(name = "6m", alias = "6M")]
    SixMonths,
    #[default]
    #[serde(rename = "1Y")]
    #[value(name = "1y", alias = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    #[value(name = "2y", alias = "2Y")]
    TwoYears,
    #[serde(rename = "5Y")]
    #[value(name = "5y", alias = "5Y")]
    FiveYears,
    #[serde(rename = "ALL")]
    #[value(name = "all", alias = "ALL")]
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::ThreeMonths,
        TimeWindow::SixMonths,
        TimeWindow::OneYear,
        TimeWindow::TwoYears,
        TimeWindow::FiveYears,
        TimeWindow::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::ThreeMonths => "3M",
            TimeWindow::SixMonths => "6M",
            TimeWindow::OneYear => "1Y",
            TimeWindow::TwoYears => "2Y",
            TimeWindow::FiveYears => "5Y",
            TimeWindow::All => "ALL",
        }
    }

    /// Window length in calendar months, or `None` for `All`.
    pub fn months(self) -> Option<u32> {
        match self {
            TimeWindow::ThreeMonths => Some(3),
            TimeWindow::SixMonths => Some(6),
            TimeWindow::OneYear => Some(12),
            TimeWindow::TwoYears => Some(24),
            TimeWindow::FiveYears => Some(60),
            TimeWindow::All => None,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|w| *w == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// How often the upstream series is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn display_name(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
        }
    }
}

/// 24-bit display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Immutable description of one dashboard indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorDefinition {
    /// Stable key used by selection state.
    pub id: &'static str,
    /// FRED series identifier.
    pub series_key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub color: Rgb,
    pub frequency: Frequency,
}

/// Symmetric display range for the change bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub low: f64,
    pub high: f64,
}

impl AxisDomain {
    /// Used when there is nothing to scale against.
    pub const FALLBACK: AxisDomain = AxisDomain { low: -1.0, high: 1.0 };

    pub fn symmetric(limit: f64) -> Self {
        Self {
            low: -limit,
            high: limit,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.low && v <= self.high
    }
}

/// Data conditions that prevent a meaningful percent change.
///
/// These never fail the pipeline; they are reported next to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataAnomaly {
    #[error("previous value is zero before {date}; change left blank")]
    ZeroBase { date: NaiveDate },

    #[error("only {count} observation(s); no period change available")]
    TooFewPoints { count: usize },
}
