//! Plain-text tables for `econ show`, `econ summary`, and `econ list`.

use crate::app::pipeline::ChartView;
use crate::domain::{DataAnomaly, Frequency, INDICATORS};
use crate::series::LatestChange;

/// Format a windowed series with its metadata and change-axis domain.
pub fn format_view(view: &ChartView, anomalies: &[DataAnomaly]) -> String {
    let ind = view.indicator;
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} ({}, FRED {}) ===\n",
        ind.title, ind.id, ind.series_key
    ));
    out.push_str(&format!("{}\n", ind.description));
    out.push_str(&format!(
        "Unit: {} | Frequency: {}\n",
        ind.unit,
        ind.frequency.display_name()
    ));
    out.push_str(&format!(
        "Window: {} | cutoff: {} | showing {} of {} observations\n",
        view.window.label(),
        view.cutoff.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
        view.points.len(),
        view.total,
    ));
    out.push_str(&format!(
        "Change axis: [{}, {}] %\n",
        view.domain.low, view.domain.high
    ));
    if ind.frequency == Frequency::Quarterly {
        out.push_str(&format!(
            "Note: {} is published quarterly (every 3 months)\n",
            ind.id
        ));
    }
    for anomaly in anomalies {
        out.push_str(&format!("Warning: {anomaly}\n"));
    }

    out.push('\n');
    out.push_str(&format!("{:<10} {:>16} {:>10}\n", "date", "value", "change"));
    out.push_str(&format!("{:-<10} {:-<16} {:-<10}\n", "", "", ""));
    for p in &view.points {
        out.push_str(&format!(
            "{:<10} {:>16.2} {:>10}\n",
            p.date,
            p.value,
            fmt_change(p.period_change)
        ));
    }

    out
}

/// Format the latest-change table (one row per indicator).
pub fn format_summary(rows: &[LatestChange]) -> String {
    let mut out = String::new();
    out.push_str("Latest period-over-period change\n\n");
    out.push_str(&format!(
        "{:<34} {:<10} {:>14} {:>10}\n",
        "indicator", "as of", "latest", "change"
    ));
    out.push_str(&format!("{:-<34} {:-<10} {:-<14} {:-<10}\n", "", "", "", ""));

    for row in rows {
        let as_of = row.as_of.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let latest = row
            .latest
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let mut change = fmt_change(row.change);
        if row.insufficient {
            change.push('*');
        }
        out.push_str(&format!(
            "{:<34} {:<10} {:>14} {:>10}\n",
            truncate(row.indicator.title, 34),
            as_of,
            latest,
            change
        ));
    }

    if rows.iter().any(|r| r.insufficient) {
        out.push_str("\n* fewer than two observations available\n");
    }
    out
}

/// Format the indicator registry.
pub fn format_registry() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:<10} {:<10} {:<34} {}\n",
        "id", "series", "freq", "title", "unit"
    ));
    for ind in INDICATORS.iter() {
        out.push_str(&format!(
            "{:<14} {:<10} {:<10} {:<34} {}\n",
            ind.id,
            ind.series_key,
            ind.frequency.display_name(),
            truncate(ind.title, 34),
            ind.unit
        ));
    }
    out
}

/// `+1.25%`, `-0.40%`, or `-` when absent.
pub fn fmt_change(change: Option<f64>) -> String {
    match change {
        Some(v) => format!("{v:+.2}%"),
        None => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
