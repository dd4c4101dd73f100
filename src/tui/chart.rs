//! Plotters-powered indicator chart widget for Ratatui.
//!
//! One widget draws every indicator: a value line on the primary axis and
//! period-change bars on a secondary axis. Colours come from `ChartStyle`.
//!
//! Plotters output lands in the Ratatui buffer via `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{AnnotatedObservation, AxisDomain, IndicatorDefinition, Rgb};

const RISE: Rgb = Rgb(0x4c, 0xaf, 0x50);
const FALL: Rgb = Rgb(0xf4, 0x43, 0x36);

/// Half the width of a change bar, in x-index units.
const BAR_HALF_WIDTH: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub line: Rgb,
    pub rise: Rgb,
    pub fall: Rgb,
}

impl ChartStyle {
    pub fn for_indicator(indicator: &IndicatorDefinition) -> Self {
        Self {
            line: indicator.color,
            rise: RISE,
            fall: FALL,
        }
    }

    /// Bar colour for a change value.
    pub fn bar(&self, change: f64) -> Rgb {
        if change >= 0.0 { self.rise } else { self.fall }
    }
}

/// Render-only chart description. Points must be in ascending date order.
pub struct IndicatorChart<'a> {
    pub points: &'a [AnnotatedObservation],
    pub domain: AxisDomain,
    pub style: ChartStyle,
    pub unit: &'a str,
}

impl IndicatorChart<'_> {
    /// X bounds in point-index units.
    pub fn x_bounds(&self) -> [f64; 2] {
        match self.points.len() {
            0 | 1 => [-0.5, 0.5],
            n => [-0.5, n as f64 - 0.5],
        }
    }

    /// Value bounds padded by 5% of the span.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in self.points {
            y_min = y_min.min(p.value);
            y_max = y_max.max(p.value);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            return [0.0, 1.0];
        }
        if y_max <= y_min {
            return [y_min - 1.0, y_max + 1.0];
        }
        let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
        [y_min - pad, y_max + pad]
    }

    /// Month-year label for the observation nearest `x`.
    pub fn date_label(&self, x: f64) -> String {
        if self.points.is_empty() || !x.is_finite() {
            return String::new();
        }
        let idx = (x.round().max(0.0) as usize).min(self.points.len() - 1);
        self.points[idx].date.format("%b %Y").to_string()
    }
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

impl Widget for IndicatorChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 30 || area.height < 10 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if self.points.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No observations in this window.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        let AxisDomain { low, high } = self.domain;
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 || high <= low {
            return;
        }

        let line_color = rgb(self.style.line);
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Right, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?
                .set_secondary_coord(x0..x1, low..high);

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.unit)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| self.date_label(*v))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart
                .configure_secondary_axes()
                .y_desc("change %")
                .y_labels(5)
                .y_label_formatter(&|v| format!("{v:.0}%"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Bars first so the value line stays readable on top.
            chart.draw_secondary_series(self.points.iter().enumerate().filter_map(|(i, p)| {
                let change = p.period_change?;
                let x = i as f64;
                let color = rgb(self.style.bar(change));
                Some(Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, change)],
                    color.filled(),
                ))
            }))?;

            chart.draw_series(LineSeries::new(
                self.points.iter().enumerate().map(|(i, p)| (i as f64, p.value)),
                &line_color,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::INDICATORS;

    fn point(m: u32, value: f64, change: Option<f64>) -> AnnotatedObservation {
        AnnotatedObservation {
            date: NaiveDate::from_ymd_opt(2024, m, 1).unwrap(),
            value,
            period_change: change,
        }
    }

    #[test]
    fn style_takes_line_colour_from_indicator() {
        let gdp = INDICATORS.get("GDP").unwrap();
        let style = ChartStyle::for_indicator(gdp);
        assert_eq!(style.line, gdp.color);
        assert_eq!(style.bar(0.0), RISE);
        assert_eq!(style.bar(1.5), RISE);
        assert_eq!(style.bar(-0.1), FALL);
    }

    #[test]
    fn bounds_and_labels() {
        let points = [point(1, 10.0, None), point(2, 20.0, Some(100.0))];
        let chart = IndicatorChart {
            points: &points,
            domain: AxisDomain::symmetric(110.0),
            style: ChartStyle::for_indicator(INDICATORS.first()),
            unit: "Index",
        };
        assert_eq!(chart.x_bounds(), [-0.5, 1.5]);
        assert_eq!(chart.y_bounds(), [9.5, 20.5]);
        assert_eq!(chart.date_label(0.2), "Jan 2024");
        assert_eq!(chart.date_label(7.0), "Feb 2024");
        assert_eq!(chart.date_label(-3.0), "Jan 2024");
    }

    #[test]
    fn flat_series_gets_unit_padding() {
        let points = [point(1, 4.0, None)];
        let chart = IndicatorChart {
            points: &points,
            domain: AxisDomain::FALLBACK,
            style: ChartStyle::for_indicator(INDICATORS.first()),
            unit: "Percent",
        };
        assert_eq!(chart.x_bounds(), [-0.5, 0.5]);
        assert_eq!(chart.y_bounds(), [3.0, 5.0]);
    }

    #[test]
    fn full_chart_draws_line_and_bars() {
        let points = [
            point(1, 100.0, None),
            point(2, 110.0, Some(10.0)),
            point(3, 99.0, Some(-10.0)),
        ];
        let chart = IndicatorChart {
            points: &points,
            domain: AxisDomain::symmetric(11.0),
            style: ChartStyle::for_indicator(INDICATORS.first()),
            unit: "Index",
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        let drawn = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() != " ")
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn tiny_area_renders_hint() {
        let points = [point(1, 4.0, None)];
        let chart = IndicatorChart {
            points: &points,
            domain: AxisDomain::FALLBACK,
            style: ChartStyle::for_indicator(INDICATORS.first()),
            unit: "Percent",
        };
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);
        let first_row: String = (0..20u16).map(|x| buf[(x, 0u16)].symbol().to_string()).collect();
        assert_eq!(first_row, "Chart area too small");
    }
}
