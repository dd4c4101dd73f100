//! ASCII plotting for terminal output.
//!
//! Fixed-size grid, deterministic output. Two stacked panels share the x axis:
//! - value panel: observations `o` joined by `-`
//! - change panel: period change bars, `+` above the zero row, `-` below it,
//!   zero row drawn with `.`

use crate::app::pipeline::ChartView;
use crate::domain::AnnotatedObservation;

/// Render the windowed series of `view` into `width` x `height` characters
/// (plus header and footer lines).
pub fn render_ascii_chart(view: &ChartView, width: usize, height: usize) -> String {
    let ind = view.indicator;
    let (Some(first), Some(last)) = (view.points.first(), view.points.last()) else {
        return format!(
            "Plot: {} [{}] | no observations in window\n",
            ind.title,
            view.window.label()
        );
    };

    let width = width.max(10);
    let height = height.max(8);
    let bar_rows = (height / 3).max(3);
    let line_rows = height - bar_rows;

    let x_max = (view.points.len() - 1).max(1) as f64;
    let (v_min, v_max) = value_range(&view.points).unwrap_or((first.value - 1.0, first.value + 1.0));
    let (v_min, v_max) = pad_range(v_min, v_max, 0.05);

    let mut line = vec![vec![' '; width]; line_rows];
    let coords: Vec<(usize, usize)> = view
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                map_x(i as f64, 0.0, x_max, width),
                map_y(p.value, v_min, v_max, line_rows),
            )
        })
        .collect();
    for pair in coords.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        draw_line(&mut line, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &coords {
        line[y][x] = 'o';
    }

    let (low, high) = (view.domain.low, view.domain.high);
    let zero = map_y(0.0, low, high, bar_rows);
    let mut bars = vec![vec![' '; width]; bar_rows];
    bars[zero] = vec!['.'; width];
    for (i, p) in view.points.iter().enumerate() {
        let Some(change) = p.period_change else {
            continue;
        };
        let x = map_x(i as f64, 0.0, x_max, width);
        let y = map_y(change, low, high, bar_rows);
        if y < zero {
            for row in &mut bars[y..zero] {
                row[x] = '+';
            }
        } else if y > zero {
            for row in &mut bars[zero + 1..=y] {
                row[x] = '-';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} [{}] | value=[{v_min:.2}, {v_max:.2}] {}\n",
        ind.title,
        view.window.label(),
        ind.unit
    ));
    for row in line {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!("Change: [{low}, {high}] %\n"));
    for row in bars {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!("{} .. {}\n", first.date, last.date));
    out
}

fn value_range(points: &[AnnotatedObservation]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for p in points {
        min_v = min_v.min(p.value);
        max_v = max_v.max(p.value);
    }
    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // top row is max
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::app::pipeline::{ChartData, chart_view};
    use crate::domain::{INDICATORS, Observation, TimeWindow};
    use crate::series::annotate;

    fn view_of(values: &[f64]) -> ChartView {
        let obs: Vec<Observation> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let month = 1 + 3 * i as u32;
                Observation::new(NaiveDate::from_ymd_opt(2024, month, 1).unwrap(), v)
            })
            .collect();
        let data = ChartData {
            indicator: INDICATORS.get("GDP").unwrap(),
            series: annotate(&obs),
            anomalies: Vec::new(),
        };
        chart_view(&data, TimeWindow::All)
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let txt = render_ascii_chart(&view_of(&[100.0, 110.0, 99.0]), 10, 9);
        let expected = concat!(
            "Plot: Gross Domestic Product [ALL] | value=[98.45, 110.55] Billions of Dollars\n",
            "     o    \n",
            "    - -   \n",
            "  --   -  \n",
            " -     -  \n",
            "o       - \n",
            "         o\n",
            "Change: [-11, 11] %\n",
            "     +    \n",
            "..........\n",
            "         -\n",
            "2024-01-01 .. 2024-07-01\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_window_has_a_one_line_message() {
        let txt = render_ascii_chart(&view_of(&[]), 40, 12);
        assert_eq!(txt, "Plot: Gross Domestic Product [ALL] | no observations in window\n");
    }

    #[test]
    fn flat_single_point_still_renders() {
        let txt = render_ascii_chart(&view_of(&[5.0]), 10, 8);
        assert!(txt.contains("value=[3.90, 6.10]"));
        let grid: String = txt.lines().skip(1).take(5).collect();
        assert_eq!(grid.matches('o').count(), 1);
    }
}
