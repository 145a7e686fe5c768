//! ASCII plotting of the daily series for terminal output.
//!
//! Fixed-size grid, deterministic output:
//! - daily values: `o`
//! - connecting line: `-`

use crate::domain::TimeSeries;
use crate::parse::format_grouped;

/// Render the series as a line chart, one column span per day.
pub fn render_series_plot(series: &TimeSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
        return "Plot: (no data)\n".to_string();
    };

    let values: Vec<f64> = series.points.iter().map(|p| p.new_cases as f64).collect();
    let (v_min, v_max) = value_range(&values);
    let (y_min, y_max) = pad_range(v_min, v_max, 0.05);
    let x_max = (values.len().max(2) - 1) as f64;

    let mut grid = vec![vec![' '; width]; height];
    let cells: Vec<(usize, usize)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (map_x(i as f64, x_max, width), map_y(v, y_min, y_max, height)))
        .collect();

    // Line first so the day markers overlay it.
    for pair in cells.windows(2) {
        draw_line(&mut grid, pair[0], pair[1], '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} .. {} | new cases=[{}, {}]\n",
        first.date,
        last.date,
        format_grouped(v_min as i64),
        format_grouped(v_max as i64)
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if max <= min {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * frac;
    (min - pad, max + pad)
}

fn map_x(x: f64, x_max: f64, width: usize) -> usize {
    let u = (x / x_max).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Connect two cells by stepping along the longer axis.
///
/// Cells already holding a glyph are left alone.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let steps = dx.abs().max(dy.abs()) as usize;

    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
        let x = (x0 + t * dx).round() as usize;
        let y = (y0 + t * dy).round() as usize;
        if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            if *cell == ' ' {
                *cell = ch;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::SeriesPoint;

    fn series(values: &[i64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2023, 3, 9).unwrap();
        TimeSeries {
            points: values
                .iter()
                .zip(start.iter_days())
                .map(|(&new_cases, date)| SeriesPoint { date, new_cases })
                .collect(),
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let txt = render_series_plot(&series(&[100, 110]), 10, 5);
        let expected = concat!(
            "Plot: 2023-03-09 .. 2023-03-10 | new cases=[100, 110]\n",
            "        -o\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_point_plots_in_the_middle_row() {
        let txt = render_series_plot(&series(&[5_000]), 10, 5);
        let rows: Vec<&str> = txt.lines().collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[3], "o         ");
    }

    #[test]
    fn steep_segment_fills_every_row() {
        let mut grid = vec![vec![' '; 3]; 5];
        draw_line(&mut grid, (0, 4), (2, 0), '-');
        let filled: Vec<usize> = grid
            .iter()
            .map(|row| row.iter().filter(|&&c| c == '-').count())
            .collect();
        assert_eq!(filled, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn empty_series() {
        assert_eq!(render_series_plot(&TimeSeries::default(), 40, 10), "Plot: (no data)\n");
    }
}
