use crate::error::ChartError;
use crate::plots::{draw_x_axis, draw_y_axis, padded_range, titled_canvas};
use crate::svg::{Anchor, palette_color};
use core_types::TimeSeriesPoint;

/// The observed series plus its trend line over a daily axis.
pub fn render(series: &[TimeSeriesPoint], title: &str) -> Result<String, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptyInput(title.to_string()));
    }

    let (mut canvas, frame) = titled_canvas(title);

    let all_values = series
        .iter()
        .flat_map(|p| [p.value, p.moving_avg])
        .collect::<Vec<f64>>();
    let (lo, hi) = padded_range(
        all_values.iter().copied().fold(f64::INFINITY, f64::min),
        all_values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );

    draw_y_axis(&mut canvas, &frame, lo, hi, "Value");
    draw_x_axis(&mut canvas, &frame, "Date");

    let x_max = (series.len() - 1).max(1) as f64;
    let observed: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (frame.x_at(i as f64, 0.0, x_max), frame.y_at(p.value, lo, hi)))
        .collect();
    let trend: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (frame.x_at(i as f64, 0.0, x_max), frame.y_at(p.moving_avg, lo, hi)))
        .collect();

    canvas.polyline(&observed, palette_color(0), 1.5);
    canvas.polyline(&trend, palette_color(1), 2.0);

    // Date labels on up to six evenly spaced points.
    let step = (series.len() / 6).max(1);
    for (i, point) in series.iter().enumerate().step_by(step) {
        canvas.text(
            frame.x_at(i as f64, 0.0, x_max),
            frame.y1 + 16.0,
            &point.date.format("%m-%d").to_string(),
            10.0,
            Anchor::Middle,
            "#333333",
        );
    }

    // Legend for the two series.
    canvas.line(frame.x1 - 150.0, frame.y0 + 10.0, frame.x1 - 120.0, frame.y0 + 10.0, palette_color(0), 2.0);
    canvas.text(frame.x1 - 114.0, frame.y0 + 14.0, "observed", 11.0, Anchor::Start, "#333333");
    canvas.line(frame.x1 - 150.0, frame.y0 + 28.0, frame.x1 - 120.0, frame.y0 + 28.0, palette_color(1), 2.0);
    canvas.text(frame.x1 - 114.0, frame.y0 + 32.0, "trend", 11.0, Anchor::Start, "#333333");

    Ok(canvas.into_svg())
}
