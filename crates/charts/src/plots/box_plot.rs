use crate::error::ChartError;
use crate::plots::{draw_x_axis, draw_y_axis, padded_range, titled_canvas};
use crate::svg::palette_color;

/// The five-number summary of one group, whiskers at min/max.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// One box-and-whisker per group.
pub fn render(groups: &[BoxGroup], title: &str, y_label: &str) -> Result<String, ChartError> {
    if groups.is_empty() {
        return Err(ChartError::EmptyInput(title.to_string()));
    }

    let (mut canvas, frame) = titled_canvas(title);
    let (lo, hi) = padded_range(
        groups.iter().map(|g| g.min).fold(f64::INFINITY, f64::min),
        groups.iter().map(|g| g.max).fold(f64::NEG_INFINITY, f64::max),
    );

    draw_y_axis(&mut canvas, &frame, lo, hi, y_label);
    draw_x_axis(&mut canvas, &frame, "");

    let slot = frame.width() / groups.len() as f64;
    let box_width = (slot * 0.5).min(70.0);

    for (i, group) in groups.iter().enumerate() {
        let center = frame.x0 + slot * (i as f64 + 0.5);
        let left = center - box_width / 2.0;

        let y_min = frame.y_at(group.min, lo, hi);
        let y_q1 = frame.y_at(group.q1, lo, hi);
        let y_med = frame.y_at(group.median, lo, hi);
        let y_q3 = frame.y_at(group.q3, lo, hi);
        let y_max = frame.y_at(group.max, lo, hi);

        // Whiskers with end caps, then the interquartile box and median line.
        canvas.line(center, y_min, center, y_q1, "#333333", 1.0);
        canvas.line(center, y_q3, center, y_max, "#333333", 1.0);
        canvas.line(left + 8.0, y_min, left + box_width - 8.0, y_min, "#333333", 1.0);
        canvas.line(left + 8.0, y_max, left + box_width - 8.0, y_max, "#333333", 1.0);
        canvas.rect_outlined(left, y_q3, box_width, y_q1 - y_q3, palette_color(i), "#333333");
        canvas.line(left, y_med, left + box_width, y_med, "#333333", 2.0);

        canvas.text_rotated(center, frame.y1 + 14.0, &group.label, 11.0, -35.0);
    }

    Ok(canvas.into_svg())
}
