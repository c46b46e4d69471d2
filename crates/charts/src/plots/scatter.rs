use crate::error::ChartError;
use crate::plots::{draw_x_axis, draw_y_axis, padded_range, titled_canvas};
use crate::svg::{Anchor, palette_color};

/// One observation: two numeric coordinates plus an optional series label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub group: Option<String>,
}

/// A scatter of two numeric columns, colored by series in first-seen order.
pub fn render(
    points: &[ScatterPoint],
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<String, ChartError> {
    if points.is_empty() {
        return Err(ChartError::EmptyInput(title.to_string()));
    }

    let (mut canvas, frame) = titled_canvas(title);

    let (x_min, x_max) = padded_range(
        points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
        points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
    );
    let (y_min, y_max) = padded_range(
        points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
        points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
    );

    draw_y_axis(&mut canvas, &frame, y_min, y_max, y_label);
    draw_x_axis(&mut canvas, &frame, x_label);

    // Series color assignment follows first appearance.
    let mut series: Vec<String> = Vec::new();
    for point in points {
        let label = point.group.clone().unwrap_or_else(|| "all".to_string());
        if !series.contains(&label) {
            series.push(label);
        }
    }

    for point in points {
        let label = point.group.as_deref().unwrap_or("all");
        let color_index = series.iter().position(|s| s == label).unwrap_or(0);
        canvas.circle(
            frame.x_at(point.x, x_min, x_max),
            frame.y_at(point.y, y_min, y_max),
            3.5,
            palette_color(color_index),
            0.7,
        );
    }

    if series.len() > 1 {
        for (i, label) in series.iter().enumerate() {
            let y = frame.y0 + 10.0 + i as f64 * 18.0;
            canvas.circle(frame.x1 - 90.0, y - 4.0, 5.0, palette_color(i), 1.0);
            canvas.text(frame.x1 - 78.0, y, label, 11.0, Anchor::Start, "#333333");
        }
    }

    Ok(canvas.into_svg())
}
