use crate::error::ChartError;
use crate::plots::{draw_x_axis, draw_y_axis, padded_range, titled_canvas};
use crate::svg::palette_color;
use analytics::GroupAggregate;

/// A vertical bar per group, labelled with the group key.
pub fn render(
    groups: &[GroupAggregate],
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<String, ChartError> {
    if groups.is_empty() {
        return Err(ChartError::EmptyInput(title.to_string()));
    }

    let (mut canvas, frame) = titled_canvas(title);
    let max = groups.iter().map(|g| g.value).fold(f64::NEG_INFINITY, f64::max);
    let min = groups.iter().map(|g| g.value).fold(0.0, f64::min);
    let (min, max) = padded_range(min, max);

    draw_y_axis(&mut canvas, &frame, min, max, y_label);
    draw_x_axis(&mut canvas, &frame, x_label);

    let slot = frame.width() / groups.len() as f64;
    let bar_width = slot * 0.7;
    let baseline = frame.y_at(0.0_f64.clamp(min, max), min, max);

    for (i, group) in groups.iter().enumerate() {
        let x = frame.x0 + slot * i as f64 + (slot - bar_width) / 2.0;
        let top = frame.y_at(group.value, min, max);
        let (y, height) = if top <= baseline {
            (top, baseline - top)
        } else {
            (baseline, top - baseline)
        };
        canvas.rect(x, y, bar_width, height, palette_color(0));
        canvas.text_rotated(
            x + bar_width / 2.0,
            frame.y1 + 14.0,
            group.label(),
            11.0,
            -35.0,
        );
    }

    Ok(canvas.into_svg())
}
