use crate::error::ChartError;
use crate::plots::{draw_x_axis, draw_y_axis, padded_range, titled_canvas};
use crate::svg::{Anchor, format_number, palette_color};

/// A frequency histogram over a numeric column.
pub fn render(
    values: &[f64],
    bins: usize,
    title: &str,
    x_label: &str,
) -> Result<String, ChartError> {
    if values.is_empty() {
        return Err(ChartError::EmptyInput(title.to_string()));
    }
    let bins = bins.max(1);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = padded_range(min, max);
    let bin_width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let index = (((v - lo) / bin_width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    let (mut canvas, frame) = titled_canvas(title);
    let peak = *counts.iter().max().unwrap_or(&1) as f64;
    draw_y_axis(&mut canvas, &frame, 0.0, peak, "Frequency");
    draw_x_axis(&mut canvas, &frame, x_label);

    let slot = frame.width() / bins as f64;
    for (i, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x = frame.x0 + slot * i as f64;
        let top = frame.y_at(count as f64, 0.0, peak);
        canvas.rect_outlined(x, top, slot, frame.y1 - top, palette_color(0), "#ffffff");
    }

    // Bin-edge labels at every other edge to avoid crowding.
    for i in (0..=bins).step_by(2.max(bins / 6)) {
        let edge = lo + bin_width * i as f64;
        canvas.text(
            frame.x0 + slot * i as f64,
            frame.y1 + 16.0,
            &format_number(edge),
            10.0,
            Anchor::Middle,
            "#333333",
        );
    }

    Ok(canvas.into_svg())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let svg = render(&values, 10, "Distribution", "Value").unwrap();
        // 10 equal bins of 10 values each, all drawn.
        assert_eq!(svg.matches("stroke=\"#ffffff\"").count(), 10);
    }

    #[test]
    fn identical_values_still_render() {
        let svg = render(&[5.0, 5.0, 5.0], 10, "Flat", "Value").unwrap();
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn empty_values_are_an_error() {
        assert!(matches!(
            render(&[], 10, "t", "x"),
            Err(ChartError::EmptyInput(_))
        ));
    }
}
