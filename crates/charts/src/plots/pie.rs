use crate::error::ChartError;
use crate::plots::{CHART_HEIGHT, CHART_WIDTH};
use crate::svg::{Anchor, Canvas, palette_color};
use analytics::ValueCount;
use std::f64::consts::TAU;

/// A pie of the categorical distribution, with a legend carrying percentages.
pub fn render(distribution: &[ValueCount], title: &str) -> Result<String, ChartError> {
    let total: usize = distribution.iter().map(|v| v.count).sum();
    if total == 0 {
        return Err(ChartError::EmptyInput(title.to_string()));
    }

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
    canvas.text(CHART_WIDTH / 2.0, 26.0, title, 18.0, Anchor::Middle, "#333333");

    let (cx, cy) = (CHART_WIDTH * 0.38, CHART_HEIGHT / 2.0 + 14.0);
    let radius = (CHART_HEIGHT / 2.0 - 70.0).max(60.0);

    // Angles start at twelve o'clock and advance clockwise.
    let mut angle = -TAU / 4.0;
    for (i, slice) in distribution.iter().enumerate() {
        let fraction = slice.count as f64 / total as f64;
        let color = palette_color(i);
        if fraction >= 0.9999 {
            canvas.circle(cx, cy, radius, color, 1.0);
            break;
        }
        let sweep = fraction * TAU;
        let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
        let end = angle + sweep;
        let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
        let large_arc = if sweep > TAU / 2.0 { 1 } else { 0 };
        let d = format!(
            "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
        );
        canvas.path(&d, color, "#ffffff");
        angle = end;
    }

    // Legend, one row per slice.
    let legend_x = CHART_WIDTH * 0.68;
    for (i, slice) in distribution.iter().enumerate() {
        let y = 80.0 + i as f64 * 24.0;
        canvas.rect(legend_x, y - 11.0, 14.0, 14.0, palette_color(i));
        let pct = slice.count as f64 / total as f64 * 100.0;
        canvas.text(
            legend_x + 22.0,
            y,
            &format!("{}: {} ({:.1}%)", slice.value, slice.count, pct),
            12.0,
            Anchor::Start,
            "#333333",
        );
    }

    Ok(canvas.into_svg())
}
