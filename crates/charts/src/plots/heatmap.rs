use crate::error::ChartError;
use crate::plots::{CHART_HEIGHT, CHART_WIDTH};
use crate::svg::{Anchor, Canvas};
use analytics::CorrelationMatrix;

/// The correlation matrix as a colored grid with the coefficient in each cell.
pub fn render(matrix: &CorrelationMatrix, title: &str) -> Result<String, ChartError> {
    if matrix.is_empty() {
        return Err(ChartError::EmptyInput(title.to_string()));
    }

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
    canvas.text(CHART_WIDTH / 2.0, 26.0, title, 18.0, Anchor::Middle, "#333333");

    let n = matrix.columns.len();
    let left = 140.0;
    let top = 70.0;
    let cell = ((CHART_WIDTH - left - 40.0) / n as f64)
        .min((CHART_HEIGHT - top - 30.0) / n as f64);

    for (i, row_name) in matrix.columns.iter().enumerate() {
        let y = top + cell * i as f64;
        canvas.text(
            left - 8.0,
            y + cell / 2.0 + 4.0,
            row_name,
            11.0,
            Anchor::End,
            "#333333",
        );
        for (j, value) in matrix.values[i].iter().enumerate() {
            let x = left + cell * j as f64;
            canvas.rect_outlined(x, y, cell, cell, &diverging_color(*value), "#ffffff");
            let text_color = if value.abs() > 0.6 { "#ffffff" } else { "#333333" };
            canvas.text(
                x + cell / 2.0,
                y + cell / 2.0 + 4.0,
                &format!("{:.2}", value),
                11.0,
                Anchor::Middle,
                text_color,
            );
        }
    }

    // Column labels across the top, angled to fit.
    for (j, col_name) in matrix.columns.iter().enumerate() {
        canvas.text_rotated(
            left + cell * j as f64 + cell / 2.0 + 4.0,
            top - 8.0,
            col_name,
            11.0,
            -35.0,
        );
    }

    Ok(canvas.into_svg())
}

/// Maps a coefficient in [-1, 1] onto a blue-white-red diverging scale.
fn diverging_color(value: f64) -> String {
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        ((33, 102, 172), (247, 247, 247), v + 1.0)
    } else {
        ((247, 247, 247), (178, 24, 43), v)
    };
    let channel = |a: i32, b: i32| -> i32 { a + ((b - a) as f64 * t).round() as i32 };
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2)
    )
}
