//! The individual chart renderers. Each takes an engine query result and
//! returns a finished SVG document.

pub mod bar;
pub mod box_plot;
pub mod heatmap;
pub mod histogram;
pub mod line;
pub mod pie;
pub mod scatter;

pub use box_plot::BoxGroup;
pub use scatter::ScatterPoint;

use crate::svg::{Anchor, Canvas, format_number};

pub(crate) const CHART_WIDTH: f64 = 800.0;
pub(crate) const CHART_HEIGHT: f64 = 450.0;

const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#dddddd";

/// The rectangular plot area left inside the chart margins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Frame {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Maps a data value onto the vertical pixel axis (inverted).
    pub fn y_at(&self, value: f64, min: f64, max: f64) -> f64 {
        let span = max - min;
        if span == 0.0 {
            return (self.y0 + self.y1) / 2.0;
        }
        self.y1 - (value - min) / span * self.height()
    }

    /// Maps a data value onto the horizontal pixel axis.
    pub fn x_at(&self, value: f64, min: f64, max: f64) -> f64 {
        let span = max - min;
        if span == 0.0 {
            return (self.x0 + self.x1) / 2.0;
        }
        self.x0 + (value - min) / span * self.width()
    }
}

/// Standard canvas with title; returns the canvas and its plot frame.
pub(crate) fn titled_canvas(title: &str) -> (Canvas, Frame) {
    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT);
    canvas.text(
        CHART_WIDTH / 2.0,
        26.0,
        title,
        18.0,
        Anchor::Middle,
        AXIS_COLOR,
    );
    let frame = Frame { x0: 75.0, y0: 48.0, x1: CHART_WIDTH - 30.0, y1: CHART_HEIGHT - 70.0 };
    (canvas, frame)
}

/// Pads a degenerate value range so scales never collapse to zero span.
pub(crate) fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        (min - pad, max + pad)
    } else {
        (min, max)
    }
}

/// Draws the left axis with five ticks, horizontal gridlines, and a label.
pub(crate) fn draw_y_axis(canvas: &mut Canvas, frame: &Frame, min: f64, max: f64, label: &str) {
    canvas.line(frame.x0, frame.y0, frame.x0, frame.y1, AXIS_COLOR, 1.0);
    for i in 0..=4 {
        let value = min + (max - min) * i as f64 / 4.0;
        let y = frame.y_at(value, min, max);
        if i > 0 {
            canvas.line(frame.x0, y, frame.x1, y, GRID_COLOR, 0.5);
        }
        canvas.text(
            frame.x0 - 8.0,
            y + 4.0,
            &format_number(value),
            11.0,
            Anchor::End,
            AXIS_COLOR,
        );
    }
    if !label.is_empty() {
        canvas.text_rotated(18.0, (frame.y0 + frame.y1) / 2.0, label, 12.0, -90.0);
    }
}

/// Draws the bottom axis line and its label.
pub(crate) fn draw_x_axis(canvas: &mut Canvas, frame: &Frame, label: &str) {
    canvas.line(frame.x0, frame.y1, frame.x1, frame.y1, AXIS_COLOR, 1.0);
    if !label.is_empty() {
        canvas.text(
            (frame.x0 + frame.x1) / 2.0,
            CHART_HEIGHT - 12.0,
            label,
            12.0,
            Anchor::Middle,
            AXIS_COLOR,
        );
    }
}
