//! # Omni-Grid Charts
//!
//! Renders the engine's query results into SVG artifacts and an HTML
//! dashboard. This crate is a pure consumer: it takes well-typed query
//! results and produces files, with no knowledge of where the data came from.
//!
//! ## Public API
//!
//! - `ChartRenderer`: writes each chart into the configured output directory.
//! - `plots`: the individual chart functions, usable without touching disk.
//! - `ChartError`: the specific error types that can be returned from this crate.

use analytics::{CorrelationMatrix, GroupAggregate, ValueCount};
use core_types::TimeSeriesPoint;
use std::fs;
use std::path::{Path, PathBuf};

pub mod error;
pub mod plots;
pub mod svg;

pub use error::ChartError;
pub use plots::{BoxGroup, ScatterPoint};

/// Renders charts into an output directory, one file per artifact.
pub struct ChartRenderer {
    output_dir: PathBuf,
}

impl ChartRenderer {
    /// Creates the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ChartError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn bar_chart(
        &self,
        groups: &[GroupAggregate],
        title: &str,
        x_label: &str,
        y_label: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::bar::render(groups, title, x_label, y_label)?)
    }

    pub fn pie_chart(
        &self,
        distribution: &[ValueCount],
        title: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::pie::render(distribution, title)?)
    }

    pub fn histogram(
        &self,
        values: &[f64],
        bins: usize,
        title: &str,
        x_label: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::histogram::render(values, bins, title, x_label)?)
    }

    pub fn scatter_plot(
        &self,
        points: &[ScatterPoint],
        title: &str,
        x_label: &str,
        y_label: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::scatter::render(points, title, x_label, y_label)?)
    }

    pub fn box_plot(
        &self,
        groups: &[BoxGroup],
        title: &str,
        y_label: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::box_plot::render(groups, title, y_label)?)
    }

    pub fn line_chart(
        &self,
        series: &[TimeSeriesPoint],
        title: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::line::render(series, title)?)
    }

    pub fn heatmap(
        &self,
        matrix: &CorrelationMatrix,
        title: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        self.save(filename, plots::heatmap::render(matrix, title)?)
    }

    /// A single HTML page inlining every previously rendered SVG.
    pub fn dashboard(
        &self,
        sections: &[(String, PathBuf)],
        title: &str,
        filename: &str,
    ) -> Result<PathBuf, ChartError> {
        let mut body = String::new();
        for (heading, path) in sections {
            let svg_markup = fs::read_to_string(path)?;
            body.push_str(&format!(
                "<section>\n<h2>{}</h2>\n{}\n</section>\n",
                svg::escape(heading),
                svg_markup
            ));
        }
        let html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>\nbody {{ font-family: sans-serif; margin: 2rem auto; max-width: 900px; }}\n\
             section {{ margin-bottom: 2rem; }}\nh2 {{ color: #333; }}\n</style>\n</head>\n\
             <body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
            title = svg::escape(title),
            body = body
        );
        self.save(filename, html)
    }

    fn save(&self, filename: &str, contents: String) -> Result<PathBuf, ChartError> {
        let path = self.output_dir.join(filename);
        fs::write(&path, contents)?;
        tracing::debug!(path = %path.display(), "wrote chart artifact");
        Ok(path)
    }
}
