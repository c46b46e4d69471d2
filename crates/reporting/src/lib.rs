//! # Omni-Grid Reporting
//!
//! Assembles the engine's query results into a single `AnalyticsReport` and
//! persists it as pretty-printed JSON. Field names and structure are fixed by
//! the serde derives, so repeated runs over the same data produce identical
//! documents.

use analytics::{AnalyticsEngine, ColumnSummary, DataQualityReport, ValueCount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub mod error;

pub use error::ReportError;

/// The persisted analysis document: summary statistics per numeric column,
/// the data-quality report, and the distribution of each requested
/// categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub summary_statistics: BTreeMap<String, ColumnSummary>,
    pub data_quality: DataQualityReport,
    pub categorical_distributions: BTreeMap<String, Vec<ValueCount>>,
}

impl AnalyticsReport {
    /// Runs the standard report queries against an engine. Unknown columns in
    /// `categorical_columns` are skipped, mirroring how the report treats a
    /// dataset that simply lacks them.
    pub fn from_engine(engine: &AnalyticsEngine, categorical_columns: &[&str]) -> Self {
        let categorical_distributions = categorical_columns
            .iter()
            .filter_map(|column| {
                engine
                    .categorical_distribution(column)
                    .ok()
                    .map(|distribution| (column.to_string(), distribution))
            })
            .collect();

        Self {
            summary_statistics: engine.summary_statistics(),
            data_quality: engine.data_quality_report(),
            categorical_distributions,
        }
    }
}

/// Writes analytics reports into an output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Creates the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persists the report as pretty-printed JSON and returns its path.
    pub fn write(&self, report: &AnalyticsReport, filename: &str) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(filename);
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)?;
        tracing::info!(path = %path.display(), "analytics report written");
        Ok(path)
    }
}
