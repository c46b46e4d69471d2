use crate::error::AnalyticsError;
use core_types::{ColumnType, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Per-column summary statistics over the non-missing values.
///
/// `count` is the number of non-missing values; `missing` is reported
/// separately. `std_dev` is the sample standard deviation (divisor `n - 1`)
/// and is fixed at `0.0` when fewer than two values exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// The aggregation verbs accepted by `aggregate_by_category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl FromStr for AggregateOp {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(AggregateOp::Sum),
            "mean" => Ok(AggregateOp::Mean),
            "count" => Ok(AggregateOp::Count),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => Err(AnalyticsError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Mean => "mean",
            AggregateOp::Count => "count",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        };
        write!(f, "{}", name)
    }
}

/// The aggregate of one group. `key` is `None` for rows whose group column
/// value was missing; those rows are grouped, not dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate {
    pub key: Option<String>,
    pub value: f64,
}

impl GroupAggregate {
    /// The display label for this group ("missing" for the absent-value group).
    pub fn label(&self) -> &str {
        self.key.as_deref().unwrap_or("missing")
    }
}

/// One filter criterion value: an exact match or a membership test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(Scalar),
    AnyOf(Vec<Scalar>),
}

impl FilterValue {
    pub fn matches(&self, value: &Scalar) -> bool {
        match self {
            FilterValue::One(expected) => expected == value,
            FilterValue::AnyOf(expected) => expected.iter().any(|e| e == value),
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        FilterValue::One(value)
    }
}

/// Pearson coefficients for every ordered pair of numeric columns.
///
/// Stored as a dense square matrix aligned with `columns`; the structure is
/// symmetric with a unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn empty() -> Self {
        Self { columns: Vec::new(), values: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The coefficient for a pair of column names, if both are present.
    pub fn coefficient(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// One interpolated percentile value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Percentile {
    pub percentile: f64,
    pub value: f64,
}

/// Dataset health: row counts, per-column missingness, duplication, and the
/// classification assigned to each column at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub missing_values: BTreeMap<String, usize>,
    pub duplicate_rows: usize,
    pub column_types: BTreeMap<String, ColumnType>,
}

/// One categorical value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_op_parses_known_verbs() {
        assert_eq!("sum".parse::<AggregateOp>().unwrap(), AggregateOp::Sum);
        assert_eq!("count".parse::<AggregateOp>().unwrap(), AggregateOp::Count);
        assert!(matches!(
            "median".parse::<AggregateOp>(),
            Err(AnalyticsError::UnsupportedOperation(v)) if v == "median"
        ));
    }

    #[test]
    fn filter_value_membership() {
        let any = FilterValue::AnyOf(vec![Scalar::Text("A".into()), Scalar::Text("B".into())]);
        assert!(any.matches(&Scalar::Text("B".into())));
        assert!(!any.matches(&Scalar::Text("C".into())));
    }

    #[test]
    fn group_label_for_missing_key() {
        let group = GroupAggregate { key: None, value: 1.0 };
        assert_eq!(group.label(), "missing");
    }

    #[test]
    fn results_serialize_with_stable_field_names() {
        let summary = ColumnSummary {
            count: 2,
            missing: 0,
            mean: 1.5,
            std_dev: 0.5,
            min: 1.0,
            max: 2.0,
            median: 1.5,
        };
        let json = serde_json::to_value(&summary).unwrap();
        for field in ["count", "missing", "mean", "std_dev", "min", "max", "median"] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }

        let matrix = CorrelationMatrix {
            columns: vec!["x".into(), "y".into()],
            values: vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        };
        let round_trip: CorrelationMatrix =
            serde_json::from_str(&serde_json::to_string(&matrix).unwrap()).unwrap();
        assert_eq!(round_trip, matrix);
    }
}
