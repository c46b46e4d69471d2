use crate::error::AnalyticsError;
use crate::report::{
    AggregateOp, ColumnSummary, CorrelationMatrix, DataQualityReport, FilterValue,
    GroupAggregate, Percentile, ValueCount,
};
use core_types::{ColumnType, Dataset, Record, Scalar};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A read-only query engine over one immutable grid dataset.
///
/// All operations are pure: nothing mutates the stored dataset, and derived
/// views (`filter`, `top_n`) are new values. Numeric edge cases with a valid
/// data interpretation (single-value standard deviation, zero-variance
/// correlation) resolve deterministically instead of raising.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    dataset: Dataset,
}

impl AnalyticsEngine {
    /// Wraps a dataset for querying. The dataset's own construction already
    /// rejects ragged records; an empty dataset is rejected here.
    pub fn new(dataset: Dataset) -> Result<Self, AnalyticsError> {
        if dataset.is_empty() {
            return Err(AnalyticsError::InvalidDataset(
                "dataset contains no records".to_string(),
            ));
        }
        Ok(Self { dataset })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Summary statistics for every numeric column with at least one
    /// non-missing value.
    ///
    /// `mean` is `sum / n` over the non-missing values, `std_dev` the sample
    /// standard deviation (`0.0` when `n < 2`), and `median` the middle of the
    /// sorted values (mean of the two middle values for even `n`).
    pub fn summary_statistics(&self) -> BTreeMap<String, ColumnSummary> {
        let mut summary = BTreeMap::new();

        for column in self.dataset.schema().numeric_columns() {
            let values = self.numeric_values(&column.name);
            let n = values.len();
            if n == 0 {
                // A declared-numeric column that is entirely missing has no
                // defined moments; it still appears in the quality report.
                continue;
            }
            let missing = self.dataset.len() - n;

            let mean = values.iter().sum::<f64>() / n as f64;
            let std_dev = if n < 2 {
                0.0
            } else {
                let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
                (sum_sq / (n - 1) as f64).sqrt()
            };

            let mut sorted = values;
            sorted.sort_by(f64::total_cmp);
            let summary_entry = ColumnSummary {
                count: n,
                missing,
                mean,
                std_dev,
                min: sorted[0],
                max: sorted[n - 1],
                median: median_of_sorted(&sorted),
            };
            summary.insert(column.name.clone(), summary_entry);
        }

        summary
    }

    /// Up to `n` full records sorted descending by `column`.
    ///
    /// The sort is stable, so ties keep their original insertion order, and
    /// missing values sort after every present value.
    pub fn top_n(&self, column: &str, n: usize) -> Result<Vec<Record>, AnalyticsError> {
        let pos = self.column_position(column)?;
        if n == 0 {
            return Err(AnalyticsError::InvalidArgument(
                "top-n requires n > 0".to_string(),
            ));
        }

        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();
        let records = self.dataset.records();
        indices.sort_by(|&a, &b| {
            let (va, vb) = (&records[a].values()[pos], &records[b].values()[pos]);
            vb.compare(va)
        });
        indices.truncate(n);

        Ok(indices.into_iter().map(|i| records[i].clone()).collect())
    }

    /// Aggregates `value_column` within each distinct value of `group_column`,
    /// preserving first-seen group order.
    ///
    /// Rows with a missing group value aggregate under the explicit missing
    /// key rather than being dropped. `count` counts every row of the group;
    /// the numeric verbs skip missing and non-numeric values, and a group
    /// left with nothing usable reports `0.0` so the result stays total.
    pub fn aggregate_by_category(
        &self,
        group_column: &str,
        value_column: &str,
        operation: &str,
    ) -> Result<Vec<GroupAggregate>, AnalyticsError> {
        let group_pos = self.column_position(group_column)?;
        let value_pos = self.column_position(value_column)?;
        let op: AggregateOp = operation.parse()?;

        let mut order: Vec<Option<String>> = Vec::new();
        let mut groups: HashMap<Option<String>, (usize, Vec<f64>)> = HashMap::new();

        for record in self.dataset.records() {
            let key = match &record.values()[group_pos] {
                Scalar::Missing => None,
                value => Some(value.to_string()),
            };
            let entry = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                (0, Vec::new())
            });
            entry.0 += 1;
            if let Some(v) = record.values()[value_pos].as_f64() {
                entry.1.push(v);
            }
        }

        Ok(order
            .into_iter()
            .map(|key| {
                let (rows, values) = &groups[&key];
                let value = match op {
                    AggregateOp::Count => *rows as f64,
                    AggregateOp::Sum => values.iter().sum(),
                    AggregateOp::Mean => {
                        if values.is_empty() {
                            0.0
                        } else {
                            values.iter().sum::<f64>() / values.len() as f64
                        }
                    }
                    AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
                    AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                };
                let value = if value.is_finite() { value } else { 0.0 };
                GroupAggregate { key, value }
            })
            .collect())
    }

    /// A new dataset holding only the records that match every criterion.
    ///
    /// Criteria are ANDed; each maps a column to an exact value or a
    /// membership set. Unknown columns are rejected before any row work.
    /// An empty result is a valid (empty) dataset, not an error.
    pub fn filter(
        &self,
        criteria: &BTreeMap<String, FilterValue>,
    ) -> Result<Dataset, AnalyticsError> {
        let resolved: Vec<(usize, &FilterValue)> = criteria
            .iter()
            .map(|(column, value)| Ok((self.column_position(column)?, value)))
            .collect::<Result<_, AnalyticsError>>()?;

        let indices: Vec<usize> = self
            .dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                resolved
                    .iter()
                    .all(|(pos, value)| value.matches(&record.values()[*pos]))
            })
            .map(|(i, _)| i)
            .collect();

        Ok(self.dataset.subset(&indices))
    }

    /// Pearson coefficients over every pair of numeric columns, computed on
    /// pairwise-complete observations.
    ///
    /// The diagonal is fixed at `1.0`. A zero-variance column (or a pair with
    /// fewer than two complete observations) reports `0.0` rather than NaN so
    /// the matrix stays well-defined. Fewer than two numeric columns yield an
    /// empty matrix.
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        let columns: Vec<String> = self
            .dataset
            .schema()
            .numeric_columns()
            .map(|c| c.name.clone())
            .collect();
        if columns.len() < 2 {
            return CorrelationMatrix::empty();
        }

        let series: Vec<Vec<Option<f64>>> = columns
            .iter()
            .map(|name| {
                self.dataset
                    .column(name)
                    .map(|iter| iter.map(Scalar::as_f64).collect())
                    .unwrap_or_default()
            })
            .collect();

        let mut values = vec![vec![0.0; columns.len()]; columns.len()];
        for i in 0..columns.len() {
            values[i][i] = 1.0;
            for j in (i + 1)..columns.len() {
                let r = pairwise_pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        CorrelationMatrix { columns, values }
    }

    /// Interpolated percentile values for a numeric column, in request order.
    ///
    /// Uses linear interpolation between the two nearest ranks of the sorted
    /// non-missing values, the same convention as the median, generalized.
    pub fn percentiles(
        &self,
        column: &str,
        percentiles: &[f64],
    ) -> Result<Vec<Percentile>, AnalyticsError> {
        let col = self
            .dataset
            .schema()
            .column(column)
            .ok_or_else(|| AnalyticsError::ColumnNotFound(column.to_string()))?;
        if col.kind != ColumnType::Numeric {
            return Err(AnalyticsError::ColumnNotFound(format!(
                "{} (not a numeric column)",
                column
            )));
        }
        for &p in percentiles {
            if !(0.0..=100.0).contains(&p) {
                return Err(AnalyticsError::InvalidArgument(format!(
                    "percentile {} is outside [0, 100]",
                    p
                )));
            }
        }

        let mut sorted = self.numeric_values(column);
        if sorted.is_empty() {
            return Err(AnalyticsError::InvalidArgument(format!(
                "column '{}' has no non-missing values",
                column
            )));
        }
        sorted.sort_by(f64::total_cmp);

        Ok(percentiles
            .iter()
            .map(|&p| Percentile { percentile: p, value: interpolate(&sorted, p) })
            .collect())
    }

    /// Dataset health: totals, per-column missing counts, duplicate rows, and
    /// the stored column classifications.
    ///
    /// A record is a duplicate when it equals an earlier record across every
    /// column; each repeat counts once, so three identical rows contribute two.
    pub fn data_quality_report(&self) -> DataQualityReport {
        let schema = self.dataset.schema();

        let mut missing_values = BTreeMap::new();
        for column in schema.columns() {
            let count = self
                .dataset
                .column(&column.name)
                .map(|iter| iter.filter(|v| v.is_missing()).count())
                .unwrap_or(0);
            missing_values.insert(column.name.clone(), count);
        }

        let mut seen = HashSet::with_capacity(self.dataset.len());
        let mut duplicate_rows = 0;
        for record in self.dataset.records() {
            if !seen.insert(record.key()) {
                duplicate_rows += 1;
            }
        }

        DataQualityReport {
            total_rows: self.dataset.len(),
            total_columns: schema.len(),
            missing_values,
            duplicate_rows,
            column_types: schema
                .columns()
                .iter()
                .map(|c| (c.name.clone(), c.kind))
                .collect(),
        }
    }

    /// Value counts for one column, descending by count (ties keep first
    /// appearance). Missing values are excluded from the distribution; their
    /// count lives in the quality report.
    pub fn categorical_distribution(
        &self,
        column: &str,
    ) -> Result<Vec<ValueCount>, AnalyticsError> {
        let pos = self.column_position(column)?;

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in self.dataset.records() {
            let value = &record.values()[pos];
            if value.is_missing() {
                continue;
            }
            let label = value.to_string();
            if !counts.contains_key(&label) {
                order.push(label.clone());
            }
            *counts.entry(label).or_insert(0) += 1;
        }

        let mut distribution: Vec<ValueCount> = order
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                ValueCount { value, count }
            })
            .collect();
        distribution.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(distribution)
    }

    // --- Internal helpers ---

    fn column_position(&self, column: &str) -> Result<usize, AnalyticsError> {
        self.dataset
            .schema()
            .position(column)
            .ok_or_else(|| AnalyticsError::ColumnNotFound(column.to_string()))
    }

    /// The non-missing numeric values of a column, in row order.
    fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.dataset
            .column(column)
            .map(|iter| iter.filter_map(Scalar::as_f64).collect())
            .unwrap_or_default()
    }
}

/// The median of an ascending-sorted, non-empty slice.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Linear interpolation between the two nearest ranks of an ascending-sorted,
/// non-empty slice; `p` in [0, 100].
fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
}

/// Pearson's r over the rows where both series are present. Zero variance on
/// either side, or fewer than two complete pairs, yields `0.0`.
fn pairwise_pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| x.zip(*y))
        .collect();
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 { 0.0 } else { cov / denom }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Dataset;
    use std::collections::BTreeMap;

    fn record(pairs: &[(&str, Scalar)]) -> BTreeMap<String, Scalar> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// A small fixture with value = [10, 20, 20, 30, 40] and a region column.
    fn five_values() -> AnalyticsEngine {
        let regions = ["North", "South", "North", "East", "West"];
        let rows = [10, 20, 20, 30, 40]
            .iter()
            .zip(regions)
            .enumerate()
            .map(|(i, (v, region))| {
                record(&[
                    ("id", Scalar::Int(i as i64 + 1)),
                    ("value", Scalar::Int(*v)),
                    ("region", region.into()),
                ])
            })
            .collect();
        AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap()
    }

    #[test]
    fn rejects_empty_dataset() {
        let data = Dataset::from_records(vec![record(&[("value", Scalar::Int(1))])]).unwrap();
        let empty = data.subset(&[]);
        assert!(matches!(
            AnalyticsEngine::new(empty),
            Err(AnalyticsError::InvalidDataset(_))
        ));
    }

    #[test]
    fn summary_matches_known_values() {
        let engine = five_values();
        let summary = engine.summary_statistics();
        let value = &summary["value"];

        assert_eq!(value.count, 5);
        assert_eq!(value.missing, 0);
        assert_eq!(value.mean, 24.0);
        assert_eq!(value.median, 20.0);
        assert_eq!(value.min, 10.0);
        assert_eq!(value.max, 40.0);
        // Sample std dev of [10, 20, 20, 30, 40]: sqrt(520 / 4).
        assert!((value.std_dev - 130.0_f64.sqrt()).abs() < 1e-12);

        // Non-numeric columns are not part of the summary map.
        assert!(!summary.contains_key("region"));
    }

    #[test]
    fn summary_orders_min_median_max() {
        let engine = five_values();
        for stats in engine.summary_statistics().values() {
            assert!(stats.min <= stats.median && stats.median <= stats.max);
        }
    }

    #[test]
    fn std_dev_is_zero_for_single_value() {
        let rows = vec![record(&[("value", Scalar::Int(7))])];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let summary = engine.summary_statistics();
        assert_eq!(summary["value"].std_dev, 0.0);
        assert_eq!(summary["value"].count, 1);
    }

    #[test]
    fn summary_excludes_missing_from_count() {
        let rows = vec![
            record(&[("value", Scalar::Int(10))]),
            record(&[("value", Scalar::Missing)]),
            record(&[("value", Scalar::Int(30))]),
        ];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let stats = &engine.summary_statistics()["value"];
        assert_eq!(stats.count, 2);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.mean, 20.0);
    }

    #[test]
    fn top_n_returns_descending_records() {
        let engine = five_values();
        let top = engine.top_n("value", 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(engine.dataset().record_as_map(&top[0])["value"], Scalar::Int(40));
        assert_eq!(engine.dataset().record_as_map(&top[1])["value"], Scalar::Int(30));
    }

    #[test]
    fn top_n_is_stable_on_ties() {
        let engine = five_values();
        // The two 20s (ids 2 and 3) must keep insertion order.
        let top = engine.top_n("value", 4).unwrap();
        let ids: Vec<Scalar> = top
            .iter()
            .map(|r| engine.dataset().record_as_map(r)["id"].clone())
            .collect();
        assert_eq!(
            ids,
            vec![Scalar::Int(5), Scalar::Int(4), Scalar::Int(2), Scalar::Int(3)]
        );
    }

    #[test]
    fn top_n_caps_at_dataset_size() {
        let engine = five_values();
        assert_eq!(engine.top_n("value", 50).unwrap().len(), 5);
    }

    #[test]
    fn top_n_validates_arguments() {
        let engine = five_values();
        assert!(matches!(
            engine.top_n("nope", 3),
            Err(AnalyticsError::ColumnNotFound(_))
        ));
        assert!(matches!(
            engine.top_n("value", 0),
            Err(AnalyticsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn aggregate_sum_by_region() {
        let engine = five_values();
        let groups = engine
            .aggregate_by_category("region", "value", "sum")
            .unwrap();
        // First-seen order: North, South, East, West.
        let labels: Vec<&str> = groups.iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["North", "South", "East", "West"]);
        assert_eq!(groups[0].value, 30.0); // 10 + 20
        assert_eq!(groups[1].value, 20.0);
    }

    #[test]
    fn aggregate_count_sums_to_total_rows() {
        let engine = five_values();
        let groups = engine
            .aggregate_by_category("region", "value", "count")
            .unwrap();
        let total: f64 = groups.iter().map(|g| g.value).sum();
        assert_eq!(total, engine.dataset().len() as f64);
    }

    #[test]
    fn aggregate_groups_missing_key_explicitly() {
        let rows = vec![
            record(&[("region", "North".into()), ("value", Scalar::Int(5))]),
            record(&[("region", Scalar::Missing), ("value", Scalar::Int(7))]),
        ];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let groups = engine
            .aggregate_by_category("region", "value", "count")
            .unwrap();
        let missing = groups.iter().find(|g| g.key.is_none()).unwrap();
        assert_eq!(missing.value, 1.0);
    }

    #[test]
    fn aggregate_rejects_unknown_operation() {
        let engine = five_values();
        assert!(matches!(
            engine.aggregate_by_category("region", "value", "median"),
            Err(AnalyticsError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            engine.aggregate_by_category("nope", "value", "sum"),
            Err(AnalyticsError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn aggregate_mean_min_max() {
        let engine = five_values();
        let mean = engine
            .aggregate_by_category("region", "value", "mean")
            .unwrap();
        assert_eq!(mean[0].value, 15.0); // North: (10 + 20) / 2
        let min = engine
            .aggregate_by_category("region", "value", "min")
            .unwrap();
        assert_eq!(min[0].value, 10.0);
        let max = engine
            .aggregate_by_category("region", "value", "max")
            .unwrap();
        assert_eq!(max[0].value, 20.0);
    }

    #[test]
    fn empty_criteria_filter_is_identity() {
        let engine = five_values();
        let filtered = engine.filter(&BTreeMap::new()).unwrap();
        assert_eq!(&filtered, engine.dataset());
    }

    #[test]
    fn filter_matches_all_criteria() {
        let engine = five_values();
        let mut criteria = BTreeMap::new();
        criteria.insert("region".to_string(), FilterValue::One("North".into()));
        criteria.insert("value".to_string(), FilterValue::One(Scalar::Int(20)));
        let filtered = engine.filter(&criteria).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.value(0, "id"), Some(&Scalar::Int(3)));
    }

    #[test]
    fn filter_membership_test() {
        let engine = five_values();
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "region".to_string(),
            FilterValue::AnyOf(vec!["North".into(), "East".into()]),
        );
        assert_eq!(engine.filter(&criteria).unwrap().len(), 3);
    }

    #[test]
    fn filter_returns_empty_dataset_not_error() {
        let engine = five_values();
        let mut criteria = BTreeMap::new();
        criteria.insert("region".to_string(), FilterValue::One("Atlantis".into()));
        assert_eq!(engine.filter(&criteria).unwrap().len(), 0);
    }

    #[test]
    fn filter_rejects_unknown_column() {
        let engine = five_values();
        let mut criteria = BTreeMap::new();
        criteria.insert("nope".to_string(), FilterValue::One(Scalar::Int(1)));
        assert!(matches!(
            engine.filter(&criteria),
            Err(AnalyticsError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn chained_disjoint_filters_equal_union_filter() {
        let engine = five_values();
        let mut a = BTreeMap::new();
        a.insert("region".to_string(), FilterValue::One("North".into()));
        let mut b = BTreeMap::new();
        b.insert("value".to_string(), FilterValue::One(Scalar::Int(20)));

        let chained = AnalyticsEngine::new(engine.filter(&a).unwrap())
            .unwrap()
            .filter(&b)
            .unwrap();

        let mut union = a.clone();
        union.extend(b);
        let direct = engine.filter(&union).unwrap();
        assert_eq!(chained, direct);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let rows = (0..10)
            .map(|i| {
                record(&[
                    ("x", Scalar::Float(i as f64)),
                    ("y", Scalar::Float(i as f64 * 2.0 + 1.0)),
                    ("z", Scalar::Float((10 - i) as f64)),
                ])
            })
            .collect();
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let matrix = engine.correlation_matrix();

        for a in &matrix.columns {
            assert_eq!(matrix.coefficient(a, a), Some(1.0));
            for b in &matrix.columns {
                assert_eq!(matrix.coefficient(a, b), matrix.coefficient(b, a));
            }
        }
        // Perfectly linear relationships.
        assert!((matrix.coefficient("x", "y").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.coefficient("x", "z").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_uses_pairwise_complete_rows() {
        let rows = vec![
            record(&[("x", Scalar::Float(1.0)), ("y", Scalar::Float(2.0))]),
            record(&[("x", Scalar::Missing), ("y", Scalar::Float(9.0))]),
            record(&[("x", Scalar::Float(2.0)), ("y", Scalar::Float(4.0))]),
            record(&[("x", Scalar::Float(3.0)), ("y", Scalar::Float(6.0))]),
        ];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let matrix = engine.correlation_matrix();
        // The row with a missing x is excluded pairwise; the rest is exactly linear.
        assert!((matrix.coefficient("x", "y").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_column_reports_zero_not_nan() {
        let rows = (0..5)
            .map(|i| {
                record(&[
                    ("x", Scalar::Float(i as f64)),
                    ("flat", Scalar::Float(3.0)),
                ])
            })
            .collect();
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let matrix = engine.correlation_matrix();
        assert_eq!(matrix.coefficient("x", "flat"), Some(0.0));
        assert_eq!(matrix.coefficient("flat", "flat"), Some(1.0));
    }

    #[test]
    fn fewer_than_two_numeric_columns_yield_empty_matrix() {
        let rows = vec![record(&[
            ("value", Scalar::Int(1)),
            ("region", "North".into()),
        ])];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        assert!(engine.correlation_matrix().is_empty());
    }

    #[test]
    fn percentile_50_equals_median() {
        let engine = five_values();
        let p = engine.percentiles("value", &[50.0]).unwrap();
        assert_eq!(p[0].value, engine.summary_statistics()["value"].median);
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let engine = five_values();
        let p = engine
            .percentiles("value", &[0.0, 25.0, 75.0, 100.0])
            .unwrap();
        assert_eq!(p[0].value, 10.0);
        assert_eq!(p[1].value, 20.0); // rank 1.0 on [10, 20, 20, 30, 40]
        assert_eq!(p[2].value, 30.0); // rank 3.0
        assert_eq!(p[3].value, 40.0);
    }

    #[test]
    fn percentiles_validate_range_and_column() {
        let engine = five_values();
        assert!(matches!(
            engine.percentiles("value", &[101.0]),
            Err(AnalyticsError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.percentiles("value", &[-0.5]),
            Err(AnalyticsError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.percentiles("region", &[50.0]),
            Err(AnalyticsError::ColumnNotFound(_))
        ));
        assert!(matches!(
            engine.percentiles("nope", &[50.0]),
            Err(AnalyticsError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn quality_report_counts_duplicates_once_per_repeat() {
        let rows = vec![
            record(&[("a", Scalar::Int(1)), ("b", "x".into())]),
            record(&[("a", Scalar::Int(2)), ("b", "y".into())]),
            record(&[("a", Scalar::Int(1)), ("b", "x".into())]),
            record(&[("a", Scalar::Int(3)), ("b", "z".into())]),
            record(&[("a", Scalar::Int(4)), ("b", "w".into())]),
        ];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let quality = engine.data_quality_report();
        assert_eq!(quality.total_rows, 5);
        assert_eq!(quality.total_columns, 2);
        assert_eq!(quality.duplicate_rows, 1);
    }

    #[test]
    fn quality_report_triple_repeat_counts_two() {
        let rows = vec![
            record(&[("a", Scalar::Int(1))]),
            record(&[("a", Scalar::Int(1))]),
            record(&[("a", Scalar::Int(1))]),
        ];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        assert_eq!(engine.data_quality_report().duplicate_rows, 2);
    }

    #[test]
    fn quality_report_tracks_missing_and_types() {
        let rows = vec![
            record(&[("value", Scalar::Int(1)), ("region", "North".into())]),
            record(&[("value", Scalar::Missing), ("region", Scalar::Missing)]),
        ];
        let engine = AnalyticsEngine::new(Dataset::from_records(rows).unwrap()).unwrap();
        let quality = engine.data_quality_report();
        assert_eq!(quality.missing_values["value"], 1);
        assert_eq!(quality.missing_values["region"], 1);
        assert_eq!(quality.column_types["value"], ColumnType::Numeric);
        assert_eq!(quality.column_types["region"], ColumnType::Categorical);
    }

    #[test]
    fn categorical_distribution_sorts_by_count() {
        let engine = five_values();
        let distribution = engine.categorical_distribution("region").unwrap();
        assert_eq!(distribution[0].value, "North");
        assert_eq!(distribution[0].count, 2);
        let total: usize = distribution.iter().map(|v| v.count).sum();
        assert_eq!(total, 5);
    }
}
