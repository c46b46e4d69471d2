use crate::error::CoreError;
use crate::scalar::{Scalar, ScalarKey};
use crate::schema::{classify, Column, ColumnType, Schema};
use std::collections::BTreeMap;

/// One row of the grid: values stored in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Scalar>,
}

impl Record {
    pub fn new(values: Vec<Scalar>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn get(&self, position: usize) -> Option<&Scalar> {
        self.values.get(position)
    }

    /// The hashable identity of the whole row, used for duplicate detection.
    pub fn key(&self) -> Vec<ScalarKey> {
        self.values.iter().map(Scalar::key).collect()
    }
}

/// An immutable, ordered collection of uniform records.
///
/// Every record exposes the same column set; missing values are represented
/// explicitly. Construction validates this once, and no operation mutates the
/// dataset afterwards; derived views are new `Dataset` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset from named records, inferring the schema from the
    /// first record's column set.
    ///
    /// A column is classified numeric when every present value across all
    /// records is numeric, categorical otherwise. Fails on an empty input or
    /// when any record's column set differs from the first one.
    pub fn from_records(rows: Vec<BTreeMap<String, Scalar>>) -> Result<Self, CoreError> {
        let first = rows.first().ok_or(CoreError::EmptyDataset)?;
        let names: Vec<String> = first.keys().cloned().collect();

        for (row, record) in rows.iter().enumerate().skip(1) {
            if record.len() != names.len() || !names.iter().all(|n| record.contains_key(n)) {
                let found: Vec<&str> = record.keys().map(String::as_str).collect();
                return Err(CoreError::InconsistentColumns {
                    row,
                    detail: format!(
                        "expected [{}], found [{}]",
                        names.join(", "),
                        found.join(", ")
                    ),
                });
            }
        }

        let columns = names
            .iter()
            .map(|name| {
                let kind = classify(rows.iter().map(|r| &r[name]));
                Column::new(name.clone(), kind)
            })
            .collect();
        let schema = Schema::new(columns)?;

        let records = rows
            .into_iter()
            .map(|mut row| {
                Record::new(
                    names
                        .iter()
                        .map(|n| row.remove(n).unwrap_or(Scalar::Missing))
                        .collect(),
                )
            })
            .collect();

        Ok(Self { schema, records })
    }

    /// Builds a dataset against a declared schema, validating record arity and
    /// that numeric columns hold only numeric or missing values.
    pub fn with_schema(schema: Schema, records: Vec<Record>) -> Result<Self, CoreError> {
        if records.is_empty() {
            return Err(CoreError::EmptyDataset);
        }
        for (row, record) in records.iter().enumerate() {
            if record.values().len() != schema.len() {
                return Err(CoreError::ArityMismatch {
                    row,
                    expected: schema.len(),
                    got: record.values().len(),
                });
            }
            for (column, value) in schema.columns().iter().zip(record.values()) {
                if column.kind == ColumnType::Numeric
                    && !value.is_missing()
                    && !value.is_numeric()
                {
                    return Err(CoreError::TypeMismatch {
                        column: column.name.clone(),
                        row,
                        found: value.type_name().to_string(),
                    });
                }
            }
        }
        Ok(Self { schema, records })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The value at (`row`, `column`), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Scalar> {
        let pos = self.schema.position(column)?;
        self.records.get(row).and_then(|r| r.get(pos))
    }

    /// Iterates one column top to bottom. `None` when the column is unknown.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Scalar>> {
        let pos = self.schema.position(name)?;
        Some(self.records.iter().map(move |r| &r.values[pos]))
    }

    /// A new dataset holding the rows at `indices`, in the given order. The
    /// schema (and therefore each column's classification) is carried over
    /// unchanged, keeping classification stable across derived views.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            schema: self.schema.clone(),
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
        }
    }

    /// Renders one record back into a name → value map, e.g. for JSON output.
    pub fn record_as_map(&self, record: &Record) -> BTreeMap<String, Scalar> {
        self.schema
            .columns()
            .iter()
            .zip(record.values())
            .map(|(c, v)| (c.name.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Scalar)]) -> BTreeMap<String, Scalar> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn infers_numeric_and_categorical_columns() {
        let data = Dataset::from_records(vec![
            row(&[("value", Scalar::Int(10)), ("region", "North".into())]),
            row(&[("value", Scalar::Float(2.5)), ("region", "South".into())]),
        ])
        .unwrap();

        assert_eq!(data.schema().column("value").unwrap().kind, ColumnType::Numeric);
        assert_eq!(
            data.schema().column("region").unwrap().kind,
            ColumnType::Categorical
        );
    }

    #[test]
    fn missing_values_do_not_change_classification() {
        let data = Dataset::from_records(vec![
            row(&[("value", Scalar::Missing)]),
            row(&[("value", Scalar::Int(3))]),
        ])
        .unwrap();
        assert_eq!(data.schema().column("value").unwrap().kind, ColumnType::Numeric);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            Dataset::from_records(vec![]),
            Err(CoreError::EmptyDataset)
        ));
    }

    #[test]
    fn ragged_input_is_rejected() {
        let result = Dataset::from_records(vec![
            row(&[("a", Scalar::Int(1)), ("b", Scalar::Int(2))]),
            row(&[("a", Scalar::Int(1))]),
        ]);
        assert!(matches!(
            result,
            Err(CoreError::InconsistentColumns { row: 1, .. })
        ));
    }

    #[test]
    fn with_schema_rejects_text_in_numeric_column() {
        let schema = Schema::new(vec![Column::numeric("value")]).unwrap();
        let result = Dataset::with_schema(schema, vec![Record::new(vec!["oops".into()])]);
        assert!(matches!(result, Err(CoreError::TypeMismatch { .. })));
    }

    #[test]
    fn subset_preserves_schema_and_order() {
        let data = Dataset::from_records(vec![
            row(&[("value", Scalar::Int(1))]),
            row(&[("value", Scalar::Int(2))]),
            row(&[("value", Scalar::Int(3))]),
        ])
        .unwrap();

        let picked = data.subset(&[2, 0]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.value(0, "value"), Some(&Scalar::Int(3)));
        assert_eq!(picked.value(1, "value"), Some(&Scalar::Int(1)));
        assert_eq!(picked.schema(), data.schema());
    }
}
