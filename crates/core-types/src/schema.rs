use crate::error::CoreError;
use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The classification of a column, fixed for the lifetime of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Categorical => write!(f, "categorical"),
        }
    }
}

/// One declared column: its name and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Numeric)
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Categorical)
    }
}

/// The ordered, validated set of columns for a dataset.
///
/// Built once at dataset construction and reused by every query, so no
/// operation ever re-infers column types.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema from an ordered column list, rejecting duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self, CoreError> {
        let mut index = HashMap::with_capacity(columns.len());
        for (pos, column) in columns.iter().enumerate() {
            if index.insert(column.name.clone(), pos).is_some() {
                return Err(CoreError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns, index })
    }

    /// Index of a column by name, if declared.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|pos| &self.columns[pos])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The names of all columns classified as numeric, in schema order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind == ColumnType::Numeric)
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind == ColumnType::Categorical)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from the column list.
        self.columns == other.columns
    }
}

/// Classifies a set of observed values: numeric when at least one value is
/// present and every present value is numeric.
pub(crate) fn classify<'a>(values: impl Iterator<Item = &'a Scalar>) -> ColumnType {
    let mut seen_present = false;
    for value in values {
        if value.is_missing() {
            continue;
        }
        if !value.is_numeric() {
            return ColumnType::Categorical;
        }
        seen_present = true;
    }
    if seen_present {
        ColumnType::Numeric
    } else {
        ColumnType::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_column_names() {
        let result = Schema::new(vec![
            Column::numeric("value"),
            Column::categorical("value"),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateColumn(name)) if name == "value"));
    }

    #[test]
    fn classify_requires_all_present_values_numeric() {
        let mixed = [Scalar::Int(1), Scalar::Text("x".into())];
        assert_eq!(classify(mixed.iter()), ColumnType::Categorical);

        let numeric = [Scalar::Int(1), Scalar::Missing, Scalar::Float(2.5)];
        assert_eq!(classify(numeric.iter()), ColumnType::Numeric);

        let all_missing = [Scalar::Missing, Scalar::Missing];
        assert_eq!(classify(all_missing.iter()), ColumnType::Categorical);
    }

    #[test]
    fn column_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ColumnType::Numeric).unwrap(),
            "\"numeric\""
        );
    }
}
