use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Dataset contains no records")]
    EmptyDataset,

    #[error("Record {row} does not match the dataset columns: {detail}")]
    InconsistentColumns { row: usize, detail: String },

    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    #[error("Record {row} has {got} values but the schema declares {expected} columns")]
    ArityMismatch { row: usize, expected: usize, got: usize },

    #[error("Column '{column}' is declared numeric but row {row} holds a {found} value")]
    TypeMismatch { column: String, row: usize, found: String },
}
