use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported aggregation operation: '{0}'")]
    UnsupportedOperation(String),
}
