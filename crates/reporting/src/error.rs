use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write the report file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize the report: {0}")]
    Serialize(#[from] serde_json::Error),
}
