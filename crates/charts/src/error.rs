use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Cannot render '{0}' from empty input")]
    EmptyInput(String),

    #[error("Failed to write chart artifact: {0}")]
    Io(#[from] std::io::Error),
}
