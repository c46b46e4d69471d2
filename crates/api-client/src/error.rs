use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the grid API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The API request returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Unexpected payload shape from the API: {0}")]
    InvalidData(String),
}
