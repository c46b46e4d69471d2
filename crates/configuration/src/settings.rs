use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub data: DataConfig,
    pub output: OutputConfig,
}

/// Connection parameters for the remote omni-grid API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// The base URL of the omni-grid service.
    pub base_url: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    /// The User-Agent header sent with every request.
    pub user_agent: String,
}

/// Parameters for the sample-data fallback path.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// When true, skip the API entirely and generate sample records.
    pub use_sample_data: bool,
    /// How many sample records to generate.
    pub num_records: usize,
    /// The generator seed; one seed always yields the same dataset.
    pub seed: u64,
}

/// Where charts and the analytics report are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
}
