//! # Omni-Grid API Client
//!
//! The data source boundary of the system: fetches grid records and metrics
//! from the remote omni-grid API over HTTP. This crate owns every network
//! concern (timeouts, headers, payload shapes) so the analytics layers never
//! see anything but typed records.
//!
//! The `GridDataSource` trait is the contract the orchestrator uses, allowing
//! the underlying implementation to be swapped out in tests.

use crate::error::ApiError;
use async_trait::async_trait;
use configuration::settings::ApiConfig;
use core_types::{GridMetrics, Scalar};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::collections::BTreeMap;
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{GridResponse, RawRecord};

/// The generic, abstract interface for a grid data source.
/// This trait is the contract the orchestrator programs against, so the live
/// client can be replaced by a fixture in tests.
#[async_trait]
pub trait GridDataSource: Send + Sync {
    /// Fetches the grid records as named scalar maps.
    async fn fetch_grid(&self) -> Result<Vec<BTreeMap<String, Scalar>>, ApiError>;

    /// Fetches the operational metrics document.
    async fn fetch_metrics(&self) -> Result<GridMetrics, ApiError>;

    /// Reports whether the API answers at all. Never errors: an unreachable
    /// API is an expected state that the caller resolves by falling back to
    /// generated data.
    async fn health_check(&self) -> bool;
}

/// A concrete `GridDataSource` backed by the live omni-grid HTTP API.
#[derive(Clone)]
pub struct GridApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GridApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let text = response.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl GridDataSource for GridApiClient {
    async fn fetch_grid(&self) -> Result<Vec<BTreeMap<String, Scalar>>, ApiError> {
        let response: GridResponse = self.get_json("grid").await?;
        let raw = response.into_records();
        if raw.is_empty() {
            return Err(ApiError::InvalidData(
                "the grid endpoint returned no records".to_string(),
            ));
        }

        tracing::debug!(records = raw.len(), "fetched grid records");
        Ok(raw
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|(name, value)| (name, Scalar::from_json(&value)))
                    .collect()
            })
            .collect())
    }

    async fn fetch_metrics(&self) -> Result<GridMetrics, ApiError> {
        self.get_json("metrics").await
    }

    async fn health_check(&self) -> bool {
        match self.client.get(self.endpoint("")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }
}
