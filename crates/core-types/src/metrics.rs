use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Operational metrics exposed by the grid's `/metrics` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub total_records: u64,
    pub active_users: u64,
    pub avg_response_time: f64,
    pub success_rate: f64,
    pub uptime: f64,
    pub last_updated: DateTime<Utc>,
}

/// One point of a daily time series: the observed value and its trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub moving_avg: f64,
}
