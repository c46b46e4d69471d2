//! # Omni-Grid Analytics Engine
//!
//! This crate provides the tools for conducting statistical analysis of grid
//! datasets. It is the only component of the system with real behavioral
//! rules: type-aware statistics, grouping semantics, percentile interpolation,
//! and data-quality accounting.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and performs no I/O. It depends only on `core-types`
//!   (Layer 0).
//! - **Read-only queries:** The `AnalyticsEngine` wraps one immutable
//!   `Dataset`. Every operation is a pure read; filters and top-N views
//!   return new values and leave the stored dataset untouched.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the main struct that contains the query logic.
//! - `report`: the serializable query result types (`ColumnSummary`,
//!   `CorrelationMatrix`, `DataQualityReport`, ...).
//! - `AnalyticsError`: the specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    AggregateOp, ColumnSummary, CorrelationMatrix, DataQualityReport, FilterValue,
    GroupAggregate, Percentile, ValueCount,
};
