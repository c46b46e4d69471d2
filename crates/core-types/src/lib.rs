//! # Omni-Grid Core Types
//!
//! This crate defines the tabular data model shared by every other crate in the
//! workspace: scalar values, column schemas, records, and the immutable
//! `Dataset` they form.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate has no knowledge of any other part of the system.
//!   Everything else (analytics, data sources, renderers) depends on it.
//! - **Explicit missingness:** An absent value is `Scalar::Missing`, never a
//!   sentinel like `0` or an empty string. This removes any ambiguity between
//!   "zero" and "absent" downstream.
//! - **Typed once:** A `Dataset` classifies each column as numeric or
//!   categorical exactly once, at construction. Queries reuse the stored
//!   `Schema` instead of re-inferring types per call.
//!
//! ## Public API
//!
//! - `Scalar`: the tagged value type held in every cell.
//! - `Schema` / `Column` / `ColumnType`: the validated column declarations.
//! - `Record` / `Dataset`: one row, and the immutable ordered collection of rows.
//! - `GridMetrics` / `TimeSeriesPoint`: auxiliary payloads produced by data sources.
//! - `CoreError`: the specific error types that can be returned from this crate.

pub mod dataset;
pub mod error;
pub mod metrics;
pub mod scalar;
pub mod schema;

// Re-export the core types to provide a clean public API.
pub use dataset::{Dataset, Record};
pub use error::CoreError;
pub use metrics::{GridMetrics, TimeSeriesPoint};
pub use scalar::{Scalar, ScalarKey};
pub use schema::{Column, ColumnType, Schema};
