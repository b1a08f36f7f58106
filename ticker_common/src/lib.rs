//!
//! Common types and utilities shared by the ticker engine and the dashboard.
//!
//! This crate aggregates:
//! - `error` — unified error type `TrackerError` used across the workspace.
//! - `result` — handy `Result<T, TrackerError>` alias.
//! - `timeframe` — the aggregation windows a ticker snapshot can represent.
//! - `raw` — the untrusted wire record `RawTicker` read from the snapshot file.
//! - `source` — quote asset, list length, and refresh cadence constants.
#![warn(missing_docs)]
pub mod error;
pub mod raw;
pub mod result;
pub mod source;
pub mod timeframe;

pub use error::TrackerError;
pub use raw::RawTicker;
pub use result::Result;
pub use timeframe::Timeframe;
