//! Error types shared between the engine and the dashboard.
//!
//! The `TrackerError` enum unifies the failure cases for loading the ticker
//! snapshot (I/O, HTTP, JSON), commands sent to the refresh driver, and
//! internal logic, allowing crates to propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the engine and the dashboard.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// I/O error originating from the standard library (snapshot files, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot document is not a valid JSON array of ticker objects.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport failure while requesting the snapshot over HTTP.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The snapshot endpoint answered with a non-success status code.
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// A timeframe selector value did not match any known tag or alias.
    #[error("Unknown timeframe: {0}")]
    InvalidTimeframe(String),

    /// The ticker snapshot could not be loaded or decoded.
    #[error("Failed to load ticker snapshot: {0}")]
    Load(String),

    /// The ranking pipeline failed unexpectedly while processing a batch.
    #[error("Error processing ticker data: {0}")]
    Processing(String),
}

impl<T> From<PoisonError<T>> for TrackerError {
    fn from(err: PoisonError<T>) -> Self {
        TrackerError::MutexLock(err.to_string())
    }
}
