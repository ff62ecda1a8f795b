//! Error types for request log capture and retrieval.

use thiserror::Error;

/// Errors that can occur while capturing or retrieving request logs.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// The backing store could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored record exists but could not be decompressed.
    ///
    /// Distinct from an absent record, which is reported as `Ok(None)`
    /// rather than an error.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// Compressing log text for storage failed.
    #[error("compression failed: {0}")]
    CompressionFailed(String),
}

/// Result type alias for capture and retrieval operations.
pub type Result<T> = std::result::Result<T, RecorderError>;
