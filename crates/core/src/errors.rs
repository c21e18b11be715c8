//! Core error types for the Stockdash dashboard.
//!
//! Per-symbol fetch failures are not represented here: they are counted by
//! the batch orchestrator or rendered by the chart view, never propagated.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the dashboard core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Input validation failed: {0}")]
    Validation(String),
}
