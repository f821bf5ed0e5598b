//! Error types for the control layer

use thiserror::Error;

/// Errors from the control layer
#[derive(Debug, Error)]
pub enum ControlError {
    /// The worker thread is gone, so commands cannot be delivered
    #[error("Player worker is not running")]
    WorkerGone,

    /// A catalog lookup failed
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;
