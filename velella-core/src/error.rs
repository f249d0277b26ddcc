//! Structured error types for the Velella ecosystem.

use thiserror::Error;

/// Unified error type for all Velella operations.
#[derive(Debug, Error)]
pub enum VelellaError {
    /// Invalid construction parameters (bad counts, malformed threshold grids)
    #[error("config error: {0}")]
    Config(String),

    /// Mismatched input/target dimensions
    #[error("shape error: {0}")]
    Shape(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the Velella ecosystem.
pub type Result<T> = std::result::Result<T, VelellaError>;
