//! Common error types for the panoramic viewer backend

use thiserror::Error;

/// Common result type for backend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the backend services
///
/// Recoverable conditions (a missing progress document, a corrupt persisted
/// file) are represented as data in the relevant result shapes, not as
/// variants here; only hard misses and caller mistakes become errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
