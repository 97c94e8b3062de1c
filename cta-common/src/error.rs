//! Common error types for the cassette archive

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset bytes could not be obtained (transport error or non-success status)
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Buffer is not a usable relational dataset
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}
