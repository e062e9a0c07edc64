//! Error types

use thiserror::Error;

/// Main error type for integration configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown integration: {0}")]
    UnknownIntegration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
