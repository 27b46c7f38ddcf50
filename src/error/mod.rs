//! Error handling module for frame-remap

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for frame-remap operations
#[derive(Error, Debug)]
pub enum RemapError {
    /// Mapping, clip or filter construction failure
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Configuration file or value error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Report serialization error
    #[error("Failed to serialize report: {message}")]
    Serialization { message: String },
}

/// Result type alias for frame-remap operations
pub type RemapResult<T> = std::result::Result<T, RemapError>;
