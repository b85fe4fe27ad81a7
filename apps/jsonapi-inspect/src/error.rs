//! # Inspect Errors
//!
//! Everything the CLI can fail with. Reader errors pass through unchanged.

use jsonapi_reader::JsonApiError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The document could not be read or queried.
    #[error(transparent)]
    Reader(#[from] JsonApiError),

    /// File system access failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command was given an incomplete set of arguments.
    #[error("Invalid arguments: {0}")]
    Usage(String),
}
