//! ABI-specific error types.
//!
//! Structured errors for interface loading. Messages are written to be
//! surfaced verbatim inside manifest validation reports, so each carries
//! the file path it refers to.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a contract interface.
#[derive(Debug, Error)]
pub enum AbiError {
    /// The interface file does not exist.
    #[error("ABI file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The interface file is not valid JSON, or its entries do not have the
    /// expected shape.
    #[error("failed to parse ABI JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The interface file parsed as JSON but is not an array of entries.
    #[error("ABI at {path} is not a JSON array of interface entries")]
    NotAnArray { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for interface loading.
pub type AbiResult<T> = Result<T, AbiError>;
