//! Manifest-specific error types.
//!
//! Validation failures carry the fully rendered combined report so callers
//! can print them verbatim; everything else is a structured load or
//! serialization error with the file path it refers to.

use std::path::PathBuf;

use thiserror::Error;

use sgkit_core::ValueError;

/// Errors that can occur while loading or writing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest failed validation. The payload is the combined report
    /// text, already formatted for display.
    #[error("{0}")]
    Validation(String),

    /// The manifest file does not exist.
    #[error("manifest file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// YAML parsing or typed decoding failed.
    #[error("failed to parse YAML at {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The document uses YAML constructs manifests do not support.
    #[error("unsupported YAML in {path}: {source}")]
    Document { path: PathBuf, source: ValueError },

    /// The bundled meta-schema could not be parsed. Indicates a build
    /// problem, never user input.
    #[error("invalid manifest meta-schema: {reason}")]
    SchemaParse { reason: String },

    /// Serialization during write-back failed.
    #[error("failed to serialize manifest: {0}")]
    Serialize(serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;
