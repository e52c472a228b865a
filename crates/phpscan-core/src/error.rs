//! Error types for phpscan

use thiserror::Error;

/// Result type alias using the phpscan Error
pub type Result<T> = std::result::Result<T, Error>;

/// phpscan error types
///
/// Malformed configuration lines, unconvertible magnitudes and keys the
/// catalog does not reference are never errors; only failing to obtain the
/// input is.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // === Catalog Errors ===
    #[error("Invalid rule catalog: {path} - {message}")]
    InvalidCatalog { path: String, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error means the audit input itself is missing
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Error::FileNotFound { .. })
            || matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::Io(_) => "IO_ERROR",
            Error::FileNotFound { .. } => "FILE_NOT_FOUND",
            Error::InvalidCatalog { .. } => "INVALID_CATALOG",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
