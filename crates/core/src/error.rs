//! Error types for Siteprint operations.
//!
//! Extraction itself never fails: malformed markup, unresolvable origins and
//! odd attribute values all degrade to empty output. [`SiteprintError`] covers
//! the surface around it, such as loading configuration, compiling selectors
//! and serializing results.
//!
//! # Example
//!
//! ```rust
//! use siteprint_core::{ExtractorConfig, SiteprintError};
//!
//! match ExtractorConfig::load("/nonexistent/config.json") {
//!     Err(SiteprintError::FileNotFound(path)) => println!("missing: {}", path.display()),
//!     Err(e) => println!("Error: {}", e),
//!     Ok(_) => {}
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Siteprint operations.
#[derive(Error, Debug)]
pub enum SiteprintError {
    /// Invalid URL provided.
    ///
    /// Returned by APIs that require a parseable origin up front.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// In practice this only happens for invalid CSS selectors, since the
    /// parser itself recovers from any markup.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// Extractor configuration errors.
    ///
    /// Returned when a configuration file exists but cannot be decoded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Output serialization errors.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SiteprintError {
    fn from(err: serde_json::Error) -> Self {
        SiteprintError::SerializationError(err.to_string())
    }
}

/// Result type alias for SiteprintError.
pub type Result<T> = std::result::Result<T, SiteprintError>;
