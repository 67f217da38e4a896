//! Error types for the Evidentia library.
//!
//! All fallible library operations return [`Result`], whose error side is the
//! [`EvidentiaError`] enum. Finding nothing to highlight is not an error: the
//! locator returns an empty span list and the renderer passes text through.
//!
//! # Examples
//!
//! ```
//! use evidentia::error::{EvidentiaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(EvidentiaError::config("max_attempts must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::dispatch::GenerationError;

/// The main error type for Evidentia operations.
///
/// Provides convenient constructor methods for the string-carrying variants.
#[derive(Error, Debug)]
pub enum EvidentiaError {
    /// I/O errors (reading documents, labels, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Label store errors
    #[error("Label error: {0}")]
    Label(String),

    /// Answer generation failed and was not recovered by the retry policy
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with EvidentiaError.
pub type Result<T> = std::result::Result<T, EvidentiaError>;

impl EvidentiaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        EvidentiaError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EvidentiaError::Config(msg.into())
    }

    /// Create a new label error.
    pub fn label<S: Into<String>>(msg: S) -> Self {
        EvidentiaError::Label(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EvidentiaError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        EvidentiaError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        EvidentiaError::Other(format!("Not found: {}", msg.into()))
    }
}
