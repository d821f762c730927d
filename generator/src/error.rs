//! Error types for the synthgen generator.
//!
//! - [`CsvError`] - reading and parsing the input table
//! - [`RenderError`] - serializing the generated documents
//! - [`ConfigError`] - invalid configuration values
//! - [`GenerateError`] - top-level run errors
//!
//! Record-level problems (a row without an identifier, a bad frequency)
//! are not errors: they are reported through
//! [`crate::transform::fields::SkipReason`] and
//! [`crate::transform::fields::FieldWarning`] and never abort a run.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Input Errors
// =============================================================================

/// Errors while loading the input table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input file does not exist.
    #[error("CSV file not found at {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read the input file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content could not be decoded to text.
    #[error("Failed to decode input: {0}")]
    Encoding(String),

    /// Malformed CSV content.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// Nothing but whitespace in the file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row has no usable column name.
    #[error("CSV file has no header row")]
    NoHeaders,
}

// =============================================================================
// Rendering Errors
// =============================================================================

/// Errors while serializing a generated document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors in configuration values coming from the environment or the CLI.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Delimiter is not a single ASCII character.
    #[error("Invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(String),
}

// =============================================================================
// Run Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::generate`].
///
/// Source-level variants ([`GenerateError::Csv`]) happen before anything is
/// written. [`GenerateError::Io`] and [`GenerateError::Render`] stop the run
/// mid-way and leave the files already written on disk.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Csv(#[from] CsvError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to create a directory or write a file.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for document rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for a generation run.
pub type GenerateResult<T> = Result<T, GenerateError>;
