//! Error types for CISC.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//!
//! Malformed input (an empty sequence, paired sequences of different
//! length) is always an error. A tie between the two directional scores is
//! a valid result and never surfaces here.
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 11,
//!   "category": "input",
//!   "message": "invalid input: sequences differ in length (x has 3, y has 2)",
//!   "remediation": "Pass X and Y with one observation per index."
//! }
//! ```

use cisc_math::ComplexityError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for CISC operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed sequences or model parameters.
    Input,
    /// Configuration file errors.
    Config,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for CISC.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid input: sequences differ in length (x has {x_len}, y has {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error(transparent)]
    Complexity(#[from] ComplexityError),

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Configuration errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidInput(_) => 10,
            Error::LengthMismatch { .. } => 11,
            Error::Complexity(_) => 12,
            Error::Config(_) => 20,
            Error::InvalidConfig { .. } => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidInput(_) | Error::LengthMismatch { .. } | Error::Complexity(_) => {
                ErrorCategory::Input
            }
            Error::Config(_) | Error::InvalidConfig { .. } => ErrorCategory::Config,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// True for every malformed-input error.
    pub fn is_invalid_input(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => {
                "Check that every sequence is non-empty and holds discrete symbols."
            }
            Error::LengthMismatch { .. } => "Pass X and Y with one observation per index.",
            Error::Complexity(ComplexityError::EmptySequence) => {
                "Provide at least one observation per sequence."
            }
            Error::Complexity(ComplexityError::OracleLimit { .. }) => {
                "Use the recurrence instead of the exact oracle for samples of this size."
            }
            Error::Complexity(ComplexityError::RegretOverflow { .. }) => {
                "Read regret_bits instead of the plain regret for domains this wide."
            }
            Error::Complexity(_) => {
                "Use at least one category, one sample and one precision digit."
            }
            Error::Config(_) => "Run 'cisc config validate' to check the configuration file.",
            Error::InvalidConfig { .. } => {
                "Fix the named field in cisc.toml, or delete the file to use defaults."
            }
            Error::Io(_) => "Check that the input path exists and is readable.",
            Error::Json(_) => "Check the input JSON syntax with 'jq . <file>'.",
        }
    }

    /// Structured view for machine consumers.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            category: self.category(),
            message: self.to_string(),
            remediation: self.remediation().to_string(),
        }
    }
}

/// Serializable error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
    pub remediation: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "✗ {} error", self.category)?;
        writeln!(f, "  Reason: {}", self.message)?;
        write!(f, "  Fix: {}", self.remediation)
    }
}
