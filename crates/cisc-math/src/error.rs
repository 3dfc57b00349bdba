//! Errors raised by the complexity computations.
//!
//! Every variant but [`ComplexityError::RegretOverflow`] is an input problem.
//! Code lengths are computed in the log domain and never overflow; only the
//! plain regret value can exceed `f64`.

use thiserror::Error;

/// Result alias for complexity computations.
pub type Result<T> = std::result::Result<T, ComplexityError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplexityError {
    #[error("invalid input: sequence is empty")]
    EmptySequence,

    #[error("invalid input: regret undefined for {categories} categories over {samples} samples")]
    DegenerateModel { categories: usize, samples: usize },

    #[error("invalid input: precision must be at least one decimal digit, got {digits}")]
    InvalidPrecision { digits: u32 },

    #[error("regret C({categories}, {samples}) exceeds the f64 range; use its log2")]
    RegretOverflow { categories: usize, samples: usize },

    #[error("exact oracle limited to {limit} samples, got {samples}")]
    OracleLimit { samples: usize, limit: usize },
}

impl ComplexityError {
    /// Stable short name used in structured error output.
    pub fn kind(&self) -> &'static str {
        match self {
            ComplexityError::EmptySequence => "empty_sequence",
            ComplexityError::DegenerateModel { .. } => "degenerate_model",
            ComplexityError::InvalidPrecision { .. } => "invalid_precision",
            ComplexityError::RegretOverflow { .. } => "regret_overflow",
            ComplexityError::OracleLimit { .. } => "oracle_limit",
        }
    }
}
