//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::scoring::ScoringConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest precision that still means something for an f64 sum.
pub const MAX_PRECISION_DIGITS: u32 = 15;

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 20,
            ValidationError::InvalidValue { .. } => 21,
            ValidationError::VersionMismatch { .. } => 22,
        }
    }
}

impl From<ValidationError> for cisc_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidValue { field, message } => {
                cisc_common::Error::InvalidConfig { field, message }
            }
            ValidationError::IoError(msg) => cisc_common::Error::Io(std::io::Error::other(msg)),
            other => cisc_common::Error::Config(other.to_string()),
        }
    }
}

fn invalid(field: &str, message: String) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message,
    }
}

/// Validate a scoring configuration semantically.
pub fn validate_scoring(config: &ScoringConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.precision_digits == 0 || config.precision_digits > MAX_PRECISION_DIGITS {
        return Err(invalid(
            "precision_digits",
            format!(
                "Must be in [1, {}], got {}",
                MAX_PRECISION_DIGITS, config.precision_digits
            ),
        ));
    }

    if config.parallel.min_pairs == 0 {
        return Err(invalid(
            "parallel.min_pairs",
            "Must be at least 1".to_string(),
        ));
    }

    if config.parallel.threads == Some(0) {
        return Err(invalid(
            "parallel.threads",
            "Must be at least 1 when set".to_string(),
        ));
    }

    if config.evaluation.decision_rate_steps == 0 {
        return Err(invalid(
            "evaluation.decision_rate_steps",
            "Must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn zero_precision_rejected() {
        let mut config = ScoringConfig::default();
        config.precision_digits = 0;
        let err = validate_scoring(&config).unwrap_err();
        assert_eq!(err.code(), 21);
        assert!(err.to_string().contains("precision_digits"));
    }

    #[test]
    fn excessive_precision_rejected() {
        let mut config = ScoringConfig::default();
        config.precision_digits = 16;
        assert!(validate_scoring(&config).is_err());
    }

    #[test]
    fn version_mismatch() {
        let mut config = ScoringConfig::default();
        config.schema_version = "0.9.0".to_string();
        assert!(matches!(
            validate_scoring(&config),
            Err(ValidationError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn zero_threads_rejected() {
        let mut config = ScoringConfig::default();
        config.parallel.threads = Some(0);
        assert!(validate_scoring(&config).is_err());
    }

    #[test]
    fn converts_into_unified_error() {
        let err: cisc_common::Error = invalid("parallel.min_pairs", "x".into()).into();
        assert_eq!(err.code(), 21);
        let err: cisc_common::Error = ValidationError::ParseError("bad".into()).into();
        assert_eq!(err.code(), 20);
    }
}
