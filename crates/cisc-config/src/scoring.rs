//! Typed contents of `cisc.toml`.

use std::path::Path;

use cisc_math::DEFAULT_PRECISION_DIGITS;
use serde::{Deserialize, Serialize};

use crate::validate::{validate_scoring, ValidationError, ValidationResult};

/// Top-level scoring configuration.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Must equal [`CONFIG_SCHEMA_VERSION`](crate::CONFIG_SCHEMA_VERSION).
    pub schema_version: String,

    /// Stable decimal digits `d` of the binary regret seed.
    pub precision_digits: u32,

    pub parallel: ParallelConfig,

    pub evaluation: EvaluationConfig,
}

/// Worker-pool settings for batch scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Score pairs on a worker pool.
    pub enabled: bool,

    /// Smallest batch worth parallelizing.
    pub min_pairs: usize,

    /// Worker threads; `None` uses one per core.
    pub threads: Option<usize>,

    /// Also spread partition cells of one pair over the pool.
    pub cells: bool,
}

/// Settings for accuracy evaluation against known directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Number of decision-rate points between 1/steps and 1.
    pub decision_rate_steps: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            precision_digits: DEFAULT_PRECISION_DIGITS,
            parallel: ParallelConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            enabled: true,
            min_pairs: 8,
            threads: None,
            cells: false,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            decision_rate_steps: 100,
        }
    }
}

impl ScoringConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> ValidationResult<Self> {
        let config: ScoringConfig =
            toml::from_str(text).map_err(|e| ValidationError::ParseError(e.to_string()))?;
        validate_scoring(&config)?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> ValidationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ValidationError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let config = ScoringConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScoringConfig::default());
        assert_eq!(config.precision_digits, 10);
        assert!(config.parallel.enabled);
        assert_eq!(config.evaluation.decision_rate_steps, 100);
    }

    #[test]
    fn partial_override() {
        let config = ScoringConfig::from_toml_str(
            r#"
            precision_digits = 12
            [parallel]
            threads = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.precision_digits, 12);
        assert_eq!(config.parallel.threads, Some(2));
        assert_eq!(config.parallel.min_pairs, 8);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = ScoringConfig::from_toml_str("tie_tolerance = 0.1").unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = ScoringConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ScoringConfig::from_toml_str(&text).unwrap(), config);
    }
}
