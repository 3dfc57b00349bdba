//! CISC configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for cisc.toml
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod resolve;
pub mod scoring;
pub mod validate;

pub use resolve::{resolve_config, ConfigSource, ResolvedConfig};
pub use scoring::{EvaluationConfig, ParallelConfig, ScoringConfig};
pub use validate::{validate_scoring, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
