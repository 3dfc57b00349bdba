//! CISC common types and errors.
//!
//! This crate provides the types shared by the scoring crates and the CLI:
//! - The unified error type with stable codes
//! - Output format selection

pub mod error;
pub mod output;

pub use error::{Error, ErrorCategory, ErrorReport, Result};
pub use output::OutputFormat;
