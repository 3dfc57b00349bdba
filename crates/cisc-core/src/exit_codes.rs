//! Exit codes for the `cisc` CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-9: Operational outcomes (parse outcome from code, not output)
//! - 10-19: User errors (recoverable by fixing arguments, input or config)
//! - 20-29: Internal and environment errors

use cisc_common::{Error, ErrorCategory};

/// Exit codes for CLI operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-9)
    // ========================================================================
    /// Every requested item was produced.
    Clean = 0,

    /// Batch finished but some pairs failed.
    PartialFail = 3,

    // ========================================================================
    // User Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Malformed sequences or pair file
    InputError = 11,

    /// Invalid configuration
    ConfigError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// User errors (10-19) can be resolved by the caller.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Any code requiring attention, including partial failure.
    pub fn is_error(self) -> bool {
        self != ExitCode::Clean
    }

    /// Error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::PartialFail => "ERR_PARTIAL",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Exit code for a library error.
    ///
    /// JSON syntax errors in an input file count as input errors, not I/O.
    pub fn from_error(err: &Error) -> Self {
        match (err.category(), err) {
            (_, Error::Json(_)) => ExitCode::InputError,
            (ErrorCategory::Input, _) => ExitCode::InputError,
            (ErrorCategory::Config, _) => ExitCode::ConfigError,
            (ErrorCategory::Io, _) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        ExitCode::from_error(err)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
