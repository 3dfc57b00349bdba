//! Output format specifications.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document (default)
    #[default]
    Json,

    /// One JSON object per line, one line per scored item
    Jsonl,

    /// Markdown table
    Md,

    /// One-line summary per item
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
            OutputFormat::Md => write!(f, "md"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for format in [
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Md,
            OutputFormat::Summary,
        ] {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format));
        }
    }

    #[test]
    fn default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
