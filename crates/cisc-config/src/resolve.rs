//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variable → XDG path → defaults.

use std::path::{Path, PathBuf};

use crate::scoring::ScoringConfig;
use crate::validate::{ValidationError, ValidationResult};

/// Where the configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via the CISC_CONFIG environment variable.
    Environment,

    /// Found in the XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable naming a config file.
pub const ENV_CONFIG_PATH: &str = "CISC_CONFIG";

/// Standard config file name.
const CONFIG_FILENAME: &str = "cisc.toml";

/// Application name for XDG directories.
const APP_NAME: &str = "cisc";

/// A loaded configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ScoringConfig,
    /// File the config was read from (None for defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Locate the config file without reading it.
///
/// 1. Explicit CLI path (must exist)
/// 2. CISC_CONFIG environment variable (must exist)
/// 3. `$XDG_CONFIG_HOME/cisc/cisc.toml`
/// 4. Built-in defaults (None)
pub fn find_config(cli_path: Option<&Path>) -> ValidationResult<(Option<PathBuf>, ConfigSource)> {
    // An explicit path that does not exist is a user error, not a fallback.
    if let Some(path) = cli_path {
        if !path.exists() {
            return Err(ValidationError::IoError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok((Some(path.to_path_buf()), ConfigSource::CliArgument));
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if !path.exists() {
            return Err(ValidationError::IoError(format!(
                "{} points to a missing file: {}",
                ENV_CONFIG_PATH,
                path.display()
            )));
        }
        return Ok((Some(path), ConfigSource::Environment));
    }

    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(CONFIG_FILENAME);
        if path.exists() {
            return Ok((Some(path), ConfigSource::XdgConfig));
        }
    }

    Ok((None, ConfigSource::BuiltinDefault))
}

/// Locate, read and validate the configuration.
pub fn resolve_config(cli_path: Option<&Path>) -> ValidationResult<ResolvedConfig> {
    let (path, source) = find_config(cli_path)?;
    let config = match &path {
        Some(p) => ScoringConfig::from_file(p)?,
        None => ScoringConfig::default(),
    };
    Ok(ResolvedConfig {
        config,
        path,
        source,
    })
}
