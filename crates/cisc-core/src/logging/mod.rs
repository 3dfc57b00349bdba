//! Structured logging for the `cisc` binary.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for pipelines
//!
//! stdout is reserved for command payloads. All log output goes to stderr.
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, ENV_LOG_FORMAT, ENV_LOG_LEVEL};

use std::io::IsTerminal;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events pass the level filter.
const LOG_TARGETS: [&str; 2] = ["cisc_core", "cisc"];

/// Filter directives for `level` across this workspace's targets.
pub fn filter_directives(level: LogLevel) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse_lossy(filter_directives(config.level))
}

/// Initialize the logging subsystem.
///
/// Call once at startup. A second call is ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let jsonl_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(jsonl_layer)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
