//! Logging setup
//!
//! All progress and warnings go through `tracing` and are written to stderr,
//! keeping stdout free. `SCHELM_LOG` takes an `EnvFilter` directive and wins
//! over the level chosen on the command line.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, LogFormatArg};
use crate::error::{Result, SchelmError};

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "SCHELM_LOG";

/// Minimum level reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormatArg,
}

impl LogConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let level = if cli.verbose {
            LogLevel::Debug
        } else if cli.quiet {
            LogLevel::Warn
        } else {
            LogLevel::Info
        };

        Self {
            level,
            format: cli.log_format,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(self.level.directive()))
    }
}

/// Install the global subscriber
pub fn init(config: LogConfig) -> Result<()> {
    let ansi = std::io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(config.filter());

    let result = match config.format {
        LogFormatArg::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_target(false),
            )
            .try_init(),
        LogFormatArg::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi),
            )
            .try_init(),
        LogFormatArg::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| SchelmError::LoggingInitFailed {
        message: e.to_string(),
    })
}
