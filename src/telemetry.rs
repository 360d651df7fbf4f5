//! Tracing subscriber setup.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, prelude::*};

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Multi-line, human-oriented output.
    Pretty,
    /// Single-line text.
    #[default]
    Compact,
}

impl LogFormat {
    /// Returns the configuration name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown log format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown log format: {0}")]
pub struct ParseLogFormatError(pub String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            _ => Err(ParseLogFormatError(value.to_owned())),
        }
    }
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber is already installed.
    #[error(transparent)]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable `level` and
/// [`TelemetryError::Init`] when a subscriber is already installed.
pub fn init(level: &str, format: LogFormat) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_fmt::layer().json()).try_init()?,
        LogFormat::Pretty => registry.with(tracing_fmt::layer().pretty()).try_init()?,
        LogFormat::Compact => registry.with(tracing_fmt::layer().compact()).try_init()?,
    }
    Ok(())
}
