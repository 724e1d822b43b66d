//! Structured logging setup.
//!
//! Services emit `tracing` events; embedding applications decide where they
//! go. [`init`] installs a formatting subscriber on stderr for callers that
//! have no subscriber of their own.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::ParseError};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directives could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialised(#[from] SetGlobalDefaultError),
}

/// Builds the event filter.
///
/// A valid `rust_log` value (the contents of `RUST_LOG`) overrides the
/// configured directives; an invalid one is ignored.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the configured directives
/// are used and cannot be parsed.
pub fn env_filter(
    config: &LoggingConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(directives) = rust_log.filter(|value| !value.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(&config.filter)?)
}

/// Installs a global formatting subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for unparseable directives or
/// [`TelemetryError::AlreadyInitialised`] when called more than once.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(config, rust_log.as_deref())?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(filter = %config.filter, "logging initialised");
    Ok(())
}
