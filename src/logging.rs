//! Tracing subscriber setup shared by both binaries.
//!
//! Logs go to stderr so they never interleave with the menu on stdout.

use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// Build the filter: `RUST_LOG` when set, otherwise `level`
///
/// # Errors
///
/// Returns `LoggingError::Filter` if `level` is not a valid directive.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::Filter {
        directive: level.to_string(),
        message: e.to_string(),
    })
}

/// Install the global stderr subscriber
///
/// # Errors
///
/// Returns `LoggingError::Filter` for a bad level and `LoggingError::Init` if
/// a subscriber is already installed.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = build_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
