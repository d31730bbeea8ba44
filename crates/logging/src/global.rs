//! crates/logging/src/global.rs
//! The optional process-wide logger.

use std::sync::OnceLock;

use crate::error::LoggingError;
use crate::logger::Logger;
use crate::scope::ScopeSpec;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Creates the process-wide logger.
///
/// # Errors
///
/// Returns [`LoggingError::AlreadyInitialized`] on a second call, or any
/// error from [`Logger::new`].
pub fn init(
    name: impl Into<String>,
    scopes: &[ScopeSpec],
) -> Result<&'static Logger, LoggingError> {
    if GLOBAL.get().is_some() {
        return Err(LoggingError::AlreadyInitialized);
    }
    install(Logger::new(name, scopes)?)
}

/// Installs an already-built logger as the process-wide one.
///
/// # Errors
///
/// Returns [`LoggingError::AlreadyInitialized`] if a logger is installed.
pub fn install(logger: Logger) -> Result<&'static Logger, LoggingError> {
    GLOBAL
        .set(logger)
        .map_err(|_| LoggingError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(LoggingError::AlreadyInitialized)
}

/// Returns the process-wide logger, if one was installed.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}
