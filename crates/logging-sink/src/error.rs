//! crates/logging-sink/src/error.rs
//! Error types surfaced by priority parsing and destination setup.

use std::io;
use std::path::PathBuf;

/// Error returned when a string or number does not name a [`Priority`](crate::Priority).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid priority \"{value}\" (expected 0-7 or a syslog severity name)")]
pub struct ParsePriorityError {
    value: String,
}

impl ParsePriorityError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Error returned when a string does not name a [`DestinationKind`](crate::DestinationKind).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown log destination \"{value}\"")]
pub struct ParseDestinationError {
    value: String,
}

impl ParseDestinationError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Error returned when a [`Destination`](crate::Destination) cannot be brought up.
///
/// The dispatcher never propagates these past a reconfiguration: it reports
/// them through the destination that was active before the switch and then
/// falls back to the console.
#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    /// A file destination was requested without naming a file.
    #[error("Unable to log to a file (no path was given), redirecting to stderr")]
    MissingPath,
    /// The log file could not be opened for appending.
    #[error("Unable to log to \"{}\" ({source}), redirecting to stderr", path.display())]
    OpenFile {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Syslog is not available on this platform.
    #[error("syslog is not supported on this platform")]
    SyslogUnsupported,
}

impl DestinationError {
    /// Returns the raw OS error number, when the failure came from the OS.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::OpenFile { source, .. } => source.raw_os_error(),
            Self::MissingPath | Self::SyslogUnsupported => None,
        }
    }
}
