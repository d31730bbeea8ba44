//! crates/daemon/src/error.rs
//! Failures of the process lifecycle and the exit status each maps to.

use std::fmt;

use logging::LoggingError;

#[cfg(unix)]
use nix::errno::Errno;

/// Highest status a process can report.
pub const MAX_EXIT_CODE: i32 = 255;

/// The system calls used to detach from the terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// fork(2)
    Fork,
    /// setsid(2)
    Setsid,
    /// chdir(2)
    Chdir,
}

impl Step {
    /// Returns the call's name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fork => "fork",
            Self::Setsid => "setsid",
            Self::Chdir => "chdir",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a lifecycle step fails.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    /// The logger could not be created.
    #[error(transparent)]
    Logging(#[from] LoggingError),
    /// A system call used to detach from the terminal failed.
    #[cfg(unix)]
    #[error("{step} failed ({source})")]
    Syscall {
        /// The failed step.
        step: Step,
        /// The errno reported by the call.
        #[source]
        source: Errno,
    },
    /// Installing the signal table failed.
    #[cfg(unix)]
    #[error("unable to trap signals ({source})")]
    Signals {
        /// The errno reported by sigaction(2).
        #[source]
        source: Errno,
    },
}

impl DaemonError {
    /// Returns the process exit status for this error.
    ///
    /// Failed system calls exit with their errno. Signal setup failures exit
    /// with 1.
    #[must_use]
    pub const fn exit_status(&self) -> i32 {
        match self {
            #[cfg(unix)]
            Self::Logging(error) => error.exit_status(),
            #[cfg(not(unix))]
            Self::Logging(_) => 1,
            #[cfg(unix)]
            Self::Syscall { source, .. } => *source as i32,
            #[cfg(unix)]
            Self::Signals { .. } => 1,
        }
    }
}

/// Converts a status returned by [`run`](crate::run) into a process exit code.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
