//! crates/logging/src/error.rs
//! Errors raised while bringing a logger up.

use crate::ScopeId;

/// Failures that prevent a [`Logger`](crate::Logger) from being created or installed.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The site array for a scope could not be allocated.
    ///
    /// Callers treat this as fatal and exit with `ENOMEM`.
    #[error("unable to allocate {sites} log statement slots for scope \"{scope}\"")]
    SiteTableAllocation {
        /// Name of the scope whose table failed.
        scope: &'static str,
        /// Number of sites that were requested.
        sites: u16,
    },
    /// A scope specification sits at a position that does not match its id.
    #[error("scope \"{name}\" has id {found} but occupies slot {expected}")]
    ScopeTableMismatch {
        /// Name of the misplaced scope.
        name: &'static str,
        /// Position in the table, counting the reserved logging scope.
        expected: usize,
        /// Id carried by the specification.
        found: ScopeId,
    },
    /// [`init`](crate::init) or [`install`](crate::install) ran twice.
    #[error("the process-wide logger is already initialized")]
    AlreadyInitialized,
}

impl LoggingError {
    /// Returns the errno-style exit status a process should report for this error.
    #[cfg(unix)]
    pub const fn exit_status(&self) -> i32 {
        match self {
            Self::SiteTableAllocation { .. } => libc::ENOMEM,
            Self::ScopeTableMismatch { .. } => libc::EINVAL,
            Self::AlreadyInitialized => libc::EBUSY,
        }
    }
}
