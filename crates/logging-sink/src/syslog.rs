//! crates/logging-sink/src/syslog.rs
//! Syslog backend for the syslog destination.
//!
//! Wraps libc `openlog`/`setlogmask`/`syslog`/`closelog`. The logger's own
//! filter decides what is emitted, so the syslog-side mask admits every
//! priority.
#![allow(unsafe_code)]

use std::ffi::CString;
use std::fmt;

use crate::Priority;

/// Syslog facility used for every connection opened by this crate.
pub const FACILITY: libc::c_int = libc::LOG_LOCAL1;

/// Options passed to `openlog(3)`: write to the console if syslogd is
/// unreachable, include the pid, and connect immediately.
pub const OPEN_OPTIONS: libc::c_int = libc::LOG_CONS | libc::LOG_PID | libc::LOG_NDELAY;

/// Equivalent of the `LOG_UPTO(LOG_DEBUG)` macro from `<syslog.h>`.
pub const MASK_ALL: libc::c_int = (1 << (libc::LOG_DEBUG + 1)) - 1;

/// An open syslog connection tagged with the process name.
///
/// Dropping the connection calls `closelog(3)`. Only one connection should be
/// alive per process; the dispatcher guarantees this by owning the single
/// active destination.
///
/// # Examples
///
/// ```no_run
/// use logging_sink::{Priority, syslog::SyslogConnection};
///
/// let connection = SyslogConnection::open("toggled");
/// connection.send(Priority::Info, "daemon started");
/// // dropped here, closelog() called
/// ```
pub struct SyslogConnection {
    // syslog(3) keeps the ident pointer, so the string lives as long as the
    // connection and is released only after closelog().
    ident: CString,
}

impl SyslogConnection {
    /// Opens a connection tagged with `ident` at the [`FACILITY`] facility.
    ///
    /// An ident containing NUL bytes is truncated at the first NUL.
    pub fn open(ident: &str) -> Self {
        let ident = CString::new(ident).unwrap_or_else(|error| {
            let position = error.nul_position();
            let mut bytes = error.into_vec();
            bytes.truncate(position);
            CString::new(bytes).unwrap_or_default()
        });

        // SAFETY: the ident pointer stays valid until closelog() runs in Drop,
        // because the CString is owned by the returned connection.
        unsafe {
            libc::setlogmask(MASK_ALL);
            libc::openlog(ident.as_ptr(), OPEN_OPTIONS, FACILITY);
        }

        Self { ident }
    }

    /// Returns the tag every message is sent under.
    pub fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or_default()
    }

    /// Sends one message at the given priority.
    ///
    /// Messages containing NUL bytes are dropped; failures are not reported.
    pub fn send(&self, priority: Priority, message: &str) {
        // `%s` keeps `%` sequences in the message from being interpreted.
        let Ok(c_message) = CString::new(message) else {
            return;
        };

        // SAFETY: openlog() ran when this connection was created and has not
        // been undone; both pointers are valid NUL-terminated strings.
        unsafe {
            libc::syslog(
                libc::c_int::from(priority.as_u8()),
                c"%s".as_ptr(),
                c_message.as_ptr(),
            );
        }
    }
}

impl fmt::Debug for SyslogConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyslogConnection")
            .field("ident", &self.ident)
            .finish()
    }
}

impl Drop for SyslogConnection {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions beyond openlog having been
        // called, which construction guarantees.
        unsafe {
            libc::closelog();
        }
    }
}
