//! crates/daemon/src/daemonize.rs
//! Detaching from the controlling terminal.
#![allow(unsafe_code)]

use logging::{Logger, trace_call};
use nix::sys::stat::{Mode, umask};
use nix::unistd::{ForkResult, Pid, chdir, fork, setsid};

use crate::error::{DaemonError, Step};
use crate::signals;

/// Name the detached child goes by once it has forked.
pub const CHILD_NAME: &str = "background";

/// Which side of the fork the caller is on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Detached {
    /// The original process; it should report the child and exit.
    Parent(Pid),
    /// The detached child, ready to run the background loop.
    Child,
}

/// Forks, then in the child clears the umask, starts a new session, moves
/// to `/` and installs the signal table.
///
/// # Errors
///
/// Returns the step that failed. Only the child can see errors past the fork.
pub fn daemonize(logger: &Logger) -> Result<Detached, DaemonError> {
    let _trace = trace_call!(logger, daemonize);

    // SAFETY: the daemon is single-threaded until the background loop runs,
    // so the child does not inherit locks held by other threads.
    let outcome = unsafe { fork() }.map_err(|source| DaemonError::Syscall {
        step: Step::Fork,
        source,
    })?;
    if let ForkResult::Parent { child } = outcome {
        return Ok(Detached::Parent(child));
    }

    detach(logger)?;
    signals::trap_signals(true).map_err(|source| DaemonError::Signals { source })?;
    Ok(Detached::Child)
}

fn detach(logger: &Logger) -> Result<(), DaemonError> {
    let _trace = trace_call!(logger, detach);

    umask(Mode::empty());
    setsid().map_err(|source| DaemonError::Syscall {
        step: Step::Setsid,
        source,
    })?;
    chdir("/").map_err(|source| DaemonError::Syscall {
        step: Step::Chdir,
        source,
    })?;
    Ok(())
}
