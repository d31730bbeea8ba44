//! crates/daemon/src/signals.rs
//! The daemon's signal table.
//!
//! Handlers must be async-signal-safe, so they only touch atomics and reap
//! children with `waitpid(2)`. They never log.
#![allow(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use nix::errno::Errno;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};

static TERMINATE: AtomicBool = AtomicBool::new(false);

/// Signals that end the background loop.
pub const TERMINATING: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

extern "C" fn handle_terminate(_signum: libc::c_int) {
    TERMINATE.store(true, Ordering::SeqCst);
}

extern "C" fn handle_child(_signum: libc::c_int) {
    // Reap every child that has exited without blocking on live ones.
    while let Ok(status) = waitpid(None, Some(WaitPidFlag::WNOHANG)) {
        if status == WaitStatus::StillAlive {
            break;
        }
    }
}

/// Installs (`true`) or removes (`false`) the daemon's handlers.
///
/// SIGCHLD reaps exited children and is installed with `SA_NOCLDSTOP`;
/// SIGINT and SIGTERM request termination. Removing restores the default
/// disposition of all three.
///
/// # Errors
///
/// Returns the errno of the first `sigaction(2)` call that fails.
pub fn trap_signals(install: bool) -> Result<(), Errno> {
    let (child, terminate) = if install {
        (
            action(
                SigHandler::Handler(handle_child),
                SaFlags::SA_NOCLDSTOP | SaFlags::SA_RESTART,
            ),
            action(SigHandler::Handler(handle_terminate), SaFlags::SA_RESTART),
        )
    } else {
        (
            action(SigHandler::SigDfl, SaFlags::empty()),
            action(SigHandler::SigDfl, SaFlags::empty()),
        )
    };

    // SAFETY: both handlers only perform async-signal-safe operations.
    unsafe {
        signal::sigaction(Signal::SIGCHLD, &child)?;
        for signum in TERMINATING {
            signal::sigaction(signum, &terminate)?;
        }
    }
    Ok(())
}

fn action(handler: SigHandler, flags: SaFlags) -> SigAction {
    SigAction::new(handler, flags, SigSet::empty())
}

/// Reports whether SIGINT or SIGTERM has arrived.
#[must_use]
pub fn termination_requested() -> bool {
    TERMINATE.load(Ordering::SeqCst)
}

/// Requests termination as if a terminating signal had arrived.
pub fn request_termination() {
    TERMINATE.store(true, Ordering::SeqCst);
}

/// Clears a pending termination request.
pub fn reset_termination() {
    TERMINATE.store(false, Ordering::SeqCst);
}
