//! crates/daemon/src/background.rs
//! The loop a detached daemon runs until told to stop.

use std::thread;
use std::time::{Duration, Instant};

use logging::{Logger, log_error, log_info, log_notice, trace_call};

use crate::scopes::background::{SLEEPING, TERMINATING, YAWN};

/// Time between two rounds of the loop.
pub const INTERVAL: Duration = Duration::from_secs(2);

const POLL: Duration = Duration::from_millis(100);

/// Logs a snore and a yawn every `interval` until `stop` returns true.
pub fn run(logger: &Logger, interval: Duration, stop: &dyn Fn() -> bool) {
    let _trace = trace_call!(logger, run);

    while !stop() {
        log_info!(logger, SLEEPING, "zzzz...");
        log_error!(logger, YAWN, ":: yawn ::");
        nap(interval, stop);
    }
    log_notice!(logger, TERMINATING, "termination requested");
}

// Sleeps in short slices so a stop request is noticed promptly.
fn nap(interval: Duration, stop: &dyn Fn() -> bool) {
    let deadline = Instant::now() + interval;
    while !stop() {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(POLL));
    }
}
