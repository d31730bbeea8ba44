//! crates/daemon/src/scopes.rs
//! Logging scopes and call sites of the daemon.

logging::define_scopes! {
    /// Start-up, daemonization and exit.
    pub mod main("main") {
        STARTED,
        DAEMON_PID,
        FORK_FAILED,
        SETSID_FAILED,
        CHDIR_FAILED,
        SIGNALS_FAILED,
        STOPPED,
    }
    /// Command line and configuration file handling.
    pub mod config("config") {
        MISSING_FILE,
        UNREADABLE_FILE,
        BAD_OPTION,
        RESOLVED,
    }
    /// The idle loop run once detached.
    pub mod background("background") {
        SLEEPING,
        YAWN,
        TERMINATING,
    }
}
