#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `daemon` is the process around the `toggled` logger: it parses the command
//! line and configuration file, selects a log destination, optionally
//! detaches from the terminal and then runs an idle loop that logs at a fixed
//! interval until SIGINT or SIGTERM arrives.
//!
//! # Design
//!
//! - [`run`] accepts an argument iterator together with writable handles for
//!   standard output and error, so the whole lifecycle can be driven from
//!   tests.
//! - The logger is created from the table in [`scopes`] and installed as the
//!   process-wide instance before any option is parsed. With the `tracing`
//!   feature, `tracing` events are forwarded into it as well.
//! - [`config`] merges the configuration file under the command line.
//!   Problems found there are logged and never abort start-up.
//! - [`daemonize`](mod@daemonize) forks and detaches; [`signals`] owns the
//!   handler table and the termination flag the [`background`] loop polls.
//!
//! # Errors
//!
//! Usage errors print clap's diagnostic and exit with status 1. Failing to
//! allocate the logger's site tables exits with `ENOMEM`. A failed
//! daemonization step exits with its errno; see [`DaemonError::exit_status`].
//!
//! # Examples
//!
//! Render the `--version` banner into an in-memory buffer.
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = daemon::run(["toggled", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("toggled "));
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use logging::{DestinationKind, Logger, Priority, SiteId, log_debug, log_error, log_info};

pub mod background;
pub mod config;
#[cfg(unix)]
pub mod daemonize;
mod error;
pub mod scopes;
#[cfg(unix)]
pub mod signals;

pub use error::{DaemonError, MAX_EXIT_CODE, Step, exit_code_from};

use config::{ConfigError, DEFAULT_CONFIG_FILE, Invocation, Options, PROGRAM_NAME};

/// Runs the daemon with `arguments`, `argv[0]` included, and returns the
/// process exit status.
///
/// Help and version output go to `stdout`; usage errors and a failure to
/// create the logger go to `stderr`. Everything else is logged.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let arguments: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    let name = process_name(arguments.first());

    let logger = match Logger::new(name.clone(), scopes::SCOPES).and_then(logging::install) {
        Ok(logger) => logger,
        Err(error) => {
            let _ = writeln!(stderr, "{name}: {error}");
            return DaemonError::from(error).exit_status();
        }
    };

    #[cfg(feature = "tracing")]
    let _ = logging::init_tracing(logger);

    let status = execute(
        logger,
        &name,
        arguments,
        Path::new(DEFAULT_CONFIG_FILE),
        stdout,
        stderr,
    );
    logger.shutdown();
    status
}

fn process_name(argv0: Option<&OsString>) -> String {
    argv0
        .and_then(|argv0| Path::new(argv0).file_name())
        .map_or_else(
            || PROGRAM_NAME.to_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
}

fn execute<Out, Err>(
    logger: &Logger,
    name: &str,
    arguments: Vec<OsString>,
    default_config: &Path,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    Out: Write,
    Err: Write,
{
    let options = match prepare(logger, name, arguments, default_config, stdout, stderr) {
        Ok(options) => options,
        Err(status) => return status,
    };
    log_info!(logger, scopes::main::STARTED, "{name} started");

    if options.foreground {
        return foreground(logger, name);
    }
    detached(logger, name)
}

// Parses, resolves and applies the options. `Err` carries the status to exit
// with when the process should stop here.
fn prepare<Out, Err>(
    logger: &Logger,
    name: &str,
    arguments: Vec<OsString>,
    default_config: &Path,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<Options, i32>
where
    Out: Write,
    Err: Write,
{
    logger.configure(Priority::Debug, DestinationKind::Console, None);

    let command_line = match config::parse_args(name, arguments) {
        Ok(Invocation::Run(command_line)) => command_line,
        Ok(Invocation::Help(text) | Invocation::Version(text)) => {
            return Err(if stdout.write_all(text.as_bytes()).is_ok() {
                0
            } else {
                1
            });
        }
        Err(error) => {
            let _ = write!(stderr, "{}", error.render());
            return Err(1);
        }
    };

    let resolution = command_line.resolve(default_config);
    for problem in &resolution.problems {
        log_error!(logger, problem_site(problem), "{problem}");
    }

    let options = resolution.options;
    logger.configure(
        options.level,
        options.destination(),
        options.log_file.as_deref(),
    );
    if options.trace {
        logger.trace_on();
    }
    log_debug!(
        logger,
        scopes::config::RESOLVED,
        "level {}, destination {}, tracing {}",
        options.level,
        options.destination(),
        if options.trace { "on" } else { "off" }
    );
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "toggled::config",
        "configuration file {}",
        options
            .config_file
            .as_deref()
            .map_or_else(|| "none".into(), Path::to_string_lossy)
    );
    Ok(options)
}

const fn problem_site(problem: &ConfigError) -> SiteId {
    match problem {
        ConfigError::Missing { .. } => scopes::config::MISSING_FILE,
        ConfigError::Unreadable { .. } => scopes::config::UNREADABLE_FILE,
        ConfigError::BadOption { .. } => scopes::config::BAD_OPTION,
    }
}

#[cfg(unix)]
fn foreground(logger: &Logger, name: &str) -> i32 {
    if let Err(source) = signals::trap_signals(true) {
        let error = DaemonError::Signals { source };
        log_error!(logger, scopes::main::SIGNALS_FAILED, "{error}");
        return error.exit_status();
    }
    idle(logger, name)
}

#[cfg(not(unix))]
fn foreground(logger: &Logger, name: &str) -> i32 {
    idle(logger, name)
}

// The forked child goes by `daemonize::CHILD_NAME` rather than `name`.
#[cfg(unix)]
fn detached(logger: &Logger, _name: &str) -> i32 {
    match daemonize::daemonize(logger) {
        Ok(daemonize::Detached::Parent(child)) => {
            log_info!(logger, scopes::main::DAEMON_PID, "daemon process: {child}");
            0
        }
        Ok(daemonize::Detached::Child) => idle(logger, daemonize::CHILD_NAME),
        Err(error) => {
            if let Some(site) = failure_site(&error) {
                log_error!(logger, site, "{error}");
            }
            error.exit_status()
        }
    }
}

// Without fork(2) the daemon keeps running attached.
#[cfg(not(unix))]
fn detached(logger: &Logger, name: &str) -> i32 {
    idle(logger, name)
}

#[cfg(unix)]
const fn failure_site(error: &DaemonError) -> Option<SiteId> {
    match error {
        DaemonError::Logging(_) => None,
        DaemonError::Syscall { step, .. } => Some(match step {
            Step::Fork => scopes::main::FORK_FAILED,
            Step::Setsid => scopes::main::SETSID_FAILED,
            Step::Chdir => scopes::main::CHDIR_FAILED,
        }),
        DaemonError::Signals { .. } => Some(scopes::main::SIGNALS_FAILED),
    }
}

fn idle(logger: &Logger, name: &str) -> i32 {
    #[cfg(unix)]
    let stop: &dyn Fn() -> bool = &signals::termination_requested;
    #[cfg(not(unix))]
    let stop: &dyn Fn() -> bool = &|| false;
    idle_until(logger, name, stop)
}

fn idle_until(logger: &Logger, name: &str, stop: &dyn Fn() -> bool) -> i32 {
    background::run(logger, background::INTERVAL, stop);
    log_info!(logger, scopes::main::STOPPED, "{name} stopped");
    0
}
