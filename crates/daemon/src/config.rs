//! crates/daemon/src/config.rs
//! Command line and configuration file resolution.
//!
//! The configuration file holds one option per line, named like the long
//! command-line option without its dashes:
//!
//! ```text
//! # /etc/toggled.conf
//! debug = notice
//! logfile = /var/log/toggled.log
//! foreground
//! ```
//!
//! Options given on the command line override the file.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use logging::{DestinationKind, Priority};

/// Name the command is registered under.
pub const PROGRAM_NAME: &str = "toggled";

/// Configuration file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/toggled.conf";

/// Fully resolved run-time options.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Stay attached to the terminal.
    pub foreground: bool,
    /// Global log level.
    pub level: Priority,
    /// Configuration file that was read, if any.
    pub config_file: Option<PathBuf>,
    /// File to log to.
    pub log_file: Option<PathBuf>,
    /// Enable call tracing.
    pub trace: bool,
}

impl Options {
    /// Picks the destination: a log file if one is set, else the console in
    /// the foreground, else syslog.
    #[must_use]
    pub const fn destination(&self) -> DestinationKind {
        if self.log_file.is_some() {
            DestinationKind::File
        } else if self.foreground {
            DestinationKind::Console
        } else {
            DestinationKind::Syslog
        }
    }
}

/// A problem found while reading configuration. None of them is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file named by `--config` does not exist.
    #[error("Cannot find config file \"{}\"", path.display())]
    Missing {
        /// The requested file.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("Cannot read config file \"{}\" ({source})", path.display())]
    Unreadable {
        /// The requested file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
    /// One line of the file was rejected.
    #[error("problem in config file \"{}\" with option \"{key}\" ({reason})", path.display())]
    BadOption {
        /// The file being read.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// The option as written.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    /// Print this help text and exit.
    Help(String),
    /// Print this version banner and exit.
    Version(String),
    /// Run with these command-line settings.
    Run(CommandLine),
}

/// Settings taken from the command line, before the file is merged in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandLine {
    /// `Some(true)` for `--foreground`, `Some(false)` for `--daemon`.
    pub foreground: Option<bool>,
    /// Value of `--debug`.
    pub level: Option<Priority>,
    /// Value of `--config`.
    pub config_file: Option<PathBuf>,
    /// Value of `--logfile`.
    pub log_file: Option<PathBuf>,
    /// Whether `--trace` was given.
    pub trace: bool,
}

/// Options after merging, plus whatever went wrong on the way.
#[derive(Debug, Default)]
pub struct Resolution {
    /// The merged options.
    pub options: Options,
    /// Problems to report. The options above already skip them.
    pub problems: Vec<ConfigError>,
}

fn clap_command(bin_name: &str) -> Command {
    Command::new(PROGRAM_NAME)
        .bin_name(bin_name.to_owned())
        .about("A daemon that logs, sleeps and yawns.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("foreground")
                .long("foreground")
                .short('f')
                .help("Run in the foreground.")
                .action(ArgAction::SetTrue)
                .overrides_with("daemon"),
        )
        .arg(
            Arg::new("daemon")
                .long("daemon")
                .help("Run as a daemon (default).")
                .action(ArgAction::SetTrue)
                .overrides_with("foreground"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .value_name("LEVEL")
                .help("Log level, 0-7 or a syslog severity name.")
                .value_parser(|value: &str| value.parse::<Priority>()),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Read configuration from FILE.")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("logfile")
                .long("logfile")
                .short('l')
                .value_name("FILE")
                .help("Send logging to FILE.")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .short('t')
                .help("Trace function calls.")
                .action(ArgAction::SetTrue),
        )
}

/// Parses the command line, `args[0]` included.
///
/// # Errors
///
/// Returns clap's diagnostic for unknown options and bad values.
pub fn parse_args<I, S>(bin_name: &str, arguments: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let mut command = clap_command(bin_name);
    let mut matches = command.try_get_matches_from_mut(arguments)?;

    if matches.get_flag("help") {
        return Ok(Invocation::Help(command.render_help().to_string()));
    }
    if matches.get_flag("version") {
        return Ok(Invocation::Version(format!(
            "{bin_name} {}\n",
            env!("CARGO_PKG_VERSION")
        )));
    }
    Ok(Invocation::Run(CommandLine::from_matches(&mut matches)))
}

fn given(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

impl CommandLine {
    fn from_matches(matches: &mut ArgMatches) -> Self {
        let foreground = if given(matches, "foreground") {
            Some(true)
        } else if given(matches, "daemon") {
            Some(false)
        } else {
            None
        };
        Self {
            foreground,
            level: matches.remove_one::<Priority>("debug"),
            config_file: matches.remove_one::<PathBuf>("config"),
            log_file: matches.remove_one::<PathBuf>("logfile"),
            trace: matches.get_flag("trace"),
        }
    }

    /// Merges the configuration file into these settings.
    ///
    /// The explicit `--config` file is read if given; otherwise
    /// `default_file` is tried and silently skipped when it is missing.
    #[must_use]
    pub fn resolve(&self, default_file: &Path) -> Resolution {
        let mut resolution = Resolution::default();

        let (path, explicit) = match &self.config_file {
            Some(path) => (path.as_path(), true),
            None => (default_file, false),
        };
        match fs::read_to_string(path) {
            Ok(text) => {
                resolution.options.config_file = Some(path.to_path_buf());
                apply_file(&mut resolution, path, &text);
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                if explicit {
                    resolution.problems.push(ConfigError::Missing {
                        path: path.to_path_buf(),
                    });
                }
            }
            Err(source) => resolution.problems.push(ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            }),
        }

        self.overlay(&mut resolution.options);
        resolution
    }

    fn overlay(&self, options: &mut Options) {
        if let Some(foreground) = self.foreground {
            options.foreground = foreground;
        }
        if let Some(level) = self.level {
            options.level = level;
        }
        if let Some(path) = &self.log_file {
            options.log_file = Some(path.clone());
        }
        if self.trace {
            options.trace = true;
        }
    }
}

fn apply_file(resolution: &mut Resolution, path: &Path, text: &str) {
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.split('#').next().unwrap_or_default().trim();
        if trimmed.is_empty() {
            continue;
        }

        let (key, value) = match trimmed.split_once(['=', ' ', '\t']) {
            Some((key, value)) => (key.trim(), Some(value.trim().trim_start_matches('=').trim())),
            None => (trimmed, None),
        };
        let value = value.filter(|value| !value.is_empty());

        if let Err(reason) = apply_option(&mut resolution.options, key, value) {
            resolution.problems.push(ConfigError::BadOption {
                path: path.to_path_buf(),
                line: index + 1,
                key: key.to_owned(),
                reason,
            });
        }
    }
}

fn apply_option(options: &mut Options, key: &str, value: Option<&str>) -> Result<(), String> {
    match key.to_ascii_lowercase().as_str() {
        "foreground" => options.foreground = parse_switch(value)?,
        "daemon" => options.foreground = !parse_switch(value)?,
        "trace" => options.trace = parse_switch(value)?,
        "debug" => {
            let value = value.ok_or("missing argument")?;
            options.level = value.parse::<Priority>().map_err(|error| error.to_string())?;
        }
        "logfile" => {
            let value = value.ok_or("missing argument")?;
            options.log_file = Some(PathBuf::from(value));
        }
        "config" => return Err("not allowed in a config file".to_owned()),
        _ => return Err("unknown option".to_owned()),
    }
    Ok(())
}

fn parse_switch(value: Option<&str>) -> Result<bool, String> {
    let Some(value) = value else {
        return Ok(true);
    };
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Ok(true),
        "no" | "false" | "off" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got \"{other}\"")),
    }
}
