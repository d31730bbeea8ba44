//! crates/logging-sink/src/destination.rs
//! Output destinations and the resources each one owns.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::Priority;
use crate::error::{DestinationError, ParseDestinationError};

#[cfg(unix)]
use crate::syslog::SyslogConnection;

/// The kinds of destination a logger can write to.
///
/// # Examples
///
/// ```
/// use logging_sink::DestinationKind;
///
/// assert_eq!("syslog".parse(), Ok(DestinationKind::Syslog));
/// assert_eq!(DestinationKind::Console.to_string(), "console");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DestinationKind {
    /// Messages are dropped.
    Discard,
    /// Messages go to syslog(3) at the local1 facility.
    Syslog,
    /// Messages are appended to a file, one per line.
    File,
    /// Messages go to standard error, one per line.
    Console,
}

impl DestinationKind {
    /// Returns the lowercase name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discard => "discard",
            Self::Syslog => "syslog",
            Self::File => "file",
            Self::Console => "console",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationKind {
    type Err = ParseDestinationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "discard" | "none" => Ok(Self::Discard),
            "syslog" => Ok(Self::Syslog),
            "file" => Ok(Self::File),
            "console" | "stderr" => Ok(Self::Console),
            _ => Err(ParseDestinationError::new(trimmed)),
        }
    }
}

/// A destination together with the resource it owns.
///
/// Dropping a destination releases its resource: the syslog connection is
/// closed and an open log file is flushed and closed.
pub enum Destination {
    /// Writes are no-ops.
    Discard,
    /// Writes are forwarded to syslog.
    #[cfg(unix)]
    Syslog(SyslogConnection),
    /// Writes are appended to an open file.
    File {
        /// Path the file was opened from.
        path: PathBuf,
        /// Line-buffered handle, so each message reaches the file whole.
        writer: LineWriter<File>,
    },
    /// Writes go to the dispatcher's console stream.
    Console,
}

impl Destination {
    /// Brings up a destination of the requested kind.
    ///
    /// `ident` tags syslog messages; `path` is consulted only for
    /// [`DestinationKind::File`].
    pub fn open(
        kind: DestinationKind,
        ident: &str,
        path: Option<&Path>,
    ) -> Result<Self, DestinationError> {
        match kind {
            DestinationKind::Discard => Ok(Self::Discard),
            DestinationKind::Console => Ok(Self::Console),
            DestinationKind::File => {
                let path = path.ok_or(DestinationError::MissingPath)?;
                Self::open_file(path)
            }
            #[cfg(unix)]
            DestinationKind::Syslog => Ok(Self::Syslog(SyslogConnection::open(ident))),
            #[cfg(not(unix))]
            DestinationKind::Syslog => {
                let _ = ident;
                Err(DestinationError::SyslogUnsupported)
            }
        }
    }

    fn open_file(path: &Path) -> Result<Self, DestinationError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| DestinationError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::File {
            path: path.to_path_buf(),
            writer: LineWriter::new(file),
        })
    }

    /// Returns the kind of this destination.
    pub const fn kind(&self) -> DestinationKind {
        match self {
            Self::Discard => DestinationKind::Discard,
            #[cfg(unix)]
            Self::Syslog(_) => DestinationKind::Syslog,
            Self::File { .. } => DestinationKind::File,
            Self::Console => DestinationKind::Console,
        }
    }

    /// Reports whether bringing this destination up acquired an OS resource.
    pub const fn owns_resource(&self) -> bool {
        matches!(self.kind(), DestinationKind::Syslog | DestinationKind::File)
    }

    /// Writes one message, terminating the line where the sink needs it.
    ///
    /// `console` receives the message for [`Destination::Console`]. Errors are
    /// returned for the caller to ignore; syslog failures are never reported.
    pub fn write(
        &mut self,
        priority: Priority,
        message: &str,
        console: &mut dyn Write,
    ) -> io::Result<()> {
        match self {
            Self::Discard => Ok(()),
            #[cfg(unix)]
            Self::Syslog(connection) => {
                connection.send(priority, message);
                Ok(())
            }
            Self::File { writer, .. } => writeln!(writer, "{message}"),
            Self::Console => writeln!(console, "{message}"),
        }
    }

    /// Flushes any buffered output.
    pub fn flush(&mut self, console: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::File { writer, .. } => writer.flush(),
            Self::Console => console.flush(),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discard => f.write_str("Discard"),
            #[cfg(unix)]
            Self::Syslog(connection) => f.debug_tuple("Syslog").field(connection).finish(),
            Self::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
            Self::Console => f.write_str("Console"),
        }
    }
}
