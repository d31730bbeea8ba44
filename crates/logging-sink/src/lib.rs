#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` owns the output side of the toggled logger: the
//! [`Priority`] scale shared with syslog(3), the four [`DestinationKind`]s a
//! process can log to, and the [`Dispatcher`] that holds the single active
//! [`Destination`] and its resource.
//!
//! # Design
//!
//! [`Destination`] is a tagged enum whose variants own their resource (an
//! open [`SyslogConnection`](syslog::SyslogConnection) or a line-buffered log
//! file). Dropping a destination releases the resource, so switching is just
//! a matter of replacing the value held by the [`Dispatcher`].
//!
//! # Invariants
//!
//! - At most one destination is active per dispatcher.
//! - Messages are written whole, one per line for the file and console
//!   destinations. Syslog adds its own framing.
//! - Teardown and write failures never surface past this crate.
//!
//! # Errors
//!
//! Bringing up a file destination can fail with [`DestinationError`]. The
//! logger turns that into a console fallback.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{DestinationKind, Dispatcher, Priority};
//!
//! let mut dispatcher = Dispatcher::with_console("demo", Vec::new());
//! let discard = dispatcher.open(DestinationKind::Discard, None)?;
//! dispatcher.install(discard);
//! dispatcher.write(Priority::Info, "goes nowhere");
//! # Ok::<(), logging_sink::DestinationError>(())
//! ```

mod destination;
mod dispatcher;
mod error;
mod priority;

#[cfg(unix)]
pub mod syslog;

pub use destination::{Destination, DestinationKind};
pub use dispatcher::Dispatcher;
pub use error::{DestinationError, ParseDestinationError, ParsePriorityError};
pub use priority::Priority;
