#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the filtering half of the toggled logger. A process declares
//! its scopes and their call sites once with [`define_scopes!`]; every logging
//! statement then names its [`SiteId`] and is admitted only when the global
//! level, its scope's level and its own suppression flag all allow it.
//! Admitted messages are rendered into a bounded buffer and written through
//! the single active destination provided by [`logging_sink`].
//!
//! # Design
//!
//! - [`Logger`] is an explicit context object. Filtering reads atomics only;
//!   the dispatcher is guarded by a mutex.
//! - The [`Registry`] is fixed at construction. Slot 0 holds the logger's own
//!   [`logging_scope`].
//! - Call tracing is opt-in per function through [`trace_call!`] and is
//!   gated only by [`Logger::trace_on`].
//! - With the `tracing` feature, [`LoggerLayer`] forwards events from the
//!   `tracing` ecosystem into the same logger.
//!
//! # Invariants
//!
//! - A site index outside its scope is never enabled.
//! - Reconfiguring to the active destination kind never reopens it.
//! - Call depth never drops below one.
//!
//! # Errors
//!
//! Construction fails with [`LoggingError`]; nothing else in the crate
//! reports errors. Output failures are swallowed.
//!
//! # Examples
//!
//! ```
//! mod scopes {
//!     logging::define_scopes! {
//!         pub mod worker("worker") { STARTED, FAILED }
//!     }
//! }
//!
//! use logging::{DestinationKind, Logger, Priority, log_error, log_info};
//!
//! let logger = Logger::with_console("demo", scopes::SCOPES, Vec::new())?;
//! logger.configure(Priority::Info, DestinationKind::Console, None);
//! log_info!(logger, scopes::worker::STARTED, "worker {} up", 3);
//! logger.suppress(scopes::worker::FAILED);
//! log_error!(logger, scopes::worker::FAILED, "not written");
//! logger.shutdown();
//! # Ok::<(), logging::LoggingError>(())
//! ```

mod error;
mod filter;
mod format;
mod global;
mod logger;
mod macros;
mod registry;
mod scope;
mod symbols;
mod tracer;

#[cfg(feature = "tracing")]
pub mod tracing_bridge;

pub use error::LoggingError;
pub use format::{LOCATION_SLACK, MESSAGE_CAPACITY, MessageBuffer, render, render_with_location};
pub use global::{global, init, install};
pub use logger::Logger;
pub use registry::{Registry, ScopeState};
pub use scope::{ScopeId, ScopeSpec, SiteId, logging_scope};
pub use tracer::{MAX_INDENT, TraceGuard, UNTRACED};

pub use logging_sink::{
    DestinationError, DestinationKind, ParseDestinationError, ParsePriorityError, Priority,
};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing};
