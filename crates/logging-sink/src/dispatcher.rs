//! crates/logging-sink/src/dispatcher.rs
//! Owner of the single active destination.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use crate::destination::{Destination, DestinationKind};
use crate::error::DestinationError;
use crate::Priority;

/// Holds the one destination that is active process-wide.
///
/// A freshly created dispatcher, and one that has been [shut down](Self::shutdown),
/// is *undefined*: [`kind`](Self::kind) returns `None`, yet writes still reach
/// the console stream so diagnostics emitted before configuration are not
/// lost.
///
/// Switching is a two-step exchange so the caller can report a failed
/// bring-up through the old destination: [`Destination::open`] the
/// replacement first, then [`install`](Self::install) it, which releases the
/// previous resource.
///
/// # Examples
///
/// ```
/// use logging_sink::{Destination, DestinationKind, Dispatcher, Priority};
///
/// let mut dispatcher = Dispatcher::with_console("demo", Vec::new());
/// assert_eq!(dispatcher.kind(), None);
///
/// let console = Destination::open(DestinationKind::Console, dispatcher.ident(), None)?;
/// dispatcher.install(console);
/// dispatcher.write(Priority::Info, "ready");
/// assert_eq!(dispatcher.kind(), Some(DestinationKind::Console));
///
/// dispatcher.shutdown();
/// assert_eq!(dispatcher.kind(), None);
/// # Ok::<(), logging_sink::DestinationError>(())
/// ```
pub struct Dispatcher {
    ident: String,
    active: Option<Destination>,
    console: Box<dyn Write + Send>,
    resources_opened: u64,
}

impl Dispatcher {
    /// Creates an undefined dispatcher whose console stream is standard error.
    pub fn new(ident: impl Into<String>) -> Self {
        Self::with_console(ident, io::stderr())
    }

    /// Creates an undefined dispatcher writing console output to `console`.
    pub fn with_console<W>(ident: impl Into<String>, console: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            ident: ident.into(),
            active: None,
            console: Box::new(console),
            resources_opened: 0,
        }
    }

    /// Returns the tag used for syslog connections.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Returns the active kind, or `None` while undefined.
    pub fn kind(&self) -> Option<DestinationKind> {
        self.active.as_ref().map(Destination::kind)
    }

    /// Reports whether a destination has been installed and not shut down.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Counts how many syslog connections and files have been brought up.
    pub const fn resources_opened(&self) -> u64 {
        self.resources_opened
    }

    /// Opens a destination of `kind` tagged with this dispatcher's ident.
    pub fn open(
        &self,
        kind: DestinationKind,
        path: Option<&Path>,
    ) -> Result<Destination, DestinationError> {
        Destination::open(kind, &self.ident, path)
    }

    /// Replaces the active destination, tearing the previous one down first.
    pub fn install(&mut self, destination: Destination) {
        self.teardown();
        if destination.owns_resource() {
            self.resources_opened += 1;
        }
        self.active = Some(destination);
    }

    /// Tears down the active destination and returns to the undefined state.
    ///
    /// Calling this again is a no-op.
    pub fn shutdown(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(mut previous) = self.active.take() {
            let _ = previous.flush(self.console.as_mut());
        }
    }

    /// Writes one rendered message to the active destination.
    ///
    /// While undefined the message goes to the console stream. Write errors
    /// are ignored.
    pub fn write(&mut self, priority: Priority, message: &str) {
        let console = self.console.as_mut();
        let _ = match self.active.as_mut() {
            Some(destination) => destination.write(priority, message, console),
            None => writeln!(console, "{message}"),
        };
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("ident", &self.ident)
            .field("active", &self.active)
            .field("resources_opened", &self.resources_opened)
            .finish_non_exhaustive()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.teardown();
    }
}
