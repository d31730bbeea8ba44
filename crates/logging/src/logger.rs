//! crates/logging/src/logger.rs
//! The logger context: level, registry, dispatcher and tracer together.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging_sink::{Destination, DestinationKind, Dispatcher, Priority};

use crate::error::LoggingError;
use crate::filter;
use crate::format::{render, render_with_location};
use crate::registry::Registry;
use crate::scope::{ScopeId, ScopeSpec, SiteId, logging_scope};
use crate::tracer::{TraceGuard, Tracer};

/// A process's logger.
///
/// Levels and suppression flags are atomics, so filtering never locks. The
/// dispatcher sits behind a mutex that serialises writes, reconfiguration and
/// shutdown.
///
/// # Examples
///
/// ```
/// use logging::{DestinationKind, Logger, Priority, ScopeId, ScopeSpec, SiteId};
///
/// const NET: ScopeSpec = ScopeSpec::new(ScopeId::new(1), "net", 1);
/// const CONNECTED: SiteId = SiteId::new(NET.id(), 0);
///
/// let logger = Logger::new("demo", &[NET])?;
/// logger.configure(Priority::Warning, DestinationKind::Discard, None);
/// assert!(logger.enabled(Priority::Error, CONNECTED));
/// assert!(!logger.enabled(Priority::Info, CONNECTED));
/// # Ok::<(), logging::LoggingError>(())
/// ```
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: AtomicU8,
    registry: Registry,
    dispatcher: Mutex<Dispatcher>,
    tracer: Tracer,
}

impl Logger {
    /// Creates a logger for the process `name` with the given scope table.
    ///
    /// Output goes to standard error until [`configure`](Self::configure)
    /// runs. One Debug record per scope announces its size.
    ///
    /// # Errors
    ///
    /// Fails when the scope table is malformed or a site array cannot be
    /// allocated; see [`LoggingError`].
    pub fn new(name: impl Into<String>, scopes: &[ScopeSpec]) -> Result<Self, LoggingError> {
        let name = name.into();
        let dispatcher = Dispatcher::new(name.clone());
        Self::build(name, scopes, dispatcher)
    }

    /// Like [`new`](Self::new), with console output sent to `console`.
    ///
    /// # Errors
    ///
    /// As for [`new`](Self::new).
    pub fn with_console<W>(
        name: impl Into<String>,
        scopes: &[ScopeSpec],
        console: W,
    ) -> Result<Self, LoggingError>
    where
        W: Write + Send + 'static,
    {
        let name = name.into();
        let dispatcher = Dispatcher::with_console(name.clone(), console);
        Self::build(name, scopes, dispatcher)
    }

    fn build(
        name: String,
        scopes: &[ScopeSpec],
        dispatcher: Dispatcher,
    ) -> Result<Self, LoggingError> {
        let logger = Self {
            name,
            level: AtomicU8::new(Priority::Debug.as_u8()),
            registry: Registry::new(scopes)?,
            dispatcher: Mutex::new(dispatcher),
            tracer: Tracer::new(),
        };
        for scope in logger.registry.iter() {
            crate::log_debug!(
                logger,
                logging_scope::SCOPE_SIZE,
                "{} scope has {} log statements",
                scope.name(),
                scope.len()
            );
        }
        Ok(logger)
    }

    fn dispatcher(&self) -> MutexGuard<'_, Dispatcher> {
        self.dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the process name the logger was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the global level.
    pub fn level(&self) -> Priority {
        Priority::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Sets the global level without touching the destination.
    pub fn set_level(&self, level: Priority) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Returns the scope registry.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reports whether a message of `priority` at `site` would be written.
    #[inline]
    pub fn enabled(&self, priority: Priority, site: SiteId) -> bool {
        filter::evaluate(
            self.level.load(Ordering::Relaxed),
            priority,
            self.registry.scope(site.scope()),
            site.index(),
        )
    }

    /// Sets the global level and switches to a destination of `kind`.
    ///
    /// Asking for the kind already active only updates the level. A
    /// destination that cannot be brought up (including a file with no
    /// `path`) is reported at Error through the destination still in place,
    /// subject to the new level, and the console is installed instead.
    ///
    /// Returns the kind actually active afterwards.
    pub fn configure(
        &self,
        level: Priority,
        kind: DestinationKind,
        path: Option<&Path>,
    ) -> DestinationKind {
        self.set_level(level);

        let mut dispatcher = self.dispatcher();
        if dispatcher.kind() == Some(kind) {
            return kind;
        }

        match dispatcher.open(kind, path) {
            Ok(destination) => {
                dispatcher.install(destination);
                kind
            }
            Err(error) => {
                if self.enabled(Priority::Error, logging_scope::DESTINATION_FALLBACK) {
                    let notice = render_with_location(format_args!("{error}"), file!(), line!());
                    dispatcher.write(Priority::Error, notice.as_str());
                }
                dispatcher.install(Destination::Console);
                DestinationKind::Console
            }
        }
    }

    /// Tears the active destination down. Calling it twice is harmless.
    pub fn shutdown(&self) {
        self.dispatcher().shutdown();
    }

    /// Returns the active destination kind, or `None` while undefined.
    pub fn destination(&self) -> Option<DestinationKind> {
        self.dispatcher().kind()
    }

    /// Counts syslog connections and files opened so far.
    pub fn resources_opened(&self) -> u64 {
        self.dispatcher().resources_opened()
    }

    /// Renders and writes a message without consulting the filter.
    pub fn emit(&self, priority: Priority, args: fmt::Arguments<'_>) {
        let message = render(args);
        self.dispatcher().write(priority, message.as_str());
    }

    /// Like [`emit`](Self::emit), appending the source location when it fits.
    pub fn emit_with_location(
        &self,
        priority: Priority,
        args: fmt::Arguments<'_>,
        file: &str,
        line: u32,
    ) {
        let message = render_with_location(args, file, line);
        self.dispatcher().write(priority, message.as_str());
    }

    /// Writes a message if the filter admits it.
    pub fn log(&self, priority: Priority, site: SiteId, args: fmt::Arguments<'_>) {
        if self.enabled(priority, site) {
            self.emit(priority, args);
        }
    }

    /// Writes a message with its source location if the filter admits it.
    pub fn log_with_location(
        &self,
        priority: Priority,
        site: SiteId,
        args: fmt::Arguments<'_>,
        file: &str,
        line: u32,
    ) {
        if self.enabled(priority, site) {
            self.emit_with_location(priority, args, file, line);
        }
    }

    /// Silences one call site.
    pub fn suppress(&self, site: SiteId) -> bool {
        self.registry.suppress(site)
    }

    /// Re-enables a silenced call site.
    pub fn activate(&self, site: SiteId) -> bool {
        self.registry.activate(site)
    }

    /// Reports whether a call site is silenced.
    pub fn is_suppressed(&self, site: SiteId) -> bool {
        self.registry.is_suppressed(site)
    }

    /// Sets the level of one scope.
    pub fn set_scope_level(&self, scope: ScopeId, level: Priority) -> bool {
        self.registry.set_scope_level(scope, level)
    }

    /// Returns the level of one scope.
    pub fn scope_level(&self, scope: ScopeId) -> Option<Priority> {
        self.registry.scope_level(scope)
    }

    /// Turns call tracing on.
    pub fn trace_on(&self) {
        self.tracer.set_enabled(true);
    }

    /// Turns call tracing off.
    pub fn trace_off(&self) {
        self.tracer.set_enabled(false);
    }

    /// Reports whether call tracing is on.
    pub fn tracing_enabled(&self) -> bool {
        self.tracer.is_enabled()
    }

    /// Returns the current call depth, never less than one.
    pub fn call_depth(&self) -> usize {
        self.tracer.depth()
    }

    /// Registers a display name for a function address.
    pub fn register_symbol(&self, addr: usize, name: &'static str) {
        self.tracer.register(addr, name);
    }

    /// Entry hook: records a call into the function at `addr`.
    pub fn trace_enter(&self, addr: usize) {
        if !self.tracer.is_enabled() {
            let _ = self.tracer.enter(addr, false);
            return;
        }
        let mut dispatcher = self.dispatcher();
        if let Some(line) = self.tracer.enter(addr, dispatcher.is_active()) {
            dispatcher.write(Priority::Debug, render(format_args!("{line}")).as_str());
        }
    }

    /// Exit hook: records a return from the function at `addr`.
    pub fn trace_exit(&self, addr: usize) {
        if !self.tracer.is_enabled() {
            let _ = self.tracer.exit(addr, false);
            return;
        }
        let mut dispatcher = self.dispatcher();
        if let Some(line) = self.tracer.exit(addr, dispatcher.is_active()) {
            dispatcher.write(Priority::Debug, render(format_args!("{line}")).as_str());
        }
    }

    /// Registers `name` for `addr`, fires the entry hook and returns a guard
    /// that fires the exit hook when dropped.
    ///
    /// Usually reached through [`trace_call!`](crate::trace_call).
    pub fn trace_call(&self, addr: usize, name: &'static str) -> TraceGuard<'_> {
        self.register_symbol(addr, name);
        self.trace_enter(addr);
        TraceGuard::new(self, addr)
    }
}
