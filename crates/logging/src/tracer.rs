//! crates/logging/src/tracer.rs
//! Function entry/exit tracing with call-depth indentation.

use std::borrow::Cow;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(unix)]
use std::sync::OnceLock;

use crate::Logger;
use crate::symbols::{SymbolTable, hex_name};

#[cfg(unix)]
use crate::symbols::DynamicSymbols;

/// Longest indentation a trace line carries.
pub const MAX_INDENT: usize = 90;

const LEADER: &str = "..........................................................................................";

/// Name shown for the caller of the outermost traced function.
pub const UNTRACED: &str = "(untraced)";

thread_local! {
    static FRAMES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug)]
pub(crate) struct Tracer {
    enabled: AtomicBool,
    depth: AtomicUsize,
    symbols: SymbolTable,
    #[cfg(unix)]
    dynamic: OnceLock<Option<DynamicSymbols>>,
}

impl Tracer {
    pub(crate) fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            depth: AtomicUsize::new(1),
            symbols: SymbolTable::default(),
            #[cfg(unix)]
            dynamic: OnceLock::new(),
        }
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    pub(crate) fn register(&self, addr: usize, name: &'static str) {
        self.symbols.register(addr, name);
    }

    /// Records entry into `callee`. Returns the line to emit when `emit` holds.
    pub(crate) fn enter(&self, callee: usize, emit: bool) -> Option<String> {
        let caller = FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            let caller = frames.last().copied();
            frames.push(callee);
            caller
        });
        let depth = self.depth.fetch_add(1, Ordering::Relaxed);
        emit.then(|| {
            format!(
                "{} {}() called {}()",
                indent(depth),
                self.caller_name(caller),
                self.resolve(callee)
            )
        })
    }

    /// Records return from `callee`. Returns the line to emit when `emit` holds.
    pub(crate) fn exit(&self, callee: usize, emit: bool) -> Option<String> {
        let caller = FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            if let Some(position) = frames.iter().rposition(|&frame| frame == callee) {
                frames.truncate(position);
            }
            frames.last().copied()
        });
        let previous = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |depth| {
                Some(depth.saturating_sub(1).max(1))
            })
            .unwrap_or(1);
        let depth = previous.saturating_sub(1).max(1);
        emit.then(|| {
            format!(
                "{} {}() returned to {}()",
                indent(depth),
                self.resolve(callee),
                self.caller_name(caller)
            )
        })
    }

    fn caller_name(&self, caller: Option<usize>) -> Cow<'static, str> {
        caller.map_or(Cow::Borrowed(UNTRACED), |addr| self.resolve(addr))
    }

    /// Resolves an address: registered names, then the dynamic symbol table,
    /// then the hex address.
    pub(crate) fn resolve(&self, addr: usize) -> Cow<'static, str> {
        if let Some(name) = self.symbols.lookup(addr) {
            return Cow::Borrowed(name);
        }
        #[cfg(unix)]
        if let Some(name) = self
            .dynamic
            .get_or_init(DynamicSymbols::open)
            .as_ref()
            .and_then(|symbols| symbols.lookup(addr))
        {
            return Cow::Owned(name);
        }
        Cow::Owned(hex_name(addr))
    }
}

fn indent(depth: usize) -> &'static str {
    &LEADER[..depth.min(MAX_INDENT)]
}

/// Fires the exit hook for a traced function when dropped.
///
/// Returned by [`Logger::trace_call`]; bind it to a named local so it lives
/// until the function returns.
#[must_use = "the exit hook fires when the guard is dropped"]
#[derive(Debug)]
pub struct TraceGuard<'a> {
    logger: &'a Logger,
    addr: usize,
}

impl<'a> TraceGuard<'a> {
    pub(crate) const fn new(logger: &'a Logger, addr: usize) -> Self {
        Self { logger, addr }
    }
}

impl Drop for TraceGuard<'_> {
    fn drop(&mut self) {
        self.logger.trace_exit(self.addr);
    }
}
