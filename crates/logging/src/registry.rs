//! crates/logging/src/registry.rs
//! Scope registry and per-scope site tables.

use std::sync::atomic::{AtomicU8, Ordering};

use logging_sink::Priority;

use crate::error::LoggingError;
use crate::scope::{ScopeId, ScopeSpec, SiteId, logging_scope};

const ACTIVE: u8 = 0;
const SUPPRESSED: u8 = 1;

/// Runtime state of one scope: its level and one suppression flag per site.
#[derive(Debug)]
pub struct ScopeState {
    id: ScopeId,
    name: &'static str,
    level: AtomicU8,
    sites: Box<[AtomicU8]>,
}

impl ScopeState {
    fn allocate(spec: &ScopeSpec) -> Result<Self, LoggingError> {
        let count = usize::from(spec.sites());
        let mut sites = Vec::new();
        sites
            .try_reserve_exact(count)
            .map_err(|_| LoggingError::SiteTableAllocation {
                scope: spec.name(),
                sites: spec.sites(),
            })?;
        sites.extend((0..count).map(|_| AtomicU8::new(ACTIVE)));

        Ok(Self {
            id: spec.id(),
            name: spec.name(),
            level: AtomicU8::new(Priority::Debug.as_u8()),
            sites: sites.into_boxed_slice(),
        })
    }

    /// Returns the scope id.
    pub const fn id(&self) -> ScopeId {
        self.id
    }

    /// Returns the scope name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of sites in the scope.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Reports whether the scope has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Returns the minimum priority currently admitted by the scope.
    pub fn level(&self) -> Priority {
        Priority::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub(crate) fn raw_level(&self) -> u8 {
        self.level.load(Ordering::Relaxed)
    }

    pub(crate) fn set_level(&self, level: Priority) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Raw flag for a site, or `None` when `index` is out of range.
    pub(crate) fn site_flag(&self, index: u16) -> Option<u8> {
        self.sites
            .get(usize::from(index))
            .map(|flag| flag.load(Ordering::Relaxed))
    }

    fn store_flag(&self, index: u16, value: u8) -> bool {
        self.sites.get(usize::from(index)).is_some_and(|flag| {
            flag.store(value, Ordering::Relaxed);
            true
        })
    }
}

/// The fixed table of scopes a logger was built with.
///
/// Slot 0 always holds the logger's own `logging` scope; the caller's scopes
/// follow in id order. Nothing is added or removed after construction.
#[derive(Debug)]
pub struct Registry {
    scopes: Box<[ScopeState]>,
}

impl Registry {
    /// Allocates a site table for the logging scope and for every spec in `specs`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::ScopeTableMismatch`] when a spec's id does not
    /// match its position, and [`LoggingError::SiteTableAllocation`] when a
    /// site array cannot be allocated.
    pub fn new(specs: &[ScopeSpec]) -> Result<Self, LoggingError> {
        let mut scopes = Vec::with_capacity(specs.len() + 1);
        for (expected, spec) in std::iter::once(&logging_scope::SPEC)
            .chain(specs)
            .enumerate()
        {
            if spec.id().index() != expected {
                return Err(LoggingError::ScopeTableMismatch {
                    name: spec.name(),
                    expected,
                    found: spec.id(),
                });
            }
            scopes.push(ScopeState::allocate(spec)?);
        }
        Ok(Self {
            scopes: scopes.into_boxed_slice(),
        })
    }

    /// Looks a scope up by id.
    pub fn scope(&self, id: ScopeId) -> Option<&ScopeState> {
        self.scopes.get(id.index())
    }

    /// Looks a scope up by name.
    pub fn scope_by_name(&self, name: &str) -> Option<&ScopeState> {
        self.scopes.iter().find(|scope| scope.name == name)
    }

    /// Iterates over every scope, the logging scope first.
    pub fn iter(&self) -> impl Iterator<Item = &ScopeState> {
        self.scopes.iter()
    }

    /// Returns the number of scopes, including the logging scope.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always false, since the logging scope is always present.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Silences one site. Returns `false` if the site does not exist.
    pub fn suppress(&self, site: SiteId) -> bool {
        self.scope(site.scope())
            .is_some_and(|scope| scope.store_flag(site.index(), SUPPRESSED))
    }

    /// Re-enables one site. Returns `false` if the site does not exist.
    pub fn activate(&self, site: SiteId) -> bool {
        self.scope(site.scope())
            .is_some_and(|scope| scope.store_flag(site.index(), ACTIVE))
    }

    /// Reports whether a site is suppressed. Unknown sites count as suppressed.
    pub fn is_suppressed(&self, site: SiteId) -> bool {
        self.scope(site.scope())
            .and_then(|scope| scope.site_flag(site.index()))
            .is_none_or(|flag| flag != ACTIVE)
    }

    /// Sets a scope's level. Returns `false` if the scope does not exist.
    pub fn set_scope_level(&self, id: ScopeId, level: Priority) -> bool {
        self.scope(id).is_some_and(|scope| {
            scope.set_level(level);
            true
        })
    }

    /// Returns a scope's level, or `None` for an unknown scope.
    pub fn scope_level(&self, id: ScopeId) -> Option<Priority> {
        self.scope(id).map(ScopeState::level)
    }
}
