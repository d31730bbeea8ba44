//! crates/logging/src/scope.rs
//! Scope and call-site identifiers, and the table macro that assigns them.

use std::fmt;

/// Build-time identifier of a logging scope.
///
/// Id `0` is reserved for the logger's own [`logging_scope`](crate::logging_scope);
/// scopes declared with [`define_scopes!`](crate::define_scopes) are numbered
/// from `1` in declaration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ScopeId(u16);

impl ScopeId {
    /// The scope used by the logger for its own diagnostics.
    pub const LOGGING: Self = Self(0);

    /// Wraps a raw scope number.
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the position of the scope in the registry.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one logging statement: its scope plus its index in that scope.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SiteId {
    scope: ScopeId,
    index: u16,
}

impl SiteId {
    /// Creates a site identifier.
    pub const fn new(scope: ScopeId, index: u16) -> Self {
        Self { scope, index }
    }

    /// Returns the scope the site belongs to.
    pub const fn scope(self) -> ScopeId {
        self.scope
    }

    /// Returns the index of the site within its scope.
    pub const fn index(self) -> u16 {
        self.index
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.index)
    }
}

/// Registration record for one scope: its id, name and number of call sites.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScopeSpec {
    id: ScopeId,
    name: &'static str,
    sites: u16,
}

impl ScopeSpec {
    /// Creates a registration record.
    pub const fn new(id: ScopeId, name: &'static str, sites: u16) -> Self {
        Self { id, name, sites }
    }

    /// Returns the scope id.
    pub const fn id(&self) -> ScopeId {
        self.id
    }

    /// Returns the human-readable name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns how many call sites the scope contains.
    pub const fn sites(&self) -> u16 {
        self.sites
    }
}

/// The logger's own scope.
pub mod logging_scope {
    use super::{ScopeId, ScopeSpec, SiteId};

    /// Identifier of the scope.
    pub const SCOPE: ScopeId = ScopeId::LOGGING;
    /// `"<scope> scope has <N> log statements"`, emitted once per scope at start.
    pub const SCOPE_SIZE: SiteId = SiteId::new(SCOPE, 0);
    /// The notice written when a destination cannot be brought up.
    pub const DESTINATION_FALLBACK: SiteId = SiteId::new(SCOPE, 1);
    /// Registration record of the scope.
    pub const SPEC: ScopeSpec = ScopeSpec::new(SCOPE, "logging", 2);
}

/// Declares the process's scopes and their call sites.
///
/// Each `mod name("label") { SITE, ... }` entry becomes a module holding
/// `SCOPE`, `SPEC` and one [`SiteId`] constant per listed site. Sites are
/// numbered from zero in the order they are listed; scopes are numbered from
/// one. A `SCOPES` table listing every `SPEC` is emitted alongside, ready to
/// hand to [`Logger::new`](crate::Logger::new).
///
/// # Examples
///
/// ```
/// mod scopes {
///     logging::define_scopes! {
///         pub mod config("config") {
///             MISSING_FILE,
///             BAD_OPTION,
///         }
///         pub mod idle("idle") {}
///     }
/// }
///
/// assert_eq!(scopes::config::BAD_OPTION.index(), 1);
/// assert_eq!(scopes::config::SCOPE.index(), 1);
/// assert_eq!(scopes::idle::SPEC.sites(), 0);
/// assert_eq!(scopes::SCOPES.len(), 2);
/// ```
#[macro_export]
macro_rules! define_scopes {
    (
        $(
            $(#[$scope_meta:meta])*
            $vis:vis mod $scope:ident ($name:literal) {
                $( $(#[$site_meta:meta])* $site:ident ),* $(,)?
            }
        )*
    ) => {
        #[allow(non_camel_case_types, dead_code)]
        #[repr(u16)]
        enum __ScopeIndex {
            __Logging = 0,
            $( $scope, )*
        }

        $(
            $(#[$scope_meta])*
            #[allow(dead_code, missing_docs)]
            $vis mod $scope {
                #[allow(non_camel_case_types, dead_code, clippy::upper_case_acronyms)]
                #[repr(u16)]
                enum Sites {
                    $( $site, )*
                    __Count,
                }

                /// Identifier of this scope.
                pub const SCOPE: $crate::ScopeId =
                    $crate::ScopeId::new(super::__ScopeIndex::$scope as u16);

                /// Registration record of this scope.
                pub const SPEC: $crate::ScopeSpec =
                    $crate::ScopeSpec::new(SCOPE, $name, Sites::__Count as u16);

                $(
                    $(#[$site_meta])*
                    pub const $site: $crate::SiteId =
                        $crate::SiteId::new(SCOPE, Sites::$site as u16);
                )*
            }
        )*

        /// Every declared scope, in id order.
        pub const SCOPES: &[$crate::ScopeSpec] = &[ $( $scope::SPEC, )* ];
    };
}

#[cfg(test)]
mod tests {
    mod declared {
        crate::define_scopes! {
            pub mod alpha("alpha") {
                FIRST,
                SECOND,
                THIRD,
            }
            pub mod empty("empty") {}
            pub mod beta("beta") {
                ONLY
            }
        }
    }

    use super::*;

    #[test]
    fn scopes_are_numbered_from_one() {
        assert_eq!(declared::alpha::SCOPE, ScopeId::new(1));
        assert_eq!(declared::empty::SCOPE, ScopeId::new(2));
        assert_eq!(declared::beta::SCOPE, ScopeId::new(3));
    }

    #[test]
    fn sites_are_numbered_densely_from_zero() {
        assert_eq!(declared::alpha::FIRST.index(), 0);
        assert_eq!(declared::alpha::SECOND.index(), 1);
        assert_eq!(declared::alpha::THIRD.index(), 2);
        assert_eq!(declared::alpha::SPEC.sites(), 3);
        assert_eq!(declared::beta::ONLY, SiteId::new(ScopeId::new(3), 0));
    }

    #[test]
    fn empty_scope_has_no_sites() {
        assert_eq!(declared::empty::SPEC.sites(), 0);
        assert_eq!(declared::empty::SPEC.name(), "empty");
    }

    #[test]
    fn table_lists_specs_in_id_order() {
        let names: Vec<_> = declared::SCOPES.iter().map(ScopeSpec::name).collect();
        assert_eq!(names, ["alpha", "empty", "beta"]);
        for (position, spec) in declared::SCOPES.iter().enumerate() {
            assert_eq!(spec.id().index(), position + 1);
        }
    }

    #[test]
    fn logging_scope_is_reserved() {
        assert_eq!(logging_scope::SPEC.id(), ScopeId::LOGGING);
        assert_eq!(logging_scope::SCOPE_SIZE.index(), 0);
        assert_eq!(logging_scope::DESTINATION_FALLBACK.index(), 1);
    }

    #[test]
    fn display_formats() {
        assert_eq!(declared::alpha::SECOND.to_string(), "#1:1");
    }
}
