//! crates/logging/src/filter.rs
//! The enablement decision for one logging call.

use logging_sink::Priority;

use crate::registry::ScopeState;

/// Decides whether a message passes every gate.
///
/// `site_flag` is `None` when the site index is outside its scope. The checks
/// run in a fixed order: global level, site range, scope level, suppression.
#[inline]
pub(crate) fn decide(
    global: u8,
    priority: Priority,
    scope_level: u8,
    site_flag: Option<u8>,
) -> bool {
    let priority = priority.as_u8();
    if global < priority {
        return false;
    }
    let Some(flag) = site_flag else {
        return false;
    };
    scope_level >= priority && flag == 0
}

/// Evaluates the filter against a scope looked up from the registry.
#[inline]
pub(crate) fn evaluate(
    global: u8,
    priority: Priority,
    scope: Option<&ScopeState>,
    index: u16,
) -> bool {
    scope.is_some_and(|scope| decide(global, priority, scope.raw_level(), scope.site_flag(index)))
}
