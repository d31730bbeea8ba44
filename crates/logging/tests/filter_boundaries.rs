//! Integration tests for the enablement decision.
//!
//! These tests drive the public macros and verify that a message is written
//! exactly when the global level, its scope's level and its site flag all
//! admit it.

use logging::{
    DestinationKind, Logger, Priority, ScopeId, ScopeSpec, SiteId, log, log_info, log_warning,
};
use test_support::SharedBuffer;

mod scopes {
    logging::define_scopes! {
        pub mod net("net") { CONNECT, SEND, RECV }
        pub mod disk("disk") { WRITE }
        pub mod idle("idle") {}
    }
}

fn console_logger() -> (Logger, SharedBuffer) {
    let console = SharedBuffer::new();
    let logger = Logger::with_console("filters", scopes::SCOPES, console.clone()).expect("logger");
    logger.configure(Priority::Debug, DestinationKind::Console, None);
    console.clear();
    (logger, console)
}

// ============================================================================
// Global Level Tests
// ============================================================================

/// Verifies every (threshold, priority) pair follows the syslog ordering.
#[test]
fn global_level_admits_equal_or_more_severe() {
    let (logger, _console) = console_logger();
    for threshold in Priority::ALL {
        logger.set_level(threshold);
        for priority in Priority::ALL {
            assert_eq!(
                logger.enabled(priority, scopes::net::CONNECT),
                threshold.as_u8() >= priority.as_u8(),
                "threshold {threshold} priority {priority}"
            );
        }
    }
}

/// Verifies a warning threshold passes Error but drops Info.
#[test]
fn warning_threshold_drops_info() {
    let (logger, console) = console_logger();
    logger.set_level(Priority::Warning);

    log!(logger, Priority::Error, scopes::net::SEND, "error passes");
    log_info!(logger, scopes::net::SEND, "info dropped");
    log_warning!(logger, scopes::net::SEND, "warning passes");

    assert_eq!(console.lines(), ["error passes", "warning passes"]);
}

// ============================================================================
// Scope Level Tests
// ============================================================================

/// Verifies a scope level only affects its own sites.
#[test]
fn scope_level_is_per_scope() {
    let (logger, console) = console_logger();
    assert!(logger.set_scope_level(scopes::net::SCOPE, Priority::Error));

    log_info!(logger, scopes::net::RECV, "net info");
    log_info!(logger, scopes::disk::WRITE, "disk info");

    assert_eq!(console.lines(), ["disk info"]);
    assert_eq!(logger.scope_level(scopes::disk::SCOPE), Some(Priority::Debug));
}

/// Verifies the stricter of global and scope level wins.
#[test]
fn stricter_level_wins() {
    let (logger, _console) = console_logger();
    logger.set_level(Priority::Notice);
    logger.set_scope_level(scopes::disk::SCOPE, Priority::Debug);
    assert!(!logger.enabled(Priority::Info, scopes::disk::WRITE));

    logger.set_level(Priority::Debug);
    logger.set_scope_level(scopes::disk::SCOPE, Priority::Notice);
    assert!(!logger.enabled(Priority::Info, scopes::disk::WRITE));
    assert!(logger.enabled(Priority::Notice, scopes::disk::WRITE));
}

// ============================================================================
// Site Table Tests
// ============================================================================

/// Verifies suppressing one site leaves its neighbours alone.
#[test]
fn suppression_is_per_site() {
    let (logger, console) = console_logger();
    assert!(logger.suppress(scopes::net::SEND));

    log!(logger, Priority::Emergency, scopes::net::SEND, "silenced");
    log!(logger, Priority::Emergency, scopes::net::RECV, "audible");

    assert_eq!(console.lines(), ["audible"]);
    assert!(logger.activate(scopes::net::SEND));
    assert!(logger.enabled(Priority::Emergency, scopes::net::SEND));
}

/// Verifies an index past the end of a scope is never enabled.
#[test]
fn out_of_range_site_is_disabled() {
    let (logger, _console) = console_logger();
    let past_end = SiteId::new(scopes::net::SCOPE, 3);
    assert!(!logger.enabled(Priority::Emergency, past_end));
    assert!(!logger.suppress(past_end));
}

/// Verifies a scope declared without sites rejects every index.
#[test]
fn empty_scope_rejects_all_sites() {
    let (logger, _console) = console_logger();
    assert_eq!(scopes::idle::SPEC.sites(), 0);
    for index in [0, 1, u16::MAX] {
        assert!(!logger.enabled(Priority::Emergency, SiteId::new(scopes::idle::SCOPE, index)));
    }
}

/// Verifies a site naming a scope the logger never registered is disabled.
#[test]
fn unknown_scope_is_disabled() {
    let (logger, _console) = console_logger();
    let foreign = SiteId::new(ScopeId::new(42), 0);
    assert!(!logger.enabled(Priority::Emergency, foreign));
}

// ============================================================================
// Registry Tests
// ============================================================================

/// Verifies the registry lists the logging scope ahead of declared scopes.
#[test]
fn registry_lists_scope_sizes() {
    let (logger, _console) = console_logger();
    let sizes: Vec<_> = logger
        .registry()
        .iter()
        .map(|scope| (scope.name(), scope.len()))
        .collect();
    assert_eq!(
        sizes,
        [("logging", 2), ("net", 3), ("disk", 1), ("idle", 0)]
    );
    assert!(logger.registry().scope_by_name("disk").is_some());
    assert!(logger.registry().scope_by_name("cpu").is_none());
}

/// Verifies a hand-built table with a gap is rejected.
#[test]
fn misnumbered_table_is_rejected() {
    let table = [ScopeSpec::new(ScopeId::new(2), "late", 1)];
    let error = Logger::with_console("bad", &table, SharedBuffer::new()).expect_err("mismatch");
    assert!(error.to_string().contains("late"));
}
