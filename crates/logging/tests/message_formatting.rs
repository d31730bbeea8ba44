//! Integration tests for rendered message content.
//!
//! These tests verify the bounded message buffer and the rules for adding a
//! source-location suffix, as seen through the logging macros.

use logging::{
    DestinationKind, LOCATION_SLACK, Logger, MESSAGE_CAPACITY, Priority, ScopeId, ScopeSpec,
    SiteId, log_alert, log_emergency, log_info, log_notice,
};
use test_support::SharedBuffer;

const APP: ScopeSpec = ScopeSpec::new(ScopeId::new(1), "app", 1);
const SITE: SiteId = SiteId::new(APP.id(), 0);

fn console_logger() -> (Logger, SharedBuffer) {
    let console = SharedBuffer::new();
    let logger = Logger::with_console("format", &[APP], console.clone()).expect("logger");
    logger.configure(Priority::Debug, DestinationKind::Console, None);
    console.clear();
    (logger, console)
}

/// Verifies a short message gets ` (<file>:<line>)`.
#[test]
fn short_message_gets_location() {
    let (logger, console) = console_logger();
    log_alert!(logger, SITE, "disk {}", "full");
    let line = console.lines().remove(0);
    assert!(line.starts_with("disk full ("), "{line}");
    assert!(line.ends_with(')'), "{line}");
    assert!(line.contains("message_formatting.rs:"), "{line}");
}

/// Verifies a message filling the slack gets no location.
#[test]
fn long_message_omits_location() {
    let (logger, console) = console_logger();
    let body = "z".repeat(MESSAGE_CAPACITY - 1 - LOCATION_SLACK);
    log_emergency!(logger, SITE, "{body}");
    assert_eq!(console.lines(), [body]);
}

/// Verifies an oversized message is cut to capacity.
#[test]
fn oversized_message_is_truncated() {
    let (logger, console) = console_logger();
    let body = "q".repeat(MESSAGE_CAPACITY * 3);
    log_info!(logger, SITE, "{body}");
    let line = console.lines().remove(0);
    assert_eq!(line.len(), MESSAGE_CAPACITY);
}

/// Verifies truncation never splits a multi-byte character.
#[test]
fn truncation_keeps_valid_utf8() {
    let (logger, console) = console_logger();
    let body = "\u{20ac}".repeat(MESSAGE_CAPACITY);
    log_notice!(logger, SITE, "{body}");
    let line = console.lines().remove(0);
    assert!(line.len() <= MESSAGE_CAPACITY);
    assert!(line.chars().all(|c| c == '\u{20ac}'));
}

/// Verifies percent signs are passed through untouched.
#[test]
fn percent_sequences_are_literal() {
    let (logger, console) = console_logger();
    log_info!(logger, SITE, "100% %s %n");
    assert_eq!(console.lines(), ["100% %s %n"]);
}
