//! Integration tests for function-call tracing.
//!
//! These tests verify indentation, caller/callee naming, depth clamping and
//! the gating of trace output on the global switch and an active destination.

use logging::{DestinationKind, Logger, MAX_INDENT, Priority, trace_call};
use test_support::SharedBuffer;

fn traced_logger() -> (Logger, SharedBuffer) {
    let console = SharedBuffer::new();
    let logger = Logger::with_console("tracer", &[], console.clone()).expect("logger");
    logger.configure(Priority::Debug, DestinationKind::Console, None);
    logger.trace_on();
    console.clear();
    (logger, console)
}

fn leaf(logger: &Logger) {
    let _trace = trace_call!(logger, leaf);
}

fn branch(logger: &Logger) {
    let _trace = trace_call!(logger, branch);
    leaf(logger);
}

fn recurse(logger: &Logger, remaining: usize) {
    let _trace = trace_call!(logger, recurse);
    if remaining > 0 {
        recurse(logger, remaining - 1);
    }
}

// ============================================================================
// Output Shape Tests
// ============================================================================

/// Verifies nested calls produce symmetric, indented entry and exit lines.
#[test]
fn nested_calls_are_indented() {
    let (logger, console) = traced_logger();
    branch(&logger);

    assert_eq!(
        console.lines(),
        [
            ". (untraced)() called branch()",
            ".. branch() called leaf()",
            ".. leaf() returned to branch()",
            ". branch() returned to (untraced)()",
        ]
    );
    assert_eq!(logger.call_depth(), 1);
}

/// Verifies indentation stops growing at the cap.
#[test]
fn indentation_is_capped() {
    let (logger, console) = traced_logger();
    recurse(&logger, MAX_INDENT + 10);

    let widest = console
        .lines()
        .iter()
        .map(|line| line.bytes().take_while(|&b| b == b'.').count())
        .max()
        .unwrap_or_default();
    assert_eq!(widest, MAX_INDENT);
    assert_eq!(logger.call_depth(), 1);
}

/// Verifies an address nobody registered is shown in hex.
#[test]
fn unregistered_address_renders_as_hex() {
    let (logger, console) = traced_logger();
    logger.trace_enter(0x10);
    logger.trace_exit(0x10);

    assert_eq!(
        console.lines(),
        [
            ". (untraced)() called 0x00000010()",
            ". 0x00000010() returned to (untraced)()",
        ]
    );
}

// ============================================================================
// Gating Tests
// ============================================================================

/// Verifies nothing is written while tracing is off, but depth still moves.
#[test]
fn disabled_tracer_is_silent() {
    let (logger, console) = traced_logger();
    logger.trace_off();
    assert!(!logger.tracing_enabled());

    logger.trace_enter(0x20);
    assert_eq!(logger.call_depth(), 2);
    logger.trace_exit(0x20);

    assert!(console.contents().is_empty());
    assert_eq!(logger.call_depth(), 1);
}

/// Verifies unbalanced exits never drive depth below one.
#[test]
fn depth_is_clamped_at_one() {
    let (logger, _console) = traced_logger();
    for _ in 0..5 {
        logger.trace_exit(0x30);
    }
    assert_eq!(logger.call_depth(), 1);
}

/// Verifies trace lines bypass the level filter.
#[test]
fn trace_ignores_log_level() {
    let (logger, console) = traced_logger();
    logger.set_level(Priority::Emergency);
    leaf(&logger);
    assert_eq!(console.lines().len(), 2);
}

/// Verifies a shut-down logger traces nothing.
#[test]
fn undefined_destination_suppresses_trace() {
    let (logger, console) = traced_logger();
    logger.shutdown();
    leaf(&logger);
    assert!(console.contents().is_empty());
}
