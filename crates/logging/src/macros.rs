//! crates/logging/src/macros.rs
//! Call-site logging macros.
//!
//! Every macro takes the logger, the [`SiteId`](crate::SiteId) of the call
//! and a format string. The filter runs before any argument is formatted.

/// Logs at an explicit priority, without a source location.
///
/// # Examples
///
/// ```
/// use logging::{Logger, Priority, ScopeId, ScopeSpec, SiteId, log};
///
/// const APP: ScopeSpec = ScopeSpec::new(ScopeId::new(1), "app", 1);
/// const HELLO: SiteId = SiteId::new(APP.id(), 0);
///
/// let logger = Logger::with_console("demo", &[APP], Vec::new())?;
/// log!(logger, Priority::Notice, HELLO, "hello {}", "world");
/// # Ok::<(), logging::LoggingError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $priority:expr, $site:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let priority: $crate::Priority = $priority;
        let site: $crate::SiteId = $site;
        if logger.enabled(priority, site) {
            logger.emit(priority, ::core::format_args!($($arg)+));
        }
    }};
}

/// Logs at an explicit priority, appending ` (<file>:<line>)` when it fits.
#[macro_export]
macro_rules! log_with_location {
    ($logger:expr, $priority:expr, $site:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let priority: $crate::Priority = $priority;
        let site: $crate::SiteId = $site;
        if logger.enabled(priority, site) {
            logger.emit_with_location(
                priority,
                ::core::format_args!($($arg)+),
                ::core::file!(),
                ::core::line!(),
            );
        }
    }};
}

/// Logs at Emergency with the source location.
#[macro_export]
macro_rules! log_emergency {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log_with_location!($logger, $crate::Priority::Emergency, $site, $($arg)+)
    };
}

/// Logs at Alert with the source location.
#[macro_export]
macro_rules! log_alert {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log_with_location!($logger, $crate::Priority::Alert, $site, $($arg)+)
    };
}

/// Logs at Critical with the source location.
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log_with_location!($logger, $crate::Priority::Critical, $site, $($arg)+)
    };
}

/// Logs at Error with the source location.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log_with_location!($logger, $crate::Priority::Error, $site, $($arg)+)
    };
}

/// Logs at Warning.
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Warning, $site, $($arg)+)
    };
}

/// Logs at Notice.
#[macro_export]
macro_rules! log_notice {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Notice, $site, $($arg)+)
    };
}

/// Logs at Info.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Priority::Info, $site, $($arg)+)
    };
}

/// Logs at Debug with the source location.
#[cfg(not(feature = "release-build"))]
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        $crate::log_with_location!($logger, $crate::Priority::Debug, $site, $($arg)+)
    };
}

/// Logs at Debug with the source location.
///
/// Release builds type-check the call but never run it.
#[cfg(feature = "release-build")]
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $site:expr, $($arg:tt)+) => {
        if false {
            $crate::log_with_location!($logger, $crate::Priority::Debug, $site, $($arg)+)
        }
    };
}

/// Logs `"reached"` at Debug with the source location.
#[macro_export]
macro_rules! log_checkpoint {
    ($logger:expr, $site:expr $(,)?) => {
        $crate::log_debug!($logger, $site, "reached")
    };
}

/// Traces a call into `function` for as long as the returned guard lives.
///
/// The function's path is registered as its display name.
///
/// # Examples
///
/// ```
/// use logging::{DestinationKind, Logger, Priority, trace_call};
///
/// fn work(logger: &Logger) {
///     let _trace = trace_call!(logger, work);
///     assert_eq!(logger.call_depth(), 2);
/// }
///
/// let logger = Logger::with_console("demo", &[], Vec::new())?;
/// logger.configure(Priority::Debug, DestinationKind::Discard, None);
/// logger.trace_on();
/// work(&logger);
/// assert_eq!(logger.call_depth(), 1);
/// # Ok::<(), logging::LoggingError>(())
/// ```
#[macro_export]
macro_rules! trace_call {
    ($logger:expr, $function:path $(,)?) => {
        $crate::Logger::trace_call(
            &$logger,
            $function as usize,
            ::core::stringify!($function),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::{DestinationKind, Logger, Priority, ScopeId, ScopeSpec, SiteId};
    use test_support::SharedBuffer;

    const APP: ScopeSpec = ScopeSpec::new(ScopeId::new(1), "app", 3);
    const FIRST: SiteId = SiteId::new(APP.id(), 0);
    const SECOND: SiteId = SiteId::new(APP.id(), 1);

    fn console_logger() -> (Logger, SharedBuffer) {
        let console = SharedBuffer::new();
        let logger = Logger::with_console("macros", &[APP], console.clone()).expect("logger");
        logger.configure(Priority::Debug, DestinationKind::Console, None);
        console.clear();
        (logger, console)
    }

    #[test]
    fn location_macros_append_file_and_line() {
        let (logger, console) = console_logger();
        log_error!(logger, FIRST, "broken {}", 7);
        let line = console.lines().remove(0);
        assert!(line.starts_with("broken 7 ("), "{line}");
        assert!(line.contains("macros.rs:"), "{line}");
    }

    #[test]
    fn plain_macros_carry_no_location() {
        let (logger, console) = console_logger();
        log_warning!(logger, FIRST, "w");
        log_notice!(logger, FIRST, "n");
        log_info!(logger, FIRST, "i");
        assert_eq!(console.lines(), ["w", "n", "i"]);
    }

    #[test]
    fn arguments_are_not_evaluated_when_disabled() {
        let (logger, console) = console_logger();
        logger.suppress(SECOND);
        let mut evaluated = false;
        log_info!(logger, SECOND, "{}", {
            evaluated = true;
            "x"
        });
        assert!(!evaluated);
        assert!(console.contents().is_empty());
    }

    #[test]
    fn logger_can_be_passed_by_reference() {
        let (logger, console) = console_logger();
        let by_ref = &logger;
        log_critical!(by_ref, FIRST, "via reference");
        assert!(console.contents().starts_with("via reference"));
    }

    #[cfg(not(feature = "release-build"))]
    #[test]
    fn checkpoint_reports_reached() {
        let (logger, console) = console_logger();
        log_checkpoint!(logger, FIRST);
        assert!(console.contents().starts_with("reached ("));
    }

    #[cfg(feature = "release-build")]
    #[test]
    fn debug_statements_are_compiled_out() {
        let (logger, console) = console_logger();
        log_debug!(logger, FIRST, "gone");
        log_checkpoint!(logger, FIRST);
        assert!(console.contents().is_empty());
    }
}
