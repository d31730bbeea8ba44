//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and a [`Logger`].
//!
//! [`LoggerLayer`] lets code instrumented with the standard `tracing` macros
//! write through the same destination as the call-site macros. Events are
//! gated by the logger's global level and, when the last `::` segment of the
//! event target names a registered scope, by that scope's level. Per-site
//! suppression does not apply since tracing events carry no [`SiteId`].
//!
//! ```rust,ignore
//! let logger = logging::init("toggled", scopes::SCOPES)?;
//! logging::init_tracing(logger)?;
//! tracing::warn!(target: "toggled::config", "ignoring unknown option");
//! ```
//!
//! [`SiteId`]: crate::SiteId

use logging_sink::Priority;
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::util::TryInitError;

use crate::Logger;

/// A tracing-subscriber layer that forwards events into a [`Logger`].
#[derive(Clone, Copy, Debug)]
pub struct LoggerLayer {
    logger: &'static Logger,
}

impl LoggerLayer {
    /// Creates a layer writing to `logger`.
    #[must_use]
    pub const fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }

    /// Map a tracing level to a priority.
    const fn priority(level: &Level) -> Priority {
        match *level {
            Level::ERROR => Priority::Error,
            Level::WARN => Priority::Warning,
            Level::INFO => Priority::Info,
            Level::DEBUG | Level::TRACE => Priority::Debug,
        }
    }

    fn admits(&self, metadata: &Metadata<'_>) -> bool {
        let priority = Self::priority(metadata.level());
        if !self.logger.level().admits(priority) {
            return false;
        }
        let segment = metadata.target().rsplit("::").next().unwrap_or_default();
        self.logger
            .registry()
            .scope_by_name(segment)
            .is_none_or(|scope| scope.level().admits(priority))
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber,
{
    // Levels change at runtime, so no callsite may be cached as never-enabled.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.admits(metadata)
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.admits(metadata) {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.logger
                .emit(Self::priority(metadata.level()), format_args!("{message}"));
        }
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global tracing subscriber that forwards into `logger`.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(logger: &'static Logger) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .try_init()
}
