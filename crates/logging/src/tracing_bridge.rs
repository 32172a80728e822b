//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and [`LogWriter`] sinks.
//!
//! [`WriterLayer`] is a tracing-subscriber layer that turns each tracing event
//! into one [`LogEvent`] written through a wrapped writer:
//!
//! - the `message` field becomes the event message;
//! - a `session_token` field becomes the event's session token;
//! - every other field is added as metadata for that single write;
//! - the level selects the category and the last segment of the target
//!   selects the group when it names one (`netcfg`, `app::sessionmgr`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LogGroup, StreamWriter, WriterLayer};
//! use tracing_subscriber::layer::SubscriberExt;
//! use tracing_subscriber::util::SubscriberInitExt;
//!
//! let layer = WriterLayer::new(StreamWriter::new(std::io::stderr()), LogGroup::Client);
//! tracing_subscriber::registry().with(layer).init();
//!
//! tracing::warn!(target: "client", peer = "10.0.0.1", "handshake slow");
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::event::LogEvent;
use crate::levels::{LogCategory, LogGroup};
use crate::writer::LogWriter;

/// A tracing layer forwarding events to a [`LogWriter`].
///
/// The writer is single-threaded-use, so the layer serializes access through
/// a mutex.
pub struct WriterLayer<W> {
    writer: Mutex<W>,
    default_group: LogGroup,
}

impl<W> WriterLayer<W> {
    /// Wraps `writer`; events whose target names no group use
    /// `default_group`.
    pub const fn new(writer: W, default_group: LogGroup) -> Self {
        Self {
            writer: Mutex::new(writer),
            default_group,
        }
    }

    /// Consumes the layer and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn group_for_target(&self, target: &str) -> LogGroup {
        target
            .rsplit("::")
            .next()
            .and_then(LogGroup::from_name)
            .unwrap_or(self.default_group)
    }

    const fn category_for_level(level: &Level) -> LogCategory {
        match *level {
            Level::ERROR => LogCategory::Error,
            Level::WARN => LogCategory::Warn,
            Level::INFO => LogCategory::Info,
            Level::DEBUG => LogCategory::Verb1,
            Level::TRACE => LogCategory::Debug,
        }
    }
}

impl<W> fmt::Debug for WriterLayer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterLayer")
            .field("default_group", &self.default_group)
            .finish_non_exhaustive()
    }
}

impl<S, W> Layer<S> for WriterLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: LogWriter + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let log_event = LogEvent::new(
            self.group_for_target(metadata.target()),
            Self::category_for_level(metadata.level()),
            visitor.message.unwrap_or_default(),
        )
        .with_session_token(visitor.session_token.unwrap_or_default());

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        for (label, value) in &visitor.fields {
            writer.add_meta(label, value, false);
        }
        writer.write_event(&log_event).ok();
    }
}

/// Collects message, session token and metadata fields from an event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    session_token: Option<String>,
    fields: Vec<(String, String)>,
}

impl EventVisitor {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "session_token" => self.session_token = Some(value),
            name => self.fields.push((name.to_owned(), value)),
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_owned());
    }
}
