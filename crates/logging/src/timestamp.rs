//! crates/logging/src/timestamp.rs
//! Timestamp strings prefixed to stream output.

use std::fmt;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Format used for stream timestamps.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Produces the timestamp token written at the start of stream lines.
pub trait TimestampSource: fmt::Debug + Send {
    /// Returns the current timestamp text.
    fn now(&self) -> String;
}

/// Wall clock in the local time zone, falling back to UTC when the local
/// offset cannot be determined (for example in multi-threaded processes on
/// some platforms).
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl TimestampSource for LocalClock {
    fn now(&self) -> String {
        let now = OffsetDateTime::now_utc();
        let local = UtcOffset::current_local_offset()
            .map(|offset| now.to_offset(offset))
            .unwrap_or(now);
        local.format(TIMESTAMP_FORMAT).unwrap_or_default()
    }
}

/// Always returns the same text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedTimestamp(pub String);

impl FixedTimestamp {
    /// Creates a source returning `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TimestampSource for FixedTimestamp {
    fn now(&self) -> String {
        self.0.clone()
    }
}
