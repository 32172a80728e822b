//! crates/logging/src/writer.rs
//! The writer contract shared by every sink.
//!
//! A producer calls [`LogWriter::add_meta`] zero or more times, optionally
//! arms [`LogWriter::prepend_meta`], then calls one write method. The sink
//! formats and emits the event, after which the metadata set and the prepend
//! state are cleared: one accumulated batch is consumed by exactly one write.
//! Sinks enforce this by holding a [`WriteTransaction`] for the duration of
//! the write.

use std::io;
use std::ops::{Deref, DerefMut};

use crate::event::LogEvent;
use crate::levels::{LogCategory, LogGroup, log_prefix};
use crate::metadata::MetadataSet;
use crate::tag::RenderTag;

/// Escape sequences written before and after a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColourPair<'a> {
    /// Written before the line content.
    pub pre: &'a str,
    /// Written after the line content.
    pub post: &'a str,
}

impl<'a> ColourPair<'a> {
    /// No decoration.
    pub const NONE: ColourPair<'static> = ColourPair { pre: "", post: "" };

    /// Creates a pair from explicit sequences.
    pub const fn new(pre: &'a str, post: &'a str) -> Self {
        Self { pre, post }
    }
}

/// Toggles, metadata and prepend state owned by a writer.
#[derive(Clone, Debug)]
pub struct WriterState {
    /// Metadata accumulated for the next write.
    pub metadata: MetadataSet,
    /// Prefix stream lines with a timestamp.
    pub timestamp: bool,
    /// Accept and emit metadata.
    pub log_meta: bool,
    /// Allow the prepend value on the message of structured sinks.
    pub message_prepend: bool,
    /// Label whose value prefixes the next message; empty when inactive.
    pub prepend_label: String,
    /// Also prefix the metadata line; reset after one use.
    pub prepend_meta: bool,
}

impl Default for WriterState {
    fn default() -> Self {
        Self {
            metadata: MetadataSet::new(),
            timestamp: true,
            log_meta: true,
            message_prepend: true,
            prepend_label: String::new(),
            prepend_meta: false,
        }
    }
}

impl WriterState {
    /// Whether a metadata line should be emitted for the pending write.
    pub fn has_metadata_line(&self) -> bool {
        self.log_meta && !self.metadata.is_empty()
    }

    /// The armed prepend value, or an empty string when no label is set.
    pub fn prepend_value(&self) -> String {
        if self.prepend_label.is_empty() {
            String::new()
        } else {
            self.metadata.meta_value_default(&self.prepend_label)
        }
    }

    /// Drops all per-write state.
    pub fn reset_transaction(&mut self) {
        self.metadata.clear();
        self.prepend_label.clear();
        self.prepend_meta = false;
    }
}

/// RAII guard covering one write call.
///
/// Dropping the guard clears the metadata set and the prepend state, so early
/// returns and transport errors consume the pending batch exactly like a
/// successful write. The guard dereferences to [`WriterState`] so sinks read
/// the pending state through it.
#[must_use = "dropping the transaction immediately clears the pending metadata"]
#[derive(Debug)]
pub struct WriteTransaction<'a> {
    state: &'a mut WriterState,
}

impl<'a> WriteTransaction<'a> {
    /// Starts a transaction over `state`.
    pub const fn begin(state: &'a mut WriterState) -> Self {
        Self { state }
    }

    /// Returns the armed-for-metadata flag and disarms it.
    pub fn take_prepend_meta(&mut self) -> bool {
        std::mem::take(&mut self.state.prepend_meta)
    }
}

impl Deref for WriteTransaction<'_> {
    type Target = WriterState;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for WriteTransaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for WriteTransaction<'_> {
    fn drop(&mut self) {
        self.state.reset_transaction();
    }
}

/// Common interface of every log sink.
///
/// Implementors provide [`state`](Self::state), [`state_mut`](Self::state_mut)
/// and the [`write_with_colours`](Self::write_with_colours) primitive; every
/// other method has a default built on top of those. Sinks with a native
/// severity channel override
/// [`write_categorized_with_colours`](Self::write_categorized_with_colours) to
/// avoid textual prefixing.
pub trait LogWriter {
    /// Borrows the writer state.
    fn state(&self) -> &WriterState;

    /// Mutably borrows the writer state.
    fn state_mut(&mut self) -> &mut WriterState;

    /// Writes `text` decorated with `colours`, consuming pending metadata.
    fn write_with_colours(&mut self, text: &str, colours: ColourPair<'_>) -> io::Result<()>;

    /// Turns timestamps on or off.
    fn enable_timestamp(&mut self, enabled: bool) {
        self.state_mut().timestamp = enabled;
    }

    /// Whether lines are timestamped. Sinks whose transport stamps records
    /// itself always report `true`.
    fn timestamp_enabled(&self) -> bool {
        self.state().timestamp
    }

    /// Turns metadata logging on or off.
    fn enable_log_meta(&mut self, enabled: bool) {
        self.state_mut().log_meta = enabled;
    }

    /// Whether metadata is accepted and emitted.
    fn log_meta_enabled(&self) -> bool {
        self.state().log_meta
    }

    /// Turns the message prepend on or off.
    fn enable_message_prepend(&mut self, enabled: bool) {
        self.state_mut().message_prepend = enabled;
    }

    /// Whether the message prepend is allowed.
    fn message_prepend_enabled(&self) -> bool {
        self.state().message_prepend
    }

    /// Writes `text` without decoration.
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.write_with_colours(text, ColourPair::NONE)
    }

    /// Writes `text` prefixed with the group and category.
    fn write_categorized_with_colours(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
        colours: ColourPair<'_>,
    ) -> io::Result<()> {
        let mut line = log_prefix(group, category);
        line.push_str(text);
        self.write_with_colours(&line, colours)
    }

    /// Writes `text` prefixed with the group and category, without colours.
    fn write_categorized(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
    ) -> io::Result<()> {
        self.write_categorized_with_colours(group, category, text, ColourPair::NONE)
    }

    /// Writes a complete event.
    fn write_event(&mut self, event: &LogEvent) -> io::Result<()> {
        self.write_categorized(event.group, event.category, &event.message)
    }

    /// Adds a text metadata entry for the next write. A no-op while metadata
    /// logging is disabled.
    fn add_meta(&mut self, label: &str, value: &str, skip: bool) {
        let state = self.state_mut();
        if state.log_meta {
            state.metadata.add_meta(label, value, skip);
        }
    }

    /// Adds a tag metadata entry for the next write. A no-op while metadata
    /// logging is disabled.
    fn add_meta_tag<T>(&mut self, label: &str, tag: &T, skip: bool)
    where
        T: RenderTag + Clone + 'static,
        Self: Sized,
    {
        let state = self.state_mut();
        if state.log_meta {
            state.metadata.add_meta_tag(label, tag, skip);
        }
    }

    /// Replaces the pending metadata with a copy of `metadata`.
    fn add_meta_copy(&mut self, metadata: &MetadataSet) {
        self.state_mut().metadata = metadata.clone();
    }

    /// Arms a one-shot prefix: the next write's message is prefixed with the
    /// value of `label`, and so is the metadata line when
    /// `also_in_metadata_line` is set. Re-arming overwrites the previous
    /// label.
    fn prepend_meta(&mut self, label: &str, also_in_metadata_line: bool) {
        let state = self.state_mut();
        state.prepend_label.clear();
        state.prepend_label.push_str(label);
        state.prepend_meta = also_in_metadata_line;
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn state(&self) -> &WriterState {
        (**self).state()
    }

    fn state_mut(&mut self) -> &mut WriterState {
        (**self).state_mut()
    }

    fn write_with_colours(&mut self, text: &str, colours: ColourPair<'_>) -> io::Result<()> {
        (**self).write_with_colours(text, colours)
    }

    fn timestamp_enabled(&self) -> bool {
        (**self).timestamp_enabled()
    }

    fn write_categorized_with_colours(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
        colours: ColourPair<'_>,
    ) -> io::Result<()> {
        (**self).write_categorized_with_colours(group, category, text, colours)
    }

    fn write_categorized(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
    ) -> io::Result<()> {
        (**self).write_categorized(group, category, text)
    }

    fn write_event(&mut self, event: &LogEvent) -> io::Result<()> {
        (**self).write_event(event)
    }
}
