//! crates/logging-sink/src/journald.rs
//! Structured sink for the systemd journal.
//!
//! Each event becomes one journal record. Metadata entries are exported as
//! `O3_<LABEL>` fields next to the session token, group, category and the
//! message itself. Records are submitted over the journal's native datagram
//! protocol, so no libsystemd linkage is needed.

use std::fmt;
use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};

use logging::{
    ColourPair, LogCategory, LogEvent, LogGroup, LogWriter, WriteTransaction, WriterState,
};

use crate::error::SinkError;

/// Socket the journal daemon listens on for native protocol datagrams.
pub const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// Prefix of every metadata-derived field name.
pub const FIELD_PREFIX: &str = "O3_";

/// Fields emitted besides metadata: session token, group, category, message
/// and one spare.
const FIXED_FIELDS: usize = 5;

/// One `NAME=value` pair of a journal record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalField {
    name: String,
    value: String,
}

impl JournalField {
    /// Creates a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Appends the native protocol encoding of the field to `buf`.
    ///
    /// Values without a newline use `NAME=value\n`. Values containing one
    /// are length-prefixed: `NAME\n`, the value length as a little-endian
    /// `u64`, the raw value and a trailing newline.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.name.as_bytes());
        if self.value.contains('\n') {
            buf.push(b'\n');
            buf.extend_from_slice(&(self.value.len() as u64).to_le_bytes());
        } else {
            buf.push(b'=');
        }
        buf.extend_from_slice(self.value.as_bytes());
        buf.push(b'\n');
    }
}

impl fmt::Display for JournalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Encodes a complete record in the native protocol.
pub fn encode_record(fields: &[JournalField]) -> Vec<u8> {
    let capacity = fields
        .iter()
        .map(|field| field.name.len() + field.value.len() + 10)
        .sum();
    let mut buf = Vec::with_capacity(capacity);
    for field in fields {
        field.encode_into(&mut buf);
    }
    buf
}

/// Destination of journal records.
pub trait JournalTransport {
    /// Submits one record made of `fields`.
    fn submit(&mut self, fields: &[JournalField]) -> io::Result<()>;
}

/// Native protocol client of the journal daemon.
#[derive(Debug)]
pub struct NativeJournal {
    socket: UnixDatagram,
    path: PathBuf,
}

impl NativeJournal {
    /// Creates a client for the system journal socket.
    pub fn connect() -> Result<Self, SinkError> {
        Self::with_path(JOURNAL_SOCKET)
    }

    /// Creates a client sending to the socket at `path`.
    ///
    /// The socket is unbound and unconnected, so this succeeds even when
    /// nothing listens at `path`; delivery failures surface per record.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let socket = UnixDatagram::unbound().map_err(SinkError::JournalSocket)?;
        Ok(Self {
            socket,
            path: path.into(),
        })
    }

    /// Destination socket path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JournalTransport for NativeJournal {
    fn submit(&mut self, fields: &[JournalField]) -> io::Result<()> {
        let record = encode_record(fields);
        let sent = self.socket.send_to(&record, &self.path)?;
        if sent == record.len() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("journal record truncated: {sent} of {} bytes", record.len()),
            ))
        }
    }
}

/// Writer emitting one structured journal record per event.
///
/// The journal stamps records itself, so
/// [`timestamp_enabled`](LogWriter::timestamp_enabled) always reports `true`.
/// Colours are ignored. Transport failures are reported on the `tracing`
/// diagnostic channel and the event is considered consumed.
#[derive(Debug)]
pub struct JournaldWriter<T = NativeJournal> {
    transport: T,
    state: WriterState,
}

impl JournaldWriter<NativeJournal> {
    /// Creates a writer for the system journal.
    pub fn connect() -> Result<Self, SinkError> {
        Ok(Self::with_transport(NativeJournal::connect()?))
    }
}

impl<T> JournaldWriter<T> {
    /// Wraps a transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            state: WriterState::default(),
        }
    }

    /// Borrows the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the writer and returns the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Builds the record the next [`write_event`](LogWriter::write_event)
    /// would submit for `event`, without consuming pending state.
    pub fn fields_for(&self, event: &LogEvent) -> Vec<JournalField> {
        record_fields(&self.state, event)
    }
}

fn record_fields(state: &WriterState, event: &LogEvent) -> Vec<JournalField> {
    let mut fields = Vec::with_capacity(state.metadata.len() + FIXED_FIELDS);

    for entry in state.metadata.iter().filter(|entry| !entry.skip()) {
        fields.push(JournalField::new(
            format!("{FIELD_PREFIX}{}", entry.label().to_ascii_uppercase()),
            entry.value(false),
        ));
    }

    if event.has_session_token() {
        fields.push(JournalField::new("O3_SESSION_TOKEN", event.session_token.as_str()));
    }
    fields.push(JournalField::new("O3_LOG_GROUP", event.group_name()));
    fields.push(JournalField::new("O3_LOG_CATEGORY", event.category_name()));

    let mut message = if state.message_prepend && state.prepend_meta {
        state.prepend_value()
    } else {
        String::new()
    };
    message.push_str(&event.message);
    fields.push(JournalField::new("MESSAGE", message));

    fields
}

impl<T> LogWriter for JournaldWriter<T>
where
    T: JournalTransport,
{
    fn state(&self) -> &WriterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WriterState {
        &mut self.state
    }

    fn timestamp_enabled(&self) -> bool {
        true
    }

    fn write_with_colours(&mut self, text: &str, _colours: ColourPair<'_>) -> io::Result<()> {
        self.write_event(&LogEvent::new(LogGroup::Undefined, LogCategory::Info, text))
    }

    fn write_categorized_with_colours(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
        _colours: ColourPair<'_>,
    ) -> io::Result<()> {
        self.write_event(&LogEvent::new(group, category, text))
    }

    fn write_event(&mut self, event: &LogEvent) -> io::Result<()> {
        let tx = WriteTransaction::begin(&mut self.state);
        let fields = record_fields(&tx, event);

        if let Err(error) = self.transport.submit(&fields) {
            tracing::warn!(
                target: "logging_sink::journald",
                %error,
                fields = fields.len(),
                "journal submission failed"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
