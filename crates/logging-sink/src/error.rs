//! crates/logging-sink/src/error.rs
//! Construction-time failures of the OS-backed sinks.

use std::io;

use logging::ConfigError;
use thiserror::Error;

/// Error raised while building a writer.
///
/// Write paths never return this type: once a writer exists, transport
/// failures are either surfaced as [`io::Error`] (streams) or reported on the
/// diagnostic channel (syslog, journal).
#[derive(Debug, Error)]
pub enum SinkError {
    /// The syslog ident cannot be passed to `openlog(3)`.
    #[error("syslog ident contains an interior NUL byte: {0:?}")]
    InvalidIdent(String),
    /// The syslog facility name is not recognised.
    #[error("unknown syslog facility: {0}")]
    UnknownFacility(String),
    /// The journal socket could not be created.
    #[error("failed to create journal socket: {0}")]
    JournalSocket(#[source] io::Error),
    /// A configuration name could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
