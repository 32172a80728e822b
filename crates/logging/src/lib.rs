#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the transport-independent half of the log writer facade. It
//! defines the metadata side-channel attached to a pending event, the log
//! group and category taxonomy, and the [`LogWriter`] contract every sink
//! implements. The line-oriented sinks ([`StreamWriter`] and
//! [`ColourStreamWriter`]) live here too; the syslog and journal transports
//! are provided by the `logging-sink` crate.
//!
//! # Design
//!
//! A producer accumulates metadata with [`LogWriter::add_meta`], optionally
//! arms a one-shot prefix with [`LogWriter::prepend_meta`], and then issues
//! exactly one write. Sinks hold a [`WriteTransaction`] while writing; the
//! guard clears the metadata set and the prepend state when it is dropped, so
//! a batch is consumed by one write whether the transport succeeded or not.
//!
//! # Invariants
//!
//! - Metadata never survives two writes.
//! - Skip-flagged entries are excluded from rendering and exported records
//!   but still count toward [`MetadataSet::len`].
//! - Looking up a missing label yields an empty string, never an error.
//!
//! # Errors
//!
//! Write methods surface [`std::io::Error`] values from the underlying
//! stream. Name parsing in [`config`] reports [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use logging::{FixedTimestamp, LogCategory, LogGroup, LogWriter, StreamWriter};
//!
//! let mut writer = StreamWriter::with_clock(Vec::new(), FixedTimestamp::new("T"));
//! writer.add_meta("session", "s-1", false);
//! writer.prepend_meta("session", false);
//! writer.write_categorized(LogGroup::Client, LogCategory::Info, "connected")?;
//!
//! let output = String::from_utf8(writer.into_inner()).unwrap();
//! assert_eq!(output, "T session=s-1\nT s-1 Client INFO: connected\n");
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod colour;
pub mod config;
mod event;
mod levels;
mod metadata;
mod sink;
mod tag;
pub mod timestamp;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod writer;

pub use colour::{AnsiColours, ColourMode, ColourPolicy};
pub use config::{ConfigError, LogConfig, SinkKind, SyslogSettings};
pub use event::LogEvent;
pub use levels::{LogCategory, LogGroup, log_prefix};
pub use metadata::{MetaKind, MetadataSet, MetadataValue};
pub use sink::{ColourStreamWriter, StreamWriter};
pub use tag::{LogTag, RenderTag};
pub use timestamp::{FixedTimestamp, LocalClock, TimestampSource};
#[cfg(feature = "tracing")]
pub use tracing_bridge::WriterLayer;
pub use writer::{ColourPair, LogWriter, WriteTransaction, WriterState};
