#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the operating-system transports of the log writer
//! facade: a syslog sink speaking `syslog(3)` through libc and a structured
//! sink for the systemd journal. Both implement [`logging::LogWriter`], so
//! producers use the same metadata and prepend calls regardless of the
//! destination. [`build_writer`] turns a [`logging::LogConfig`] into a boxed
//! writer for any sink kind, including the stream sinks of the `logging`
//! crate.
//!
//! # Design
//!
//! Each sink is generic over a small transport trait
//! ([`syslog::SyslogTransport`], [`journald::JournalTransport`]). The default
//! transports talk to the OS; tests substitute recording transports to
//! observe exactly what would be emitted.
//!
//! # Invariants
//!
//! - Every write consumes the pending metadata and prepend state, including
//!   writes whose transport failed.
//! - Syslog messages are always passed through a fixed `"%s"` format.
//! - Journal records list metadata fields first, in insertion order, followed
//!   by the session token (when present), group, category and message.
//!
//! # Errors
//!
//! Constructors return [`SinkError`]. Once built, the syslog and journal
//! writers never fail a write; transport problems are reported through
//! `tracing` and the event is dropped.
//!
//! # Examples
//!
//! ```
//! use logging::{LogCategory, LogGroup, LogWriter};
//! use logging_sink::journald::{JournalField, JournalTransport, JournaldWriter};
//!
//! #[derive(Default)]
//! struct Capture(Vec<Vec<JournalField>>);
//!
//! impl JournalTransport for Capture {
//!     fn submit(&mut self, fields: &[JournalField]) -> std::io::Result<()> {
//!         self.0.push(fields.to_vec());
//!         Ok(())
//!     }
//! }
//!
//! let mut writer = JournaldWriter::with_transport(Capture::default());
//! writer.add_meta("foo", "bar", false);
//! writer.write_categorized(LogGroup::Client, LogCategory::Info, "hi")?;
//!
//! let record = &writer.transport().0[0];
//! assert_eq!(record[0].to_string(), "O3_FOO=bar");
//! assert_eq!(record.last().map(JournalField::value), Some("hi"));
//! # Ok::<(), std::io::Error>(())
//! ```

mod error;
pub mod factory;
pub mod journald;
#[allow(unsafe_code)]
pub mod syslog;

pub use error::SinkError;
pub use factory::{build_writer, open_writer};
pub use journald::{JournaldWriter, NativeJournal};
pub use syslog::{LibcSyslog, SyslogWriter};
