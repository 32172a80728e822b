//! crates/logging-sink/src/syslog.rs
//! Syslog sink.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly. One channel is opened
//! when the transport is built and closed when it is dropped; every emitted
//! line is one `syslog(3)` call at a priority derived from the event category.

use std::ffi::CString;
use std::fmt;
use std::io;

use logging::{
    ColourPair, LogCategory, LogGroup, LogWriter, WriteTransaction, WriterState, log_prefix,
};

use crate::error::SinkError;

/// Syslog facility codes matching the POSIX syslog(3) constants.
///
/// Each variant corresponds to a `LOG_*` facility from `<syslog.h>`.
/// Configuration maps string names (e.g., `"daemon"`, `"local0"`) to these
/// constants via [`SyslogFacility::from_name`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// Kernel messages (LOG_KERN).
    Kern = libc::LOG_KERN,
    /// User-level messages (LOG_USER).
    User = libc::LOG_USER,
    /// Mail system (LOG_MAIL).
    Mail = libc::LOG_MAIL,
    /// System daemons (LOG_DAEMON).
    #[default]
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Messages generated internally by syslogd (LOG_SYSLOG).
    Syslog = libc::LOG_SYSLOG,
    /// Line printer subsystem (LOG_LPR).
    Lpr = libc::LOG_LPR,
    /// Network news subsystem (LOG_NEWS).
    News = libc::LOG_NEWS,
    /// UUCP subsystem (LOG_UUCP).
    Uucp = libc::LOG_UUCP,
    /// Clock daemon (LOG_CRON).
    Cron = libc::LOG_CRON,
    /// Private security/authorization messages (LOG_AUTHPRIV).
    AuthPriv = libc::LOG_AUTHPRIV,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Every facility, in `<syslog.h>` order.
    pub const ALL: [Self; 19] = [
        Self::Kern,
        Self::User,
        Self::Mail,
        Self::Daemon,
        Self::Auth,
        Self::Syslog,
        Self::Lpr,
        Self::News,
        Self::Uucp,
        Self::Cron,
        Self::AuthPriv,
        Self::Local0,
        Self::Local1,
        Self::Local2,
        Self::Local3,
        Self::Local4,
        Self::Local5,
        Self::Local6,
        Self::Local7,
    ];

    /// Parses a facility name string into the corresponding constant.
    ///
    /// Recognised names are case-insensitive. Returns `None` for unrecognised
    /// names.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(
    ///     SyslogFacility::from_name("daemon"),
    ///     Some(SyslogFacility::Daemon)
    /// );
    /// assert_eq!(
    ///     SyslogFacility::from_name("LOCAL3"),
    ///     Some(SyslogFacility::Local3)
    /// );
    /// assert_eq!(SyslogFacility::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|facility| facility.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the facility name as accepted by [`from_name`](Self::from_name).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kern => "kern",
            Self::User => "user",
            Self::Mail => "mail",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Syslog => "syslog",
            Self::Lpr => "lpr",
            Self::News => "news",
            Self::Uucp => "uucp",
            Self::Cron => "cron",
            Self::AuthPriv => "authpriv",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog priority levels matching POSIX syslog(3) severity constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// System is unusable (LOG_EMERG).
    Emergency = libc::LOG_EMERG,
    /// Action must be taken immediately (LOG_ALERT).
    Alert = libc::LOG_ALERT,
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl SyslogPriority {
    /// Priority used for writes that carry no category.
    pub const DEFAULT: Self = Self::Info;

    /// Maps a log category onto a syslog priority.
    pub const fn for_category(category: LogCategory) -> Self {
        match category {
            LogCategory::Debug => Self::Debug,
            LogCategory::Verb2 | LogCategory::Verb1 | LogCategory::Info => Self::Info,
            LogCategory::Warn => Self::Warning,
            LogCategory::Error => Self::Error,
            LogCategory::Crit | LogCategory::Fatal => Self::Critical,
            LogCategory::Undefined => Self::Notice,
        }
    }
}

/// Default syslog ident.
pub use logging::config::DEFAULT_SYSLOG_IDENT;

/// Facility and ident (program identity) passed to
/// [`openlog(3)`](libc::openlog). Constructing a [`SyslogConfig`] does not
/// open the channel; call [`open`](SyslogConfig::open) for that.
///
/// # Examples
///
/// ```
/// use logging_sink::syslog::{SyslogConfig, SyslogFacility};
///
/// let config = SyslogConfig::new(SyslogFacility::Local5, "my-daemon");
/// assert_eq!(config.facility(), SyslogFacility::Local5);
/// assert_eq!(config.ident(), "my-daemon");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    ident: String,
}

impl SyslogConfig {
    /// Creates a new syslog configuration with the given facility and ident.
    pub fn new(facility: SyslogFacility, ident: impl Into<String>) -> Self {
        Self {
            facility,
            ident: ident.into(),
        }
    }

    /// Builds a configuration from the textual settings of a
    /// [`LogConfig`](logging::LogConfig).
    pub fn from_settings(settings: &logging::SyslogSettings) -> Result<Self, SinkError> {
        let facility = SyslogFacility::from_name(&settings.facility)
            .ok_or_else(|| SinkError::UnknownFacility(settings.facility.clone()))?;
        Ok(Self::new(facility, settings.ident.clone()))
    }

    /// Returns the configured syslog facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured ident string.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Opens the syslog channel with the configured facility and ident.
    ///
    /// POSIX allows a single syslog channel per process; opening a second
    /// one replaces the first one's settings.
    pub fn open(&self) -> Result<LibcSyslog, SinkError> {
        let ident = CString::new(self.ident.as_str())
            .map_err(|_| SinkError::InvalidIdent(self.ident.clone()))?;

        // SAFETY: `ident` is stored in the returned transport, which calls
        // closelog(3) in its Drop impl before the CString is released, so the
        // pointer retained by openlog(3) stays valid while it is in use.
        unsafe {
            libc::openlog(
                ident.as_ptr(),
                libc::LOG_NDELAY | libc::LOG_PID,
                self.facility as libc::c_int,
            );
        }

        Ok(LibcSyslog {
            ident,
            facility: self.facility,
        })
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_IDENT)
    }
}

/// Destination of syslog lines.
pub trait SyslogTransport {
    /// Sends one line at `priority`.
    fn send(&mut self, priority: SyslogPriority, message: &str);
}

/// An open syslog(3) channel. Dropping it calls `closelog(3)`.
#[derive(Debug)]
pub struct LibcSyslog {
    ident: CString,
    facility: SyslogFacility,
}

impl LibcSyslog {
    /// The facility the channel was opened with.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// The ident the channel was opened with.
    pub fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or_default()
    }
}

impl SyslogTransport for LibcSyslog {
    fn send(&mut self, priority: SyslogPriority, message: &str) {
        // syslog(3) interprets `%` as a format specifier; pass the message as
        // the argument of a fixed "%s" format.
        let Ok(c_message) = CString::new(message) else {
            tracing::warn!(
                target: "logging_sink::syslog",
                "dropping syslog message with interior NUL byte"
            );
            return;
        };

        // SAFETY: the channel is open while `self` is alive, and both the
        // format string and the message are valid NUL-terminated C strings.
        unsafe {
            libc::syslog(priority as libc::c_int, c"%s".as_ptr(), c_message.as_ptr());
        }
    }
}

impl Drop for LibcSyslog {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions beyond openlog having been
        // called, which construction guarantees.
        unsafe {
            libc::closelog();
        }
    }
}

/// Writer forwarding events to syslog.
///
/// The syslog service stamps records itself, so
/// [`timestamp_enabled`](LogWriter::timestamp_enabled) always reports `true`.
/// Colours are accepted and ignored. Each write issues one call for the
/// metadata line (when metadata is pending) and one for the message.
///
/// ```
/// use logging::{LogCategory, LogGroup, LogWriter};
/// use logging_sink::syslog::{SyslogPriority, SyslogTransport, SyslogWriter};
///
/// #[derive(Default)]
/// struct Lines(Vec<(SyslogPriority, String)>);
///
/// impl SyslogTransport for Lines {
///     fn send(&mut self, priority: SyslogPriority, message: &str) {
///         self.0.push((priority, message.to_owned()));
///     }
/// }
///
/// let mut writer = SyslogWriter::with_transport(Lines::default());
/// writer.add_meta("user", "alice", false);
/// writer.write_categorized(LogGroup::Client, LogCategory::Warn, "slow")?;
///
/// let lines = writer.into_transport().0;
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1], (SyslogPriority::Warning, "Client WARNING: slow".to_owned()));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct SyslogWriter<T = LibcSyslog> {
    transport: T,
    state: WriterState,
}

impl SyslogWriter<LibcSyslog> {
    /// Opens the syslog channel described by `config`.
    pub fn open(config: &SyslogConfig) -> Result<Self, SinkError> {
        Ok(Self::with_transport(config.open()?))
    }
}

impl<T> SyslogWriter<T> {
    /// Wraps an already open transport.
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
}

impl<T> SyslogWriter<T>
where
    T: SyslogTransport,
{
    fn emit(&mut self, priority: SyslogPriority, prefix: &str, text: &str) {
        let mut tx = WriteTransaction::begin(&mut self.state);
        let prepend = if tx.take_prepend_meta() {
            tx.prepend_value()
        } else {
            String::new()
        };

        if tx.has_metadata_line() {
            let line = format!("{prepend}{}", tx.metadata);
            self.transport.send(priority, &line);
        }

        let line = format!("{prepend}{prefix}{text}");
        self.transport.send(priority, &line);
    }
}

impl<T> LogWriter for SyslogWriter<T>
where
    T: SyslogTransport,
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
        self.emit(SyslogPriority::DEFAULT, "", text);
        Ok(())
    }

    fn write_categorized_with_colours(
        &mut self,
        group: LogGroup,
        category: LogCategory,
        text: &str,
        _colours: ColourPair<'_>,
    ) -> io::Result<()> {
        let prefix = log_prefix(group, category);
        self.emit(SyslogPriority::for_category(category), &prefix, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
