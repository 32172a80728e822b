//! crates/logging/src/config.rs
//! Writer selection and toggles applied at construction time.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::colour::ColourMode;

/// Error returned when a configuration name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// Unknown sink name.
    #[error("unknown log sink: {0}")]
    UnknownSink(String),
    /// Unknown colour mode name.
    #[error("unknown colour mode: {0}")]
    UnknownColourMode(String),
    /// Unknown log group name.
    #[error("unknown log group: {0}")]
    UnknownGroup(String),
    /// Unknown log category name.
    #[error("unknown log category: {0}")]
    UnknownCategory(String),
}

/// Destination selected for log events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SinkKind {
    /// Text lines on standard output.
    #[default]
    Stdout,
    /// Text lines on standard error.
    Stderr,
    /// The system syslog service.
    Syslog,
    /// The systemd journal.
    Journald,
}

impl SinkKind {
    /// Parses a sink name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "stdout" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            "syslog" => Some(Self::Syslog),
            "journald" | "journal" => Some(Self::Journald),
            _ => None,
        }
    }

    /// Canonical name of the sink.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Syslog => "syslog",
            Self::Journald => "journald",
        }
    }

    /// Whether the sink writes text lines to a stream.
    pub const fn is_stream(self) -> bool {
        matches!(self, Self::Stdout | Self::Stderr)
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::UnknownSink(s.to_owned()))
    }
}

impl FromStr for ColourMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::UnknownColourMode(s.to_owned()))
    }
}

/// Default syslog identity.
pub const DEFAULT_SYSLOG_IDENT: &str = "logwriter";

/// Syslog channel parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyslogSettings {
    /// Facility name, e.g. `daemon` or `local3`.
    pub facility: String,
    /// Program identity passed to the syslog service.
    pub ident: String,
}

impl Default for SyslogSettings {
    fn default() -> Self {
        Self {
            facility: "daemon".to_owned(),
            ident: DEFAULT_SYSLOG_IDENT.to_owned(),
        }
    }
}

/// Complete writer configuration.
///
/// ```
/// use logging::{LogConfig, SinkKind};
///
/// let config = LogConfig::default();
/// assert_eq!(config.sink, SinkKind::Stdout);
/// assert!(config.timestamp && config.log_meta && config.message_prepend);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Selected destination.
    pub sink: SinkKind,
    /// Colour mode for stream sinks.
    pub colour_mode: ColourMode,
    /// Prefix stream lines with a timestamp.
    pub timestamp: bool,
    /// Emit metadata.
    pub log_meta: bool,
    /// Allow the prepend value on structured messages.
    pub message_prepend: bool,
    /// Syslog channel parameters.
    pub syslog: SyslogSettings,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            colour_mode: ColourMode::default(),
            timestamp: true,
            log_meta: true,
            message_prepend: true,
            syslog: SyslogSettings::default(),
        }
    }
}

impl LogConfig {
    /// Configuration targeting `sink` with default toggles.
    pub fn for_sink(sink: SinkKind) -> Self {
        Self {
            sink,
            ..Self::default()
        }
    }
}
