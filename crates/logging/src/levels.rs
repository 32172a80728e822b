//! crates/logging/src/levels.rs
//! Log group and log category taxonomy shared by every writer.

use std::fmt;

/// Coarse subsystem classification of a log event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogGroup {
    /// No group assigned.
    #[default]
    Undefined,
    /// Master process.
    MasterProc,
    /// Configuration manager.
    ConfigMgr,
    /// Session manager.
    SessionMgr,
    /// Backend starter.
    BackendStart,
    /// Log service.
    Logger,
    /// Backend session process.
    BackendProc,
    /// Client front-end.
    Client,
    /// Network configuration service.
    NetCfg,
    /// External authentication.
    ExtAuth,
    /// System utilities.
    System,
}

impl LogGroup {
    /// Every group, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Undefined,
        Self::MasterProc,
        Self::ConfigMgr,
        Self::SessionMgr,
        Self::BackendStart,
        Self::Logger,
        Self::BackendProc,
        Self::Client,
        Self::NetCfg,
        Self::ExtAuth,
        Self::System,
    ];

    /// Human readable name used in textual prefixes and journal fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "[UNDEFINED]",
            Self::MasterProc => "Master Process",
            Self::ConfigMgr => "Config Manager",
            Self::SessionMgr => "Session Manager",
            Self::BackendStart => "Backend Starter",
            Self::Logger => "Logger",
            Self::BackendProc => "Backend Session Process",
            Self::Client => "Client",
            Self::NetCfg => "Network Configuration",
            Self::ExtAuth => "External Authentication",
            Self::System => "System Utility",
        }
    }

    /// Short identifier accepted by [`LogGroup::from_name`].
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::MasterProc => "masterproc",
            Self::ConfigMgr => "configmgr",
            Self::SessionMgr => "sessionmgr",
            Self::BackendStart => "backendstart",
            Self::Logger => "logger",
            Self::BackendProc => "backendproc",
            Self::Client => "client",
            Self::NetCfg => "netcfg",
            Self::ExtAuth => "extauth",
            Self::System => "system",
        }
    }

    /// Parses a short group identifier, ignoring ASCII case.
    ///
    /// ```
    /// use logging::LogGroup;
    ///
    /// assert_eq!(LogGroup::from_name("NetCfg"), Some(LogGroup::NetCfg));
    /// assert_eq!(LogGroup::from_name("nope"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.short_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LogGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity classification of a log event.
///
/// Variants are ordered from least to most severe so comparisons such as
/// `category > LogCategory::Info` select warnings and above.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogCategory {
    /// No category assigned.
    Undefined,
    /// Debug output.
    Debug,
    /// Verbose output, level 2.
    Verb2,
    /// Verbose output, level 1.
    Verb1,
    /// Informational output.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
    /// Critical conditions.
    Crit,
    /// Fatal conditions; the process is about to stop.
    Fatal,
}

impl LogCategory {
    /// Every category, from least to most severe.
    pub const ALL: [Self; 9] = [
        Self::Undefined,
        Self::Debug,
        Self::Verb2,
        Self::Verb1,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Crit,
        Self::Fatal,
    ];

    /// Human readable name used in textual prefixes and journal fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "[[UNDEFINED]]",
            Self::Debug => "DEBUG",
            Self::Verb2 => "VERB2",
            Self::Verb1 => "VERB1",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "-- ERROR --",
            Self::Crit => "!! CRITICAL !!",
            Self::Fatal => "**!! FATAL !!**",
        }
    }

    /// Short identifier accepted by [`LogCategory::from_name`].
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Debug => "debug",
            Self::Verb2 => "verb2",
            Self::Verb1 => "verb1",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Crit => "crit",
            Self::Fatal => "fatal",
        }
    }

    /// Parses a short category identifier, ignoring ASCII case.
    ///
    /// `"warning"` and `"critical"` are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        match lowered.as_str() {
            "warning" => Some(Self::Warn),
            "critical" => Some(Self::Crit),
            other => Self::ALL
                .into_iter()
                .find(|category| category.short_name() == other),
        }
    }

    /// Reports whether the category is more severe than [`LogCategory::Info`].
    pub fn is_above_info(self) -> bool {
        self > Self::Info
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the textual `"<group> <category>: "` prefix used by line-oriented
/// writers when an event carries a group and category.
///
/// ```
/// use logging::{LogCategory, LogGroup, log_prefix};
///
/// assert_eq!(
///     log_prefix(LogGroup::NetCfg, LogCategory::Warn),
///     "Network Configuration WARNING: "
/// );
/// ```
pub fn log_prefix(group: LogGroup, category: LogCategory) -> String {
    format!("{} {}: ", group.as_str(), category.as_str())
}
