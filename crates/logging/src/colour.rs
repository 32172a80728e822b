//! crates/logging/src/colour.rs
//! Colour policies used by [`ColourStreamWriter`](crate::ColourStreamWriter).

use std::fmt;

use crate::levels::{LogCategory, LogGroup};

/// How a colour writer picks the colour of a line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColourMode {
    /// No colours.
    #[default]
    None,
    /// Colour by log group, highlighting categories above `Info`.
    ByGroup,
    /// Colour by log category.
    ByCategory,
}

impl ColourMode {
    /// Parses `none`, `group` or `category`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" | "off" => Some(Self::None),
            "group" | "by-group" => Some(Self::ByGroup),
            "category" | "by-category" => Some(Self::ByCategory),
            _ => None,
        }
    }

    /// Canonical name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ByGroup => "group",
            Self::ByCategory => "category",
        }
    }
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of colour escape sequences.
pub trait ColourPolicy: fmt::Debug {
    /// Selected colouring mode.
    fn mode(&self) -> ColourMode;

    /// Sequence selecting the colour of `group`.
    fn colour_by_group(&self, group: LogGroup) -> String;

    /// Sequence selecting the colour of `category`.
    fn colour_by_category(&self, category: LogCategory) -> String;

    /// Sequence restoring the terminal's default attributes.
    fn reset(&self) -> String;
}

const RESET: &str = "\x1b[0m";

/// ANSI terminal colour table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnsiColours {
    mode: ColourMode,
}

impl AnsiColours {
    /// Creates a table operating in `mode`.
    pub const fn new(mode: ColourMode) -> Self {
        Self { mode }
    }
}

impl ColourPolicy for AnsiColours {
    fn mode(&self) -> ColourMode {
        self.mode
    }

    fn colour_by_group(&self, group: LogGroup) -> String {
        let code = match group {
            LogGroup::Undefined => "\x1b[0;37m",
            LogGroup::MasterProc => "\x1b[1;37;44m",
            LogGroup::ConfigMgr => "\x1b[0;34m",
            LogGroup::SessionMgr => "\x1b[0;36m",
            LogGroup::BackendStart => "\x1b[1;36m",
            LogGroup::Logger => "\x1b[0;35m",
            LogGroup::BackendProc => "\x1b[0;32m",
            LogGroup::Client => "\x1b[1;32m",
            LogGroup::NetCfg => "\x1b[0;33m",
            LogGroup::ExtAuth => "\x1b[1;35m",
            LogGroup::System => "\x1b[1;34m",
        };
        code.to_owned()
    }

    fn colour_by_category(&self, category: LogCategory) -> String {
        let code = match category {
            LogCategory::Undefined | LogCategory::Info => RESET,
            LogCategory::Debug => "\x1b[0;34m",
            LogCategory::Verb2 => "\x1b[0;37m",
            LogCategory::Verb1 => "\x1b[1;37m",
            LogCategory::Warn => "\x1b[1;33m",
            LogCategory::Error => "\x1b[1;31m",
            LogCategory::Crit => "\x1b[1;37;41m",
            LogCategory::Fatal => "\x1b[1;33;41m",
        };
        code.to_owned()
    }

    fn reset(&self) -> String {
        RESET.to_owned()
    }
}
