//! crates/logging/src/event.rs
//! A single log event as handed to a writer.

use crate::levels::{LogCategory, LogGroup};

/// Group, category, message and optional session token of one event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEvent {
    /// Subsystem the event originates from.
    pub group: LogGroup,
    /// Severity of the event.
    pub category: LogCategory,
    /// Primary message text.
    pub message: String,
    /// Session correlation token; empty when the event is not tied to one.
    pub session_token: String,
}

impl LogEvent {
    /// Creates an event without a session token.
    pub fn new(group: LogGroup, category: LogCategory, message: impl Into<String>) -> Self {
        Self {
            group,
            category,
            message: message.into(),
            session_token: String::new(),
        }
    }

    /// Attaches a session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = token.into();
        self
    }

    /// Display name of the event's group.
    pub const fn group_name(&self) -> &'static str {
        self.group.as_str()
    }

    /// Display name of the event's category.
    pub const fn category_name(&self) -> &'static str {
        self.category.as_str()
    }

    /// Whether the event carries a non-empty session token.
    pub fn has_session_token(&self) -> bool {
        !self.session_token.is_empty()
    }
}
