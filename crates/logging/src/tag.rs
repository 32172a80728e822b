//! crates/logging/src/tag.rs
//! Renderable tags that can be attached to an event as metadata.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// A value with its own string rendering and encapsulation policy.
///
/// Metadata entries capture an owned clone of the tag when they are added, so
/// implementors must be cheap to clone and independent of their creator's
/// lifetime.
pub trait RenderTag: fmt::Debug + Send + Sync {
    /// Renders the tag, wrapped in its encapsulation markers when requested.
    fn render(&self, encapsulate: bool) -> String;

    /// Encapsulation used when the tag is rendered through `Display`-style
    /// composite output.
    fn encapsulate(&self) -> bool {
        true
    }
}

/// Identifies the sender of a log event by a stable hash of its origin.
///
/// ```
/// use logging::{LogTag, RenderTag};
///
/// let tag = LogTag::new(":1.42", "net.openvpn.v3.backends");
/// assert!(tag.render(true).starts_with("{tag:"));
/// assert_eq!(tag.render(false), tag.hash().to_string());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogTag {
    tag: String,
    hash: u64,
    encapsulate: bool,
}

impl LogTag {
    /// Builds a tag for the given sender and interface names.
    pub fn new(sender: &str, interface: &str) -> Self {
        let tag = format!("[{sender}/{interface}]");
        let mut hasher = FxHasher::default();
        tag.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            tag,
            encapsulate: true,
        }
    }

    /// Overrides the default encapsulation policy.
    pub fn with_encapsulation(mut self, encapsulate: bool) -> Self {
        self.encapsulate = encapsulate;
        self
    }

    /// The `[sender/interface]` text the hash was computed from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The stable hash identifying this tag.
    pub const fn hash(&self) -> u64 {
        self.hash
    }
}

impl RenderTag for LogTag {
    fn render(&self, encapsulate: bool) -> String {
        if encapsulate {
            format!("{{tag:{}}}", self.hash)
        } else {
            self.hash.to_string()
        }
    }

    fn encapsulate(&self) -> bool {
        self.encapsulate
    }
}

impl fmt::Display for LogTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.encapsulate))
    }
}
