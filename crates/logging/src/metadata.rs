//! crates/logging/src/metadata.rs
//! Key/value metadata side-channel attached to a pending log event.

use std::fmt;
use std::sync::Arc;

use crate::tag::RenderTag;

/// Payload carried by a [`MetadataValue`].
#[derive(Clone, Debug)]
pub enum MetaKind {
    /// Literal text.
    Text(String),
    /// A tag captured at insertion time.
    Tag(Arc<dyn RenderTag>),
}

/// One labeled metadata entry.
#[derive(Clone, Debug)]
pub struct MetadataValue {
    label: String,
    kind: MetaKind,
    skip: bool,
}

impl MetadataValue {
    /// Creates a text entry.
    pub fn text(label: impl Into<String>, value: impl Into<String>, skip: bool) -> Self {
        Self {
            label: label.into(),
            kind: MetaKind::Text(value.into()),
            skip,
        }
    }

    /// Creates a tag entry holding an owned clone of `tag`.
    pub fn tag<T>(label: impl Into<String>, tag: &T, skip: bool) -> Self
    where
        T: RenderTag + Clone + 'static,
    {
        Self {
            label: label.into(),
            kind: MetaKind::Tag(Arc::new(tag.clone())),
            skip,
        }
    }

    /// The entry's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The entry's payload.
    pub const fn kind(&self) -> &MetaKind {
        &self.kind
    }

    /// Whether the entry is excluded from rendering and exported records.
    pub const fn skip(&self) -> bool {
        self.skip
    }

    /// Renders the value; tags use `encapsulate_tag`, text is returned as is.
    pub fn value(&self, encapsulate_tag: bool) -> String {
        match &self.kind {
            MetaKind::Text(text) => text.clone(),
            MetaKind::Tag(tag) => tag.render(encapsulate_tag),
        }
    }

    fn display_value(&self) -> String {
        match &self.kind {
            MetaKind::Text(text) => text.clone(),
            MetaKind::Tag(tag) => tag.render(tag.encapsulate()),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skip {
            return Ok(());
        }
        write!(f, "{}={}", self.label, self.display_value())
    }
}

/// Ordered collection of [`MetadataValue`] entries.
///
/// Insertion order is preserved and duplicate labels are allowed; lookups
/// return the first match. `Display` produces the composite
/// `label=value, label=value` rendering used by line-oriented writers.
///
/// ```
/// use logging::MetadataSet;
///
/// let mut set = MetadataSet::new();
/// set.add_meta("user", "alice", false);
/// set.add_meta("secret", "hunter2", true);
/// set.add_meta("pid", "42", false);
///
/// assert_eq!(set.to_string(), "user=alice, pid=42");
/// assert_eq!(set.meta_value_default("pid"), "42 ");
/// assert_eq!(set.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MetadataSet {
    entries: Vec<MetadataValue>,
}

impl MetadataSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a text entry.
    pub fn add_meta(&mut self, label: impl Into<String>, value: impl Into<String>, skip: bool) {
        self.entries.push(MetadataValue::text(label, value, skip));
    }

    /// Appends a tag entry.
    pub fn add_meta_tag<T>(&mut self, label: impl Into<String>, tag: &T, skip: bool)
    where
        T: RenderTag + Clone + 'static,
    {
        self.entries.push(MetadataValue::tag(label, tag, skip));
    }

    /// Appends a pre-built entry.
    pub fn push(&mut self, value: MetadataValue) {
        self.entries.push(value);
    }

    /// Returns the first entry labeled `label` rendered with `postfix`
    /// appended, or an empty string when no entry matches.
    pub fn meta_value(&self, label: &str, encapsulate_tag: bool, postfix: &str) -> String {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| {
                let mut value = entry.value(encapsulate_tag);
                value.push_str(postfix);
                value
            })
            .unwrap_or_default()
    }

    /// [`meta_value`](Self::meta_value) with encapsulated tags and a single
    /// space postfix.
    pub fn meta_value_default(&self, label: &str) -> String {
        self.meta_value(label, true, " ")
    }

    /// Exports every non-skipped entry as a `LABEL=value` record.
    pub fn records(&self, upcase_label: bool, encapsulate_tag: bool) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !entry.skip)
            .map(|entry| {
                let label = if upcase_label {
                    entry.label.to_ascii_uppercase()
                } else {
                    entry.label.clone()
                };
                format!("{label}={}", entry.value(encapsulate_tag))
            })
            .collect()
    }

    /// Iterates over every entry, skipped ones included.
    pub fn iter(&self) -> std::slice::Iter<'_, MetadataValue> {
        self.entries.iter()
    }

    /// Number of entries, skipped ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for MetadataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in self.entries.iter().filter(|entry| !entry.skip) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MetadataSet {
    type Item = &'a MetadataValue;
    type IntoIter = std::slice::Iter<'a, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
