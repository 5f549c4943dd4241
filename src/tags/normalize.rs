//! Tag parsing, normalization and serialization.
//!
//! Stored field values are plain comma-separated text with no escaping:
//!
//! ```text
//! Test,Vip,Another
//! ```
//!
//! Every tag read from a field goes through the same pipeline: split on
//! commas, trim, drop empties, convert to sentence case, drop tags that are
//! longer than the configured maximum, then drop case-insensitive duplicates
//! (first occurrence wins).

use std::fmt;

use tracing::trace;

/// Separator between tags in the persisted field value.
pub const TAG_SEPARATOR: char = ',';

/// Normalize a single tag to sentence case.
///
/// Surrounding whitespace and byte-order marks are trimmed, the whole string is lower-cased and
/// then only the first character is upper-cased. Letters after the first
/// position always end up lower-case, so `"McDonald"` becomes `"Mcdonald"`.
///
/// A first character whose upper-case form expands to several characters
/// (for example `ß`) is left lower-case so that normalizing twice gives the
/// same result as normalizing once.
pub fn normalize_tag(input: &str) -> String {
    let lowered = input
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase();
    let mut chars = lowered.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let mut normalized = String::with_capacity(lowered.len());
    match (upper.next(), upper.next()) {
        (Some(single), None) => normalized.push(single),
        _ => normalized.push(first),
    }
    normalized.push_str(chars.as_str());
    normalized
}

/// Length of a tag as counted against `max_tag_length`.
///
/// Counts characters, not bytes, so accented tags are not penalized.
pub fn tag_length(tag: &str) -> usize {
    tag.chars().count()
}

/// Case-insensitive tag equality.
pub fn same_tag(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// An ordered list of unique, normalized tags.
///
/// Order is insertion order and decides which chips are shown before the
/// collapse limit. No two entries compare equal case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw field value.
    ///
    /// Tags longer than `max_tag_length` are dropped without error because
    /// this path only ever sees previously stored data.
    pub fn parse(raw: &str, max_tag_length: usize) -> Self {
        let mut list = Self::new();
        for piece in raw.split(TAG_SEPARATOR) {
            let tag = normalize_tag(piece);
            if tag.is_empty() {
                continue;
            }
            if tag_length(&tag) > max_tag_length {
                trace!(tag = %tag, max_tag_length, "Dropping oversized stored tag");
                continue;
            }
            if list.contains(&tag) {
                trace!(tag = %tag, "Dropping duplicate stored tag");
                continue;
            }
            list.tags.push(tag);
        }
        list
    }

    /// Serialize back to the persisted field format.
    pub fn serialize(&self) -> String {
        self.tags.join(TAG_SEPARATOR.to_string().as_str())
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Get a tag by position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    /// Iterate over the tags in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// View the tags as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Check for a case-insensitive match.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| same_tag(existing, tag))
    }

    /// Append an already validated tag.
    pub(crate) fn push(&mut self, tag: String) {
        self.tags.push(tag);
    }

    /// Remove every case-insensitive match of `tag`.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn remove(&mut self, tag: &str) -> usize {
        let before = self.tags.len();
        self.tags.retain(|existing| !same_tag(existing, tag));
        before - self.tags.len()
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
