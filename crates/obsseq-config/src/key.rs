//! Hierarchical item keys
//!
//! Provides [`ItemKey`] for addressing individual configuration items,
//! e.g. `instrument:filter` or `telescope:p`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator between key segments in the textual form.
pub const SEPARATOR: char = ':';

/// Key identifying one configuration item
///
/// A non-empty path of string segments. Keys compare by their full path, so
/// `instrument:filter` and `instrument:filter:name` are distinct items even
/// though the first is a parent of the second.
///
/// # Examples
/// - `["instrument", "filter"]` → `instrument:filter`
/// - `["telescope", "p"]` → `telescope:p`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(Vec<String>);

impl ItemKey {
    /// Create key from segments
    ///
    /// # Errors
    /// Returns error if there are no segments or any segment is empty
    pub fn new<I, S>(segments: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(KeyError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(KeyError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// Create a top-level key from a single segment
    ///
    /// # Errors
    /// Returns error if the segment is empty
    pub fn single(segment: impl Into<String>) -> Result<Self, KeyError> {
        let segment: String = segment.into();
        Self::new([segment])
    }

    /// Get key segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (always at least one)
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Parent key, `None` for a top-level key
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Last segment, the item's own name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// First segment, usually the owning system (`instrument`, `telescope`)
    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        self.0.first().map_or("", String::as_str)
    }

    /// Append a segment, returning the child key
    ///
    /// # Errors
    /// Returns error if the segment is empty
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, KeyError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(KeyError::EmptySegment);
        }
        let mut new = self.clone();
        new.0.push(segment);
        Ok(new)
    }

    /// Check if this key is equal to or an ancestor of `other`
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// Check if this key is a strict ancestor of `other`
    ///
    /// `instrument` is an ancestor of `instrument:filter`, but not of itself.
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(seg)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ItemKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyError::Empty);
        }
        Self::new(s.split(SEPARATOR))
    }
}

impl TryFrom<&str> for ItemKey {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for ItemKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors related to item keys
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Key has no segments
    #[error("item key is empty")]
    Empty,

    /// Key contains an empty segment, e.g. `instrument::filter`
    #[error("item key contains empty segment")]
    EmptySegment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ItemKey {
        s.parse().unwrap()
    }

    #[test]
    fn key_from_str_splits_on_colon() {
        let k = key("instrument:filter");
        assert_eq!(k.segments(), &["instrument", "filter"]);
        assert_eq!(k.depth(), 2);
        assert_eq!(k.root(), "instrument");
        assert_eq!(k.name(), "filter");
    }

    #[test]
    fn key_display_round_trips() {
        assert_eq!(key("a:b:c").to_string(), "a:b:c");
        assert_eq!(key("single").to_string(), "single");
    }

    #[test]
    fn key_rejects_empty_input() {
        assert_eq!("".parse::<ItemKey>(), Err(KeyError::Empty));
        assert_eq!(ItemKey::new(Vec::<String>::new()), Err(KeyError::Empty));
    }

    #[test]
    fn key_rejects_empty_segment() {
        assert_eq!("a::b".parse::<ItemKey>(), Err(KeyError::EmptySegment));
        assert_eq!(":a".parse::<ItemKey>(), Err(KeyError::EmptySegment));
        assert_eq!(key("a").child(""), Err(KeyError::EmptySegment));
    }

    #[test]
    fn key_parent() {
        assert_eq!(key("a:b:c").parent(), Some(key("a:b")));
        assert!(key("a").parent().is_none());
    }

    #[test]
    fn key_child() {
        assert_eq!(key("tcs").child("p").unwrap(), key("tcs:p"));
    }

    #[test]
    fn key_ancestry() {
        let parent = key("inst");
        let child = key("inst:filter");
        let other = key("instrument:filter");

        assert!(parent.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&parent));
        assert!(!parent.is_ancestor_of(&parent));
        assert!(parent.is_prefix_of(&parent));
        // Segment-wise, not character-wise
        assert!(!parent.is_prefix_of(&other));
    }

    #[test]
    fn key_ordering_puts_parent_before_children() {
        let mut keys = vec![key("a:c"), key("a:b:x"), key("a"), key("a:b")];
        keys.sort();
        assert_eq!(keys, vec![key("a"), key("a:b"), key("a:b:x"), key("a:c")]);
    }

    #[test]
    fn key_serde_uses_string_form() {
        let json = serde_json::to_string(&key("tcs:p")).unwrap();
        assert_eq!(json, "\"tcs:p\"");
        let back: ItemKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("tcs:p"));
        assert!(serde_json::from_str::<ItemKey>("\"a::b\"").is_err());
    }
}
