//! Configuration records
//!
//! Provides [`Config`], the key→value record that flows through sequence
//! expansion, either as a partial step (only the changes at one position)
//! or as the fully resolved accumulator.

use crate::key::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Mutable mapping from [`ItemKey`] to an opaque value
///
/// The value type is supplied by the caller; records only copy and compare
/// values, never interpret them. Entries enumerate in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config<V> {
    items: BTreeMap<ItemKey, V>,
}

impl<V> Default for Config<V> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<V> Config<V> {
    /// Create empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if record has no items
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all items
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check if an item is present
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.items.contains_key(key)
    }

    /// Get the value of an item
    #[inline]
    #[must_use]
    pub fn get(&self, key: &ItemKey) -> Option<&V> {
        self.items.get(key)
    }

    /// Set an item, returning the previous value
    #[inline]
    pub fn put(&mut self, key: ItemKey, value: V) -> Option<V> {
        self.items.insert(key, value)
    }

    /// Remove an item, returning its value
    #[inline]
    pub fn remove(&mut self, key: &ItemKey) -> Option<V> {
        self.items.remove(key)
    }

    /// Keys of all items, in order
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &ItemKey> {
        self.items.keys()
    }

    /// All items, in key order
    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, ItemKey, V> {
        self.items.iter()
    }

    /// Keys of `parent` and every item below it
    pub fn keys_under<'a>(&'a self, parent: &'a ItemKey) -> impl Iterator<Item = &'a ItemKey> {
        self.entries_under(parent).map(|(k, _)| k)
    }

    /// Items keyed by `parent` or one of its descendants
    ///
    /// Keys order parents before their descendants, so these items form one
    /// contiguous range starting at `parent`.
    pub fn entries_under<'a>(
        &'a self,
        parent: &'a ItemKey,
    ) -> impl Iterator<Item = (&'a ItemKey, &'a V)> {
        self.items
            .range(parent..)
            .take_while(move |(k, _)| parent.is_prefix_of(k))
    }

    /// Remove `parent` and every item below it
    pub fn remove_under(&mut self, parent: &ItemKey) {
        self.items.retain(|k, _| !parent.is_prefix_of(k));
    }

    /// Remove the items at or below any of `parents`
    pub fn remove_under_any(&mut self, parents: &[ItemKey]) {
        self.items
            .retain(|k, _| !parents.iter().any(|p| p.is_prefix_of(k)));
    }

    /// Keep only `parent` and the items below it
    pub fn retain_under(&mut self, parent: &ItemKey) {
        self.items.retain(|k, _| parent.is_prefix_of(k));
    }

    /// Keep only the items at or below one of `parents`
    pub fn retain_under_any(&mut self, parents: &[ItemKey]) {
        self.items
            .retain(|k, _| parents.iter().any(|p| p.is_prefix_of(k)));
    }
}

impl<V: Clone> Config<V> {
    /// Copy every item of `source` into this record
    ///
    /// Colliding keys take the value from `source`; items not named by
    /// `source` are left untouched.
    pub fn overlay(&mut self, source: &Config<V>) {
        for (key, value) in &source.items {
            match self.items.get_mut(key) {
                Some(slot) => slot.clone_from(value),
                None => {
                    self.items.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// New record holding `parent` and the items below it
    #[must_use]
    pub fn subset(&self, parent: &ItemKey) -> Self {
        self.entries_under(parent)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// New record holding the items at or below any of `parents`
    #[must_use]
    pub fn subset_any(&self, parents: &[ItemKey]) -> Self {
        self.items
            .iter()
            .filter(|(k, _)| parents.iter().any(|p| p.is_prefix_of(k)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<V: PartialEq> Config<V> {
    /// Remove items whose key and value both appear in `other`
    ///
    /// Items with the same key but a different value are kept.
    pub fn remove_matching(&mut self, other: &Config<V>) {
        self.items.retain(|k, v| other.get(k) != Some(&*v));
    }

    /// Keep only items whose key and value both appear in `other`
    pub fn retain_matching(&mut self, other: &Config<V>) {
        self.items.retain(|k, v| other.get(k) == Some(&*v));
    }

    /// Check that every item of `template` is present here with an equal value
    #[must_use]
    pub fn matches(&self, template: &Config<V>) -> bool {
        template
            .items
            .iter()
            .all(|(k, v)| self.items.get(k) == Some(v))
    }
}

impl<V> FromIterator<(ItemKey, V)> for Config<V> {
    fn from_iter<I: IntoIterator<Item = (ItemKey, V)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<V> Extend<(ItemKey, V)> for Config<V> {
    fn extend<I: IntoIterator<Item = (ItemKey, V)>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, V> IntoIterator for &'a Config<V> {
    type Item = (&'a ItemKey, &'a V);
    type IntoIter = btree_map::Iter<'a, ItemKey, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<V> IntoIterator for Config<V> {
    type Item = (ItemKey, V);
    type IntoIter = btree_map::IntoIter<ItemKey, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
