//! Materialized configuration sequences
//!
//! Provides [`ConfigSequence`], the linear list of fully resolved
//! configurations produced by driving a sequence to completion.

use crate::config::Config;
use crate::diff;
use crate::key::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

/// Ordered list of complete configurations, one per step
///
/// Every step holds all items in effect at that point, including items
/// inherited from earlier steps. [`ConfigSequence::compact_view`] recovers
/// the per-step changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSequence<V> {
    steps: Vec<Config<V>>,
}

impl<V> Default for ConfigSequence<V> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<V> ConfigSequence<V> {
    /// Create empty sequence
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from complete snapshots, in order
    #[inline]
    #[must_use]
    pub fn from_snapshots(steps: Vec<Config<V>>) -> Self {
        Self { steps }
    }

    /// Append a complete snapshot
    #[inline]
    pub fn push_snapshot(&mut self, snapshot: Config<V>) {
        self.steps.push(snapshot);
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no steps
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Remove all steps
    #[inline]
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Complete configuration at `index`
    #[inline]
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Config<V>> {
        self.steps.get(index)
    }

    /// All complete configurations
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Config<V>] {
        &self.steps
    }

    /// Iterate complete configurations
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Config<V>> {
        self.steps.iter()
    }

    /// Consume into the complete configurations
    #[inline]
    #[must_use]
    pub fn into_snapshots(self) -> Vec<Config<V>> {
        self.steps
    }

    /// Value of `key` at `step`, `None` if the step or the item is absent
    #[inline]
    #[must_use]
    pub fn item_value(&self, step: usize, key: &ItemKey) -> Option<&V> {
        self.steps.get(step).and_then(|c| c.get(key))
    }

    /// Value of `key` at each step, `None` where the item is not yet set
    #[must_use]
    pub fn item_values(&self, key: &ItemKey) -> Vec<Option<&V>> {
        self.steps.iter().map(|c| c.get(key)).collect()
    }
}

impl<V: Clone> ConfigSequence<V> {
    /// Append a step holding only changes
    ///
    /// The new step is the previous step with `changes` overlaid.
    pub fn push_changes(&mut self, changes: &Config<V>) {
        let mut next = self.steps.last().cloned().unwrap_or_default();
        next.overlay(changes);
        self.steps.push(next);
    }

    /// Steps `range.start..range.end` as a new sequence
    ///
    /// # Errors
    /// Returns error if the range is reversed or extends past the end
    pub fn sub_sequence(&self, range: Range<usize>) -> Result<Self, SequenceError> {
        if range.start > range.end || range.end > self.steps.len() {
            return Err(SequenceError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.steps.len(),
            });
        }
        Ok(Self::from_snapshots(self.steps[range].to_vec()))
    }

    /// Steps that satisfy `predicate`, in order
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&Config<V>) -> bool,
    {
        Self::from_snapshots(self.steps.iter().filter(|c| predicate(*c)).cloned().collect())
    }
}

impl<V: Clone + PartialEq> ConfigSequence<V> {
    /// Per-step changes
    ///
    /// The first entry is the complete first step; each later entry holds
    /// only the items whose value differs from the step before.
    #[must_use]
    pub fn compact_view(&self) -> Vec<Config<V>> {
        let mut previous: Option<&Config<V>> = None;
        self.steps
            .iter()
            .map(|step| {
                let mut changes = step.clone();
                if let Some(prev) = previous {
                    changes.remove_matching(prev);
                }
                previous = Some(step);
                changes
            })
            .collect()
    }

    /// Insert a step holding only changes before `index`
    ///
    /// The inserted items carry forward into every later step that does not
    /// change them itself.
    ///
    /// # Errors
    /// Returns error if `index` is past the end
    pub fn insert_changes(
        &mut self,
        index: usize,
        changes: &Config<V>,
    ) -> Result<(), SequenceError> {
        self.check_index(index, self.steps.len() + 1)?;
        if index == self.steps.len() {
            self.push_changes(changes);
        } else {
            self.edit_changes(|compact| compact.insert(index, changes.clone()));
        }
        Ok(())
    }

    /// Remove the step at `index`, returning its complete configuration
    ///
    /// Later steps lose whatever they only inherited from the removed step.
    ///
    /// # Errors
    /// Returns error if `index` is out of bounds
    pub fn remove_step(&mut self, index: usize) -> Result<Config<V>, SequenceError> {
        self.check_index(index, self.steps.len())?;
        let removed = self.steps[index].clone();
        if index + 1 == self.steps.len() {
            self.steps.pop();
        } else {
            self.edit_changes(|compact| {
                compact.remove(index);
            });
        }
        Ok(removed)
    }

    /// Replace the changes made at `index`
    ///
    /// Items inherited from earlier steps stay in effect; items introduced
    /// at this step and missing from `changes` disappear.
    ///
    /// # Errors
    /// Returns error if `index` is out of bounds
    pub fn set_changes(
        &mut self,
        index: usize,
        changes: &Config<V>,
    ) -> Result<(), SequenceError> {
        self.check_index(index, self.steps.len())?;
        self.edit_changes(|compact| compact[index] = changes.clone());
        Ok(())
    }

    fn check_index(&self, index: usize, bound: usize) -> Result<(), SequenceError> {
        if index < bound {
            Ok(())
        } else {
            Err(SequenceError::StepOutOfBounds {
                index,
                len: self.steps.len(),
            })
        }
    }

    /// Edit the per-step changes, then rebuild every snapshot from them
    fn edit_changes<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Vec<Config<V>>),
    {
        let mut compact = self.compact_view();
        edit(&mut compact);
        self.steps.clear();
        for changes in &compact {
            self.push_changes(changes);
        }
    }

    /// Keys whose value changes over the course of the sequence
    ///
    /// Items introduced after the first step count as changed.
    #[must_use]
    pub fn iterated_keys(&self) -> BTreeSet<ItemKey> {
        diff::iterated_keys(&self.compact_view())
    }

    /// Keys of the first step whose value never changes
    #[must_use]
    pub fn static_keys(&self) -> BTreeSet<ItemKey> {
        let Some(first) = self.steps.first() else {
            return BTreeSet::new();
        };
        let iterated = self.iterated_keys();
        first
            .keys()
            .filter(|k| !iterated.contains(*k))
            .cloned()
            .collect()
    }

    /// Distinct values of `key`, in order of first appearance
    ///
    /// Includes `None` when the item is only introduced after the first step.
    #[must_use]
    pub fn distinct_values(&self, key: &ItemKey) -> Vec<Option<&V>> {
        let mut distinct: Vec<Option<&V>> = Vec::new();
        for value in self.item_values(key) {
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        distinct
    }

    /// Index of the first step that [`Config::matches`] `template`
    #[must_use]
    pub fn position_matching(&self, template: &Config<V>) -> Option<usize> {
        self.steps.iter().position(|c| c.matches(template))
    }

    /// First step that [`Config::matches`] `template`
    #[must_use]
    pub fn first_matching(&self, template: &Config<V>) -> Option<&Config<V>> {
        self.position_matching(template).map(|i| &self.steps[i])
    }
}

impl<V> FromIterator<Config<V>> for ConfigSequence<V> {
    fn from_iter<I: IntoIterator<Item = Config<V>>>(iter: I) -> Self {
        Self::from_snapshots(iter.into_iter().collect())
    }
}

impl<'a, V> IntoIterator for &'a ConfigSequence<V> {
    type Item = &'a Config<V>;
    type IntoIter = std::slice::Iter<'a, Config<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Errors related to configuration sequences
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// Requested range does not fit the sequence
    #[error("range {start}..{end} out of bounds for sequence of {len} steps")]
    RangeOutOfBounds {
        /// Range start
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Sequence length
        len: usize,
    },

    /// Step index does not exist
    #[error("step {index} out of bounds for sequence of {len} steps")]
    StepOutOfBounds {
        /// Requested step
        index: usize,
        /// Sequence length
        len: usize,
    },
}
