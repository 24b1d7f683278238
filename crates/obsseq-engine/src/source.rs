//! Step sources
//!
//! Provides the [`StepSource`] trait and [`DefaultStepSource`], a source
//! backed by an explicit list of steps.

use crate::cursor::{MergeCursor, StepCursor};
use obsseq_config::{iterated_keys, Config, ItemKey};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Ordered producer of configuration steps
///
/// Each step holds only the changes to apply at that position. A source is
/// immutable while cursors exist, so `step_count` always equals the number
/// of merges a fresh cursor allows.
///
/// Implementations must keep the two in agreement: a
/// [`NodeCursor`](crate::NodeCursor) trusts `step_count` and panics if a
/// source's cursor runs out first.
pub trait StepSource<V>: Send + Sync + Debug {
    /// Number of steps
    fn step_count(&self) -> usize;

    /// Keys whose value varies across the steps
    ///
    /// Informational; expansion does not consult it.
    fn iterated_keys(&self) -> BTreeSet<ItemKey>;

    /// New cursor positioned before the first step
    fn cursor(&self) -> Box<dyn MergeCursor<V> + '_>;
}

/// Step source over a fixed list of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultStepSource<V> {
    steps: Vec<Config<V>>,
}

impl<V> Default for DefaultStepSource<V> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<V> DefaultStepSource<V> {
    /// Create source over `steps`, in order
    #[inline]
    #[must_use]
    pub fn new(steps: Vec<Config<V>>) -> Self {
        Self { steps }
    }

    /// Replace every step
    #[inline]
    pub fn set_steps(&mut self, steps: Vec<Config<V>>) {
        self.steps = steps;
    }

    /// Current steps
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Config<V>] {
        &self.steps
    }
}

impl<V> FromIterator<Config<V>> for DefaultStepSource<V> {
    fn from_iter<I: IntoIterator<Item = Config<V>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<V> StepSource<V> for DefaultStepSource<V>
where
    V: Clone + PartialEq + Send + Sync + Debug,
{
    #[inline]
    fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn iterated_keys(&self) -> BTreeSet<ItemKey> {
        iterated_keys(&self.steps)
    }

    fn cursor(&self) -> Box<dyn MergeCursor<V> + '_> {
        Box::new(StepCursor::new(&self.steps))
    }
}
