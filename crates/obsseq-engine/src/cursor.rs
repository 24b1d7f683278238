//! Merge cursors
//!
//! Provides the [`MergeCursor`] trait shared by leaf and composite
//! traversals, the leaf [`StepCursor`], and the [`Snapshots`] iterator
//! adapter.

use obsseq_config::Config;
use std::iter::FusedIterator;

/// Forward-only, single-pass cursor over configuration steps
///
/// Each call to [`merge_next`](MergeCursor::merge_next) overlays exactly one
/// step onto a caller-owned accumulator. The accumulator is never reset, so
/// items persist until a later step overwrites them.
///
/// # Panics
/// Calling `merge_next` when [`has_next`](MergeCursor::has_next) is false is
/// a protocol violation and panics.
pub trait MergeCursor<V> {
    /// Number of `merge_next` calls still permitted
    fn remaining(&self) -> usize;

    /// Overlay the next step onto `accumulator` and advance
    ///
    /// Only items present in the step are written; every other item of
    /// `accumulator` is left as it was.
    fn merge_next(&mut self, accumulator: &mut Config<V>);

    /// Check if another step is available
    #[inline]
    fn has_next(&self) -> bool {
        self.remaining() > 0
    }

    /// Drive this cursor as an iterator of complete configurations
    ///
    /// `base` seeds the accumulator; each item is a copy of the accumulator
    /// right after one merge.
    #[inline]
    fn snapshots(self, base: Config<V>) -> Snapshots<V, Self>
    where
        Self: Sized,
    {
        Snapshots::new(self, base)
    }
}

impl<V, C: MergeCursor<V> + ?Sized> MergeCursor<V> for Box<C> {
    #[inline]
    fn remaining(&self) -> usize {
        (**self).remaining()
    }

    #[inline]
    fn merge_next(&mut self, accumulator: &mut Config<V>) {
        (**self).merge_next(accumulator);
    }

    #[inline]
    fn has_next(&self) -> bool {
        (**self).has_next()
    }
}

/// Abort on a cursor-protocol violation
#[cold]
#[track_caller]
pub(crate) fn cursor_exhausted() -> ! {
    panic!("merge_next called on an exhausted cursor (check has_next first)")
}

/// Abort when a source's cursor ran dry before its reported step count
#[cold]
#[track_caller]
pub(crate) fn source_miscounted(remaining: usize) -> ! {
    panic!(
        "step source yielded fewer steps than its step_count reported ({remaining} still expected)"
    )
}

/// Cursor over an explicit list of steps
#[derive(Debug, Clone)]
pub struct StepCursor<'a, V> {
    steps: std::slice::Iter<'a, Config<V>>,
}

impl<'a, V> StepCursor<'a, V> {
    /// Create cursor positioned before the first of `steps`
    #[inline]
    #[must_use]
    pub fn new(steps: &'a [Config<V>]) -> Self {
        Self {
            steps: steps.iter(),
        }
    }
}

impl<V: Clone> MergeCursor<V> for StepCursor<'_, V> {
    #[inline]
    fn remaining(&self) -> usize {
        self.steps.len()
    }

    #[track_caller]
    fn merge_next(&mut self, accumulator: &mut Config<V>) {
        match self.steps.next() {
            Some(step) => accumulator.overlay(step),
            None => cursor_exhausted(),
        }
    }
}

/// Iterator of complete configurations produced by a cursor
///
/// Owns the accumulator for the duration of the traversal.
#[derive(Debug)]
pub struct Snapshots<V, C> {
    cursor: C,
    accumulator: Config<V>,
}

impl<V, C: MergeCursor<V>> Snapshots<V, C> {
    /// Wrap `cursor`, seeding the accumulator with `base`
    #[inline]
    #[must_use]
    pub fn new(cursor: C, base: Config<V>) -> Self {
        Self {
            cursor,
            accumulator: base,
        }
    }

    /// Current accumulator state
    #[inline]
    #[must_use]
    pub fn accumulator(&self) -> &Config<V> {
        &self.accumulator
    }

    /// Stop iterating and take the accumulator
    #[inline]
    #[must_use]
    pub fn into_accumulator(self) -> Config<V> {
        self.accumulator
    }
}

impl<V: Clone, C: MergeCursor<V>> Iterator for Snapshots<V, C> {
    type Item = Config<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.has_next() {
            return None;
        }
        self.cursor.merge_next(&mut self.accumulator);
        Some(self.accumulator.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl<V: Clone, C: MergeCursor<V>> ExactSizeIterator for Snapshots<V, C> {}

impl<V: Clone, C: MergeCursor<V>> FusedIterator for Snapshots<V, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use obsseq_config::ItemKey;

    fn key(s: &str) -> ItemKey {
        s.parse().unwrap()
    }

    fn step(items: &[(&str, i32)]) -> Config<i32> {
        items.iter().map(|(k, v)| (key(k), *v)).collect()
    }

    #[test]
    fn step_cursor_counts_down() {
        let steps = vec![step(&[("a", 1)]), step(&[("a", 2)])];
        let mut cursor = StepCursor::new(&steps);
        let mut acc = Config::new();

        assert_eq!(cursor.remaining(), 2);
        cursor.merge_next(&mut acc);
        assert_eq!(cursor.remaining(), 1);
        cursor.merge_next(&mut acc);
        assert!(!cursor.has_next());
        assert_eq!(acc.get(&key("a")), Some(&2));
    }

    #[test]
    fn step_cursor_leaves_unnamed_items() {
        let steps = vec![step(&[("tcs:p", 10)])];
        let mut acc = step(&[("inst:filter", 1), ("tcs:p", 0)]);
        StepCursor::new(&steps).merge_next(&mut acc);
        assert_eq!(acc, step(&[("inst:filter", 1), ("tcs:p", 10)]));
    }

    #[test]
    fn empty_step_cursor_has_no_next() {
        let steps: Vec<Config<i32>> = Vec::new();
        assert!(!StepCursor::new(&steps).has_next());
    }

    #[test]
    #[should_panic(expected = "exhausted cursor")]
    fn merge_past_end_panics() {
        let steps = vec![step(&[("a", 1)])];
        let mut cursor = StepCursor::new(&steps);
        let mut acc = Config::new();
        cursor.merge_next(&mut acc);
        cursor.merge_next(&mut acc);
    }

    #[test]
    fn snapshots_accumulate() {
        let steps = vec![step(&[("a", 1)]), step(&[("b", 2)]), step(&[("a", 3)])];
        let snaps = StepCursor::new(&steps).snapshots(step(&[("base", 0)]));
        assert_eq!(snaps.len(), 3);

        let all: Vec<Config<i32>> = snaps.collect();
        assert_eq!(
            all,
            vec![
                step(&[("base", 0), ("a", 1)]),
                step(&[("base", 0), ("a", 1), ("b", 2)]),
                step(&[("base", 0), ("a", 3), ("b", 2)]),
            ]
        );
    }

    #[test]
    fn boxed_cursor_delegates() {
        let steps = vec![step(&[("a", 1)])];
        let mut boxed: Box<dyn MergeCursor<i32> + '_> = Box::new(StepCursor::new(&steps));
        let mut acc = Config::new();
        assert!(boxed.has_next());
        boxed.merge_next(&mut acc);
        assert!(!boxed.has_next());
    }
}
