//! Sequence trees
//!
//! Provides [`SequenceNode`], which nests step sources into a tree, and
//! [`NodeCursor`], the depth-first traversal that expands a tree into one
//! linear list of configurations.
//!
//! # Traversal
//!
//! For each step of a node's own source (or one pass without an overlay if
//! the node has none), the own step is overlaid, then every child is driven
//! to completion in attachment order, each child step yielding one
//! configuration. A node without children yields once per own step.
//!
//! Own steps therefore vary slowest, siblings are concatenated rather than
//! interleaved, and the accumulator carries state across every boundary.

use crate::config::ExpansionConfig;
use crate::cursor::{cursor_exhausted, source_miscounted, MergeCursor};
use crate::error::ExpansionError;
use crate::source::StepSource;
use obsseq_config::{Config, ConfigSequence};
use std::fmt::{self, Debug, Formatter};

/// Node of a sequence tree
///
/// Holds an optional own [`StepSource`] and an ordered list of children.
/// Trees are built bottom-up: [`add_child`](Self::add_child) takes ownership,
/// so a child can no longer change once attached.
pub struct SequenceNode<V> {
    source: Option<Box<dyn StepSource<V>>>,
    children: Vec<SequenceNode<V>>,
    /// Sum of the children's step counts, kept as children are attached
    children_steps: usize,
}

impl<V> Default for SequenceNode<V> {
    fn default() -> Self {
        Self {
            source: None,
            children: Vec::new(),
            children_steps: 0,
        }
    }
}

impl<V> SequenceNode<V> {
    /// Create node with no source and no children
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create node iterating over `source`
    #[inline]
    #[must_use]
    pub fn with_source(source: impl StepSource<V> + 'static) -> Self {
        let mut node = Self::new();
        node.set_source(source);
        node
    }

    /// Install (or replace) the node's own source
    #[inline]
    pub fn set_source(&mut self, source: impl StepSource<V> + 'static) {
        self.source = Some(Box::new(source));
    }

    /// Remove the node's own source
    #[inline]
    pub fn clear_source(&mut self) -> Option<Box<dyn StepSource<V>>> {
        self.source.take()
    }

    /// The node's own source, if any
    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<&dyn StepSource<V>> {
        self.source.as_deref()
    }

    /// Append a child after the existing ones
    pub fn add_child(&mut self, child: SequenceNode<V>) {
        self.children_steps = self.children_steps.saturating_add(child.step_count());
        self.children.push(child);
    }

    /// Builder form of [`add_child`](Self::add_child)
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: SequenceNode<V>) -> Self {
        self.add_child(child);
        self
    }

    /// Children in attachment order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[SequenceNode<V>] {
        &self.children
    }

    /// Check if the node has neither a source nor children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.children.is_empty()
    }

    /// Number of configurations a cursor over this node yields
    ///
    /// A node without a source counts as one pass so its children still
    /// enumerate. A source that is present but has zero steps suppresses the
    /// node entirely, children included.
    #[must_use]
    pub fn step_count(&self) -> usize {
        let own = self.source.as_ref().map_or(1, |s| s.step_count());
        match (self.source.is_some(), self.children.is_empty()) {
            (false, true) => 0,
            (true, true) => own,
            (_, false) => own.saturating_mul(self.children_steps),
        }
    }

    /// Number of levels in the tree rooted here (a lone node has depth 1)
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// New cursor positioned before the first configuration
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> NodeCursor<'_, V> {
        NodeCursor::new(self)
    }
}

impl<V: Clone> SequenceNode<V> {
    /// Expand into complete configurations starting from an empty record
    ///
    /// # Errors
    /// Returns error if the expansion exceeds `config.max_steps`
    pub fn expand(&self, config: &ExpansionConfig) -> Result<ConfigSequence<V>, ExpansionError> {
        crate::expand::expand(self, Config::new(), config)
    }

    /// Expand into complete configurations starting from `base`
    ///
    /// # Errors
    /// Returns error if the expansion exceeds `config.max_steps`
    pub fn expand_from(
        &self,
        base: Config<V>,
        config: &ExpansionConfig,
    ) -> Result<ConfigSequence<V>, ExpansionError> {
        crate::expand::expand(self, base, config)
    }
}

impl<V> Debug for SequenceNode<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceNode")
            .field("source", &self.source)
            .field("step_count", &self.step_count())
            .field("children", &self.children.len())
            .finish()
    }
}

// Children are released one at a time so tree depth never grows the call stack.
impl<V> Drop for SequenceNode<V> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Position within one node during traversal
struct Frame<'a, V> {
    node: &'a SequenceNode<V>,
    own: Option<Box<dyn MergeCursor<V> + 'a>>,
    /// Source-less nodes get exactly one pass
    virtual_pass_done: bool,
    /// An own step has been applied and its children are being visited
    in_pass: bool,
    next_child: usize,
}

impl<'a, V> Frame<'a, V> {
    fn new(node: &'a SequenceNode<V>) -> Self {
        Self {
            node,
            own: node.source.as_ref().map(|s| s.cursor()),
            virtual_pass_done: false,
            in_pass: false,
            next_child: 0,
        }
    }

    /// Apply the next own step, returning false when the node is finished
    fn start_pass(&mut self, accumulator: &mut Config<V>) -> bool {
        match &mut self.own {
            Some(own) => {
                if !own.has_next() {
                    return false;
                }
                own.merge_next(accumulator);
            }
            None => {
                if self.virtual_pass_done {
                    return false;
                }
                self.virtual_pass_done = true;
            }
        }
        self.in_pass = true;
        self.next_child = 0;
        true
    }

    /// Next child in this pass that yields anything
    fn next_nonempty_child(&mut self) -> Option<&'a SequenceNode<V>> {
        let node = self.node;
        let found = node.children[self.next_child..]
            .iter()
            .position(|c| c.step_count() > 0)?;
        let index = self.next_child + found;
        self.next_child = index + 1;
        Some(&node.children[index])
    }
}

/// Depth-first cursor over a [`SequenceNode`] tree
///
/// Keeps an explicit stack of frames, one per node on the current path, so
/// tree depth never grows the call stack.
pub struct NodeCursor<'a, V> {
    frames: Vec<Frame<'a, V>>,
    remaining: usize,
}

impl<'a, V> NodeCursor<'a, V> {
    fn new(root: &'a SequenceNode<V>) -> Self {
        let remaining = root.step_count();
        let frames = if remaining > 0 {
            vec![Frame::new(root)]
        } else {
            Vec::new()
        };
        Self { frames, remaining }
    }

    /// Number of nodes on the current traversal path
    #[inline]
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.frames.len()
    }
}

impl<V: Clone> MergeCursor<V> for NodeCursor<'_, V> {
    #[inline]
    fn remaining(&self) -> usize {
        self.remaining
    }

    #[track_caller]
    fn merge_next(&mut self, accumulator: &mut Config<V>) {
        if self.remaining == 0 {
            cursor_exhausted();
        }

        loop {
            let Some(frame) = self.frames.last_mut() else {
                source_miscounted(self.remaining);
            };

            if !frame.in_pass {
                if !frame.start_pass(accumulator) {
                    self.frames.pop();
                    continue;
                }
                if frame.node.children.is_empty() {
                    frame.in_pass = false;
                    break;
                }
            }

            match frame.next_nonempty_child() {
                Some(child) => self.frames.push(Frame::new(child)),
                None => frame.in_pass = false,
            }
        }

        self.remaining -= 1;
    }
}

impl<V> Debug for NodeCursor<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCursor")
            .field("path_len", &self.frames.len())
            .field("remaining", &self.remaining)
            .finish()
    }
}
