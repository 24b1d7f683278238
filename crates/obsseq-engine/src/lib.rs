//! Observation Sequence Engine
//!
//! Expands a tree of configuration step sources into one linear list of
//! complete configurations.
//!
//! # Core Concepts
//!
//! - [`StepSource`]: Ordered producer of per-step changes
//! - [`DefaultStepSource`]: Source over an explicit list of steps
//! - [`MergeCursor`]: Forward-only cursor that overlays one step per call
//! - [`SequenceNode`]: Tree node combining an own source with children
//! - [`NodeCursor`]: Depth-first traversal of a tree
//! - [`ExpansionConfig`]: Limits and tracing for [`expand`]
//!
//! Own steps of a node vary slowest; children are visited in order and
//! their steps concatenated. Items persist in the accumulator until a later
//! step overwrites them.
//!
//! # Example
//!
//! ```rust
//! use obsseq_config::{Config, ItemKey};
//! use obsseq_engine::{DefaultStepSource, ExpansionConfig, SequenceNode};
//!
//! let step = |k: &str, v: i32| -> Config<i32> {
//!     std::iter::once((k.parse::<ItemKey>().unwrap(), v)).collect()
//! };
//!
//! let offsets = DefaultStepSource::new(vec![step("tcs:p", 10), step("tcs:p", 20)]);
//! let filters = DefaultStepSource::new(vec![step("inst:filter", 1), step("inst:filter", 2)]);
//!
//! let tree = SequenceNode::with_source(filters).with_child(SequenceNode::with_source(offsets));
//! assert_eq!(tree.step_count(), 4);
//!
//! let sequence = tree.expand(&ExpansionConfig::new()).unwrap();
//! assert_eq!(sequence.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod cursor;
mod error;
mod expand;
mod node;
mod source;

// Re-exports
pub use config::ExpansionConfig;
pub use cursor::{MergeCursor, Snapshots, StepCursor};
pub use error::ExpansionError;
pub use expand::expand;
pub use node::{NodeCursor, SequenceNode};
pub use source::{DefaultStepSource, StepSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
