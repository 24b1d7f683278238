//! Observation sequence configuration model
//!
//! Key/value records that describe telescope and instrument state at each
//! step of an observation sequence.
//!
//! # Core Concepts
//!
//! - [`ItemKey`]: Hierarchical item address such as `instrument:filter`
//! - [`Config<V>`]: Mutable record of item values, generic over the value type
//! - [`iterated_keys`]: Detects which items change across ordered steps
//! - [`ConfigSequence<V>`]: Fully resolved configurations, one per step
//!
//! # Example
//!
//! ```rust
//! use obsseq_config::{Config, ConfigSequence, ItemKey};
//!
//! let filter: ItemKey = "instrument:filter".parse().unwrap();
//!
//! let mut acc = Config::new();
//! acc.put(filter.clone(), "J");
//!
//! let mut step = Config::new();
//! step.put(filter.clone(), "K");
//! acc.overlay(&step);
//!
//! assert_eq!(acc.get(&filter), Some(&"K"));
//!
//! let mut seq = ConfigSequence::new();
//! seq.push_changes(&acc);
//! assert_eq!(seq.len(), 1);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod config;
mod diff;
mod key;
mod sequence;

pub use config::Config;
pub use diff::iterated_keys;
pub use key::{ItemKey, KeyError, SEPARATOR};
pub use sequence::{ConfigSequence, SequenceError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
