//! Testing utilities for the observation sequencing workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use obsseq_config::{Config, ItemKey};
use obsseq_engine::{DefaultStepSource, SequenceNode};
use std::fmt;

/// Item value used by the fixtures
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Float(f64),
    Int(i64),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Float(v) => write!(f, "{v:.1}"),
            Value::Int(v) => write!(f, "{v}"),
        }
    }
}

pub fn key(s: &str) -> ItemKey {
    s.parse().unwrap()
}

/// Build a record from `(key, value)` pairs
pub fn config(items: &[(&str, Value)]) -> Config<Value> {
    items.iter().map(|(k, v)| (key(k), v.clone())).collect()
}

pub fn text(s: &str) -> Value {
    Value::from(s)
}

pub fn float(v: f64) -> Value {
    Value::from(v)
}

pub fn int(v: i64) -> Value {
    Value::from(v)
}

/// Filter J, J', K with wavelengths 100.0, 101.0, 102.0
pub fn instrument_steps() -> Vec<Config<Value>> {
    vec![
        config(&[("inst:filter", text("J")), ("inst:wavelength", float(100.0))]),
        config(&[("inst:filter", text("J'")), ("inst:wavelength", float(101.0))]),
        config(&[("inst:filter", text("K")), ("inst:wavelength", float(102.0))]),
    ]
}

/// Offsets p = 10, 20 with q held at 0
pub fn offset_steps() -> Vec<Config<Value>> {
    vec![
        config(&[("tcs:p", int(10)), ("tcs:q", int(0))]),
        config(&[("tcs:p", int(20)), ("tcs:q", int(0))]),
    ]
}

/// Observatory control x = "1", "2"
pub fn ocs_steps() -> Vec<Config<Value>> {
    vec![config(&[("ocs:x", text("1"))]), config(&[("ocs:x", text("2"))])]
}

pub fn leaf(steps: Vec<Config<Value>>) -> SequenceNode<Value> {
    SequenceNode::with_source(DefaultStepSource::new(steps))
}

pub fn instrument_node() -> SequenceNode<Value> {
    leaf(instrument_steps())
}

pub fn offset_node() -> SequenceNode<Value> {
    leaf(offset_steps())
}

pub fn ocs_node() -> SequenceNode<Value> {
    leaf(ocs_steps())
}

/// Assert every item of `expected` is present in `actual` with the same value
#[track_caller]
pub fn assert_config_contains(expected: &Config<Value>, actual: &Config<Value>) {
    for (k, v) in expected {
        match actual.get(k) {
            Some(found) => assert_eq!(found, v, "item {k} differs"),
            None => panic!("item {k} missing, expected {v}"),
        }
    }
}

/// Install a test subscriber honouring `RUST_LOG`; repeated calls are ignored
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
