//! Expansion settings

use crate::error::ExpansionError;
use serde::{Deserialize, Serialize};

/// Settings for materializing a sequence tree
///
/// Missing fields take their default when parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Largest number of configurations a single expansion may produce
    pub max_steps: usize,
    /// Emit a trace event for every merged step
    pub trace_steps: bool,
}

impl ExpansionConfig {
    /// Default limit on configurations per expansion
    pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With step limit
    #[inline]
    #[must_use]
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    /// With per-step tracing
    #[inline]
    #[must_use]
    pub fn with_trace_steps(mut self, enabled: bool) -> Self {
        self.trace_steps = enabled;
        self
    }

    /// Parse from YAML
    ///
    /// # Errors
    /// Returns error if the YAML is malformed or has unknown field types
    pub fn from_yaml(yaml: &str) -> Result<Self, ExpansionError> {
        serde_yaml::from_str(yaml).map_err(|e| ExpansionError::InvalidConfig(e.to_string()))
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or has unknown field types
    pub fn from_json(json: &str) -> Result<Self, ExpansionError> {
        serde_json::from_str(json).map_err(|e| ExpansionError::InvalidConfig(e.to_string()))
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
            trace_steps: false,
        }
    }
}
