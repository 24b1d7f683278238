//! Error types for sequence expansion

/// Errors raised while materializing a sequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    /// Tree would produce more configurations than allowed
    #[error("sequence has {required} steps, exceeding the limit of {limit}")]
    StepLimitExceeded {
        /// Configured maximum
        limit: usize,
        /// Steps the tree would yield
        required: usize,
    },

    /// Expansion settings could not be parsed
    #[error("invalid expansion config: {0}")]
    InvalidConfig(String),
}
