//! Materializing sequence trees

use crate::config::ExpansionConfig;
use crate::cursor::MergeCursor;
use crate::error::ExpansionError;
use crate::node::SequenceNode;
use obsseq_config::{Config, ConfigSequence};

/// Drive one cursor over `node` to completion, recording every configuration
///
/// The accumulator starts as `base` and is threaded through the whole
/// traversal. The step count is checked against `config.max_steps` before
/// anything is merged.
///
/// # Errors
/// Returns [`ExpansionError::StepLimitExceeded`] if the tree yields more
/// configurations than `config.max_steps`
pub fn expand<V: Clone>(
    node: &SequenceNode<V>,
    base: Config<V>,
    config: &ExpansionConfig,
) -> Result<ConfigSequence<V>, ExpansionError> {
    let required = node.step_count();
    if required > config.max_steps {
        tracing::warn!(
            "Refusing to expand sequence: {} steps exceeds limit of {}",
            required,
            config.max_steps
        );
        return Err(ExpansionError::StepLimitExceeded {
            limit: config.max_steps,
            required,
        });
    }

    tracing::debug!("Expanding sequence: {} steps, depth {}", required, node.depth());

    let mut sequence = ConfigSequence::new();
    for snapshot in node.cursor().snapshots(base) {
        if config.trace_steps {
            tracing::trace!("Step {}: {} items", sequence.len(), snapshot.len());
        }
        sequence.push_snapshot(snapshot);
    }

    tracing::debug!("Expanded sequence into {} configurations", sequence.len());
    Ok(sequence)
}
