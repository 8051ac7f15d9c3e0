//! Configuration of a reasoning builder.

use crate::structures::concreteness::ConcretenessSet;

/// Configuration consumed by [ReasoningBuilder::from_config](crate::builder::ReasoningBuilder::from_config).
#[derive(Debug, Clone)]
pub struct Config {
    /// The concreteness levels for which interpretations must be built.
    ///
    /// Interpretation factories skip machinery for any level outside this set.
    /// Defaults to every level.
    pub required_interpretations: ConcretenessSet,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            required_interpretations: ConcretenessSet::all(),
        }
    }
}
