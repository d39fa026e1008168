//! Engine configuration.

/// Default depth of the deeper search.
pub const DEFAULT_DEEP_DEPTH: u8 = 4;
/// Default depth of the shallower search.
pub const DEFAULT_SHALLOW_DEPTH: u8 = 2;

/// Errors found while validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The shallow search must look at least one ply ahead.
    #[error("shallow depth must be at least 1, got {shallow}")]
    ShallowTooLow {
        /// The rejected depth.
        shallow: u8,
    },

    /// The deep search must be strictly deeper than the shallow one.
    #[error("deep depth {deep} must exceed shallow depth {shallow}")]
    DeepNotDeeper {
        /// Configured deep depth.
        deep: u8,
        /// Configured shallow depth.
        shallow: u8,
    },
}

/// Search depths used for every engine turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Depth of the deeper search, in plies.
    pub deep_depth: u8,
    /// Depth of the shallower search, in plies.
    pub shallow_depth: u8,
}

impl EngineConfig {
    /// Check the depth relationship.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shallow_depth < 1 {
            return Err(ConfigError::ShallowTooLow {
                shallow: self.shallow_depth,
            });
        }
        if self.deep_depth <= self.shallow_depth {
            return Err(ConfigError::DeepNotDeeper {
                deep: self.deep_depth,
                shallow: self.shallow_depth,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deep_depth: DEFAULT_DEEP_DEPTH,
            shallow_depth: DEFAULT_SHALLOW_DEPTH,
        }
    }
}
