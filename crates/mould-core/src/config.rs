//! Engine configuration.

use crate::{GenRng, MouldError, MouldResult};

/// Default method-name prefix of convention interfaces.
pub const DEFAULT_PREFIX: &str = "with";

/// How interface and abstract types are materialised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbstractStrategy {
    /// Behaviour-less placeholder instance of the requested type.
    #[default]
    Placeholder,
    /// First concrete subtype in schema registration order, constructed
    /// normally; falls back to an error when there is none.
    FirstImplementation,
}

/// Top-level engine configuration.
///
/// Typically built in test setup code, or loaded from a TOML/JSON file with
/// the `serde` feature enabled.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Method-name prefix of convention interfaces.  Default: `"with"`.
    pub prefix: String,

    /// RNG seed.  `None` seeds from entropy; a fixed seed makes every
    /// randomised generator built from the engine's RNG reproducible.
    pub seed: Option<u64>,

    /// Strategy for abstract types.  Interfaces always get a placeholder.
    pub abstract_strategy: AbstractStrategy,

    /// Maximum nesting of engine generation before giving up.  Each nested
    /// bean, and each type-table generator that calls back into the engine,
    /// takes one level.  Bounds self-referential constructor, property and
    /// generator graphs.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            seed: None,
            abstract_strategy: AbstractStrategy::Placeholder,
            max_depth: 32,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> MouldResult<()> {
        if self.prefix.is_empty() {
            return Err(MouldError::Config("convention prefix must not be empty".into()));
        }
        if self.max_depth == 0 {
            return Err(MouldError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }

    /// RNG for this configuration: seeded if `seed` is set.
    pub fn make_rng(&self) -> GenRng {
        match self.seed {
            Some(seed) => GenRng::seeded(seed),
            None => GenRng::from_entropy(),
        }
    }
}
