//! Core data structures for the Docfill configuration system

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Default upper bound on substitutions performed by one merge pass.
pub const DEFAULT_MAX_REPLACEMENTS: usize = 10_000;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocfillConfig {
    /// Settings for the rich-text fragment merge
    pub merge: MergeSettings,
}

impl DocfillConfig {
    /// Reject values that would make the engine unusable.
    pub fn validate(&self) -> ConfigResult<()> {
        self.merge.validate()
    }
}

/// Controls which lookup variants are generated and how long a merge may run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Add the HTML-entity-encoded variant of each lookup key
    pub entity_variants: bool,
    /// Add the whitespace-collapsed variant of each lookup key
    pub collapsed_variants: bool,
    /// Maximum substitutions in a single merge pass
    pub max_replacements: usize,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            entity_variants: true,
            collapsed_variants: true,
            max_replacements: DEFAULT_MAX_REPLACEMENTS,
        }
    }
}

impl MergeSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_replacements == 0 {
            return Err(ConfigError::validation(
                "merge.max_replacements",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
