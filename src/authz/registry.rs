//! Experience registry.
//!
//! The registry is the static side of the engine: one entry per experience,
//! built once from configuration and read without locks afterwards. Pattern
//! compilation happens here so that every glob is converted exactly once, at
//! startup, and an incomplete table surfaces as a build error instead of a
//! query-time failure.

use std::collections::BTreeMap;

use super::{AuthzError, PatternSet};
use crate::{config::ExperienceConfig, experience::Experience};

/// Immutable per-experience configuration with compiled pattern sets.
///
/// Lookups are infallible: construction verifies the table covers every
/// [`Experience`] variant, so `config_for` cannot miss afterwards.
#[derive(Debug, Clone)]
pub struct ExperienceRegistry {
    /// Indexed by variant position in [`Experience::ALL`].
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    config: ExperienceConfig,
    patterns: PatternSet,
}

impl ExperienceRegistry {
    /// Build the registry, verifying the table is exhaustive over the
    /// experience set.
    pub fn from_table(
        table: &BTreeMap<Experience, ExperienceConfig>,
    ) -> Result<Self, AuthzError> {
        let mut entries = Vec::with_capacity(Experience::ALL.len());
        for experience in Experience::ALL {
            let config = table
                .get(&experience)
                .ok_or(AuthzError::ConfigurationMissing { experience })?;
            entries.push(Entry {
                config: config.clone(),
                patterns: PatternSet::compile(&config.allowed_patterns),
            });
        }
        Ok(Self { entries })
    }

    /// Configuration for an experience.
    pub fn config_for(&self, experience: Experience) -> &ExperienceConfig {
        &self.entries[experience as usize].config
    }

    /// Whether `path` is allowed under an experience's pattern set.
    pub fn route_allowed(&self, experience: Experience, path: &str) -> bool {
        self.entries[experience as usize].patterns.allows(path)
    }
}
