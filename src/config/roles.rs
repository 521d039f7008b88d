use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::{authz::RoleClassifier, experience::Experience};

/// Role classification configuration.
///
/// Roles come from the authentication layer as opaque case-insensitive
/// strings. The priority table decides the experience for recognized roles;
/// the fallback rules catch role names that merely contain a known
/// substring. Both tables are ordered and the order is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RolesConfig {
    /// Ordered priority table. The first entry whose role the actor holds
    /// decides the experience, regardless of the role set's own order.
    #[serde(default = "default_priority")]
    pub priority: Vec<RoleRule>,

    /// Ordered substring fallbacks, consulted only when no priority entry
    /// matched. The first substring contained in any role wins.
    #[serde(default = "default_fallback")]
    pub fallback: Vec<RoleRule>,

    /// Map IdP role names to internal role names before normalization.
    /// Useful when the IdP uses different naming conventions.
    #[serde(default)]
    pub mapping: HashMap<String, String>,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            fallback: default_fallback(),
            mapping: HashMap::new(),
        }
    }
}

impl RolesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.priority.iter().chain(self.fallback.iter()).enumerate() {
            if rule.role.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Role rule {} has an empty role name",
                    i
                )));
            }
        }

        // Duplicate priority entries would make the later one unreachable.
        let mut seen = HashSet::new();
        for rule in &self.priority {
            if !seen.insert(rule.role.trim().to_uppercase()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate priority role: '{}'",
                    rule.role
                )));
            }
        }

        for (name, target) in &self.mapping {
            if name.trim().is_empty() || target.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Role mapping entries cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Build the immutable classifier from this configuration.
    pub fn build_classifier(&self) -> RoleClassifier {
        let rules = |table: &[RoleRule]| {
            table
                .iter()
                .map(|rule| (rule.role.clone(), rule.experience))
                .collect()
        };
        RoleClassifier::new(
            rules(&self.priority),
            rules(&self.fallback),
            self.mapping.clone(),
        )
    }
}

/// One (role name or substring, experience) rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleRule {
    /// Role name (priority table) or substring (fallback table).
    /// Compared case-insensitively.
    pub role: String,

    /// Experience the rule resolves to.
    pub experience: Experience,
}

impl RoleRule {
    fn new(role: &str, experience: Experience) -> Self {
        Self {
            role: role.to_string(),
            experience,
        }
    }
}

fn default_priority() -> Vec<RoleRule> {
    vec![
        RoleRule::new("ADMIN", Experience::Admin),
        RoleRule::new("OFFER_MANAGER", Experience::OfferManager),
        RoleRule::new("SELLER", Experience::Seller),
        RoleRule::new("PROVIDER_SUCCESS_MANAGER", Experience::Psm),
        RoleRule::new("PSM", Experience::Psm),
        RoleRule::new("CUSTOMER", Experience::Customer),
        RoleRule::new("WORK_TEAM", Experience::WorkTeam),
        RoleRule::new("PROVIDER_ONBOARDING", Experience::ProviderOnboarding),
        RoleRule::new("PROVIDER", Experience::Provider),
        RoleRule::new("OPERATOR", Experience::Operator),
    ]
}

fn default_fallback() -> Vec<RoleRule> {
    vec![
        RoleRule::new("CONTROL_TOWER", Experience::Operator),
        RoleRule::new("PROVIDER_SUCCESS", Experience::Psm),
        RoleRule::new("ONBOARDING", Experience::ProviderOnboarding),
        RoleRule::new("WORK_TEAM", Experience::WorkTeam),
        RoleRule::new("PROVIDER", Experience::Provider),
        RoleRule::new("OFFER", Experience::OfferManager),
        RoleRule::new("SELLER", Experience::Seller),
        RoleRule::new("CUSTOMER", Experience::Customer),
        RoleRule::new("ADMIN", Experience::Admin),
        RoleRule::new("OPERATOR", Experience::Operator),
    ]
}
