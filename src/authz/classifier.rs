//! Role classification.
//!
//! Classification maps the raw role strings supplied by the authentication
//! layer to exactly one experience. It is total: any role set, including an
//! empty or entirely unrecognized one, classifies to the default experience.
//! The priority table order is authoritative for multi-role actors — the
//! first table entry whose role the actor holds wins, not the "most
//! specific" or "most recent" role.

use std::collections::HashMap;

use crate::experience::Experience;

/// Maps an actor's role set to a single experience.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    /// Ordered (role name, experience) pairs; first present role wins.
    priority: Vec<(String, Experience)>,
    /// Ordered (substring, experience) pairs, consulted only when no
    /// priority entry matched; first contained substring wins.
    fallback: Vec<(String, Experience)>,
    /// IdP role name → internal role name, applied before normalization.
    mapping: HashMap<String, String>,
}

impl RoleClassifier {
    /// Experience used when nothing matches.
    pub const DEFAULT_EXPERIENCE: Experience = Experience::Operator;

    /// Build a classifier from ordered rule tables.
    ///
    /// Role names and substrings are uppercased here so both sides of every
    /// comparison share the same normal form.
    pub fn new(
        priority: Vec<(String, Experience)>,
        fallback: Vec<(String, Experience)>,
        mapping: HashMap<String, String>,
    ) -> Self {
        let uppercase = |rules: Vec<(String, Experience)>| {
            rules
                .into_iter()
                .map(|(name, experience)| (name.trim().to_uppercase(), experience))
                .collect()
        };
        Self {
            priority: uppercase(priority),
            fallback: uppercase(fallback),
            mapping,
        }
    }

    /// Resolve the experience for a role set.
    pub fn resolve(&self, roles: &[String]) -> Experience {
        let normalized = self.normalize(roles);

        for (name, experience) in &self.priority {
            if normalized.iter().any(|role| role == name) {
                tracing::debug!(
                    role = %name,
                    experience = %experience,
                    "Priority role matched"
                );
                return *experience;
            }
        }

        for (needle, experience) in &self.fallback {
            if normalized.iter().any(|role| role.contains(needle.as_str())) {
                tracing::debug!(
                    substring = %needle,
                    experience = %experience,
                    "Fallback substring matched"
                );
                return *experience;
            }
        }

        tracing::debug!(
            experience = %Self::DEFAULT_EXPERIENCE,
            "No role rule matched, using default experience"
        );
        Self::DEFAULT_EXPERIENCE
    }

    /// Normalize raw roles: apply the IdP mapping, uppercase, trim, and drop
    /// empties. Input order is preserved; resolution does not depend on it.
    pub(crate) fn normalize(&self, roles: &[String]) -> Vec<String> {
        roles
            .iter()
            .map(|role| self.mapping.get(role.as_str()).unwrap_or(role))
            .map(|role| role.trim().to_uppercase())
            .filter(|role| !role.is_empty())
            .collect()
    }

    /// Canonical form of a role set for change detection: normalized,
    /// sorted, and deduplicated.
    pub(crate) fn fingerprint(&self, roles: &[String]) -> Vec<String> {
        let mut normalized = self.normalize(roles);
        normalized.sort();
        normalized.dedup();
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RolesConfig;

    fn classifier() -> RoleClassifier {
        RolesConfig::default().build_classifier()
    }

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_single_recognized_role() {
        let c = classifier();
        assert_eq!(c.resolve(&roles(&["ADMIN"])), Experience::Admin);
        assert_eq!(c.resolve(&roles(&["PROVIDER"])), Experience::Provider);
        assert_eq!(c.resolve(&roles(&["SELLER"])), Experience::Seller);
        assert_eq!(
            c.resolve(&roles(&["PROVIDER_SUCCESS_MANAGER"])),
            Experience::Psm
        );
        assert_eq!(c.resolve(&roles(&["PSM"])), Experience::Psm);
    }

    #[test]
    fn test_roles_are_case_insensitive() {
        let c = classifier();
        assert_eq!(c.resolve(&roles(&["admin"])), Experience::Admin);
        assert_eq!(c.resolve(&roles(&["Work_Team"])), Experience::WorkTeam);
        assert_eq!(c.resolve(&roles(&["  operator  "])), Experience::Operator);
    }

    #[test]
    fn test_priority_order_wins_over_input_order() {
        let c = classifier();
        // ADMIN is listed before OPERATOR in the priority table; the input
        // order of the role set must not matter.
        assert_eq!(c.resolve(&roles(&["OPERATOR", "ADMIN"])), Experience::Admin);
        assert_eq!(c.resolve(&roles(&["ADMIN", "OPERATOR"])), Experience::Admin);
        assert_eq!(
            c.resolve(&roles(&["PROVIDER", "OFFER_MANAGER"])),
            Experience::OfferManager
        );
    }

    #[test]
    fn test_fallback_only_when_no_priority_match() {
        let c = classifier();
        // Contains CONTROL_TOWER, resolves through the fallback rules.
        assert_eq!(
            c.resolve(&roles(&["RANDOM_CONTROL_TOWER_LEAD"])),
            Experience::Operator
        );
        assert_eq!(
            c.resolve(&roles(&["REGIONAL_PROVIDER_SUCCESS_LEAD"])),
            Experience::Psm
        );
        // An exact priority role short-circuits the fallback walk.
        assert_eq!(
            c.resolve(&roles(&["RANDOM_CONTROL_TOWER_LEAD", "SELLER"])),
            Experience::Seller
        );
    }

    #[test]
    fn test_unknown_roles_use_hard_default() {
        let c = classifier();
        assert_eq!(c.resolve(&roles(&["UNKNOWN_ROLE_XYZ"])), Experience::Operator);
        assert_eq!(c.resolve(&roles(&["!!garbage!!", ""])), Experience::Operator);
    }

    #[test]
    fn test_empty_role_set_uses_default() {
        let c = classifier();
        assert_eq!(c.resolve(&[]), Experience::Operator);
        assert_eq!(c.resolve(&roles(&["", "  "])), Experience::Operator);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let c = classifier();
        let set = roles(&["CUSTOMER", "RANDOM_CONTROL_TOWER_LEAD"]);
        let first = c.resolve(&set);
        for _ in 0..10 {
            assert_eq!(c.resolve(&set), first);
        }
    }

    #[test]
    fn test_idp_mapping_applies_before_normalization() {
        let mut config = RolesConfig::default();
        config
            .mapping
            .insert("fsm-admins".to_string(), "ADMIN".to_string());
        let c = config.build_classifier();
        assert_eq!(c.resolve(&roles(&["fsm-admins"])), Experience::Admin);
        // Unmapped roles pass through unchanged.
        assert_eq!(c.resolve(&roles(&["seller"])), Experience::Seller);
    }

    #[test]
    fn test_fingerprint_ignores_order_case_and_duplicates() {
        let c = classifier();
        let a = c.fingerprint(&roles(&["admin", "SELLER", "Admin"]));
        let b = c.fingerprint(&roles(&["SELLER", "ADMIN"]));
        assert_eq!(a, b);
        let changed = c.fingerprint(&roles(&["SELLER"]));
        assert_ne!(a, changed);
    }
}
