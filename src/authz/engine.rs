//! Authorization facade.
//!
//! `AuthzEngine` composes the role classifier, the experience registry, and
//! the pattern/permission matchers into the operations the application
//! consumes. Every query is pure and synchronous; sharing one engine behind
//! an `Arc` across threads needs no further synchronization because nothing
//! here is mutated after construction.

use serde::{Deserialize, Serialize};

use super::{AuthzError, ExperienceRegistry, PermissionSet, RoleClassifier};
use crate::{
    config::{AuditConfig, ConcourseConfig, ExperienceConfig},
    experience::Experience,
};

/// Subject (actor) the engine decides for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    /// Raw roles from the authentication layer. Case-insensitive.
    pub roles: Vec<String>,

    /// Permission strings held by the actor.
    pub permissions: PermissionSet,

    /// External ID from the identity provider, for audit events.
    pub external_id: Option<String>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Check if the subject carries a specific raw role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

/// The authorization engine consumed by the surrounding application.
pub struct AuthzEngine {
    classifier: RoleClassifier,
    registry: ExperienceRegistry,
    audit: AuditConfig,
}

impl AuthzEngine {
    /// Build the engine from configuration.
    ///
    /// Fails with [`AuthzError::ConfigurationMissing`] when the experience
    /// table does not cover every experience; the caller should treat that
    /// as fatal at startup.
    pub fn new(config: &ConcourseConfig) -> Result<Self, AuthzError> {
        let registry = ExperienceRegistry::from_table(&config.experiences)?;
        Ok(Self {
            classifier: config.roles.build_classifier(),
            registry,
            audit: config.audit.clone(),
        })
    }

    /// Engine with the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::new(&ConcourseConfig::default()).expect("built-in experience table is exhaustive")
    }

    /// Resolve the base experience for a subject.
    ///
    /// Total: any role set, including empty or unrecognized, resolves to an
    /// experience.
    pub fn resolve_experience(&self, subject: &Subject) -> Experience {
        self.classifier.resolve(&subject.roles)
    }

    /// Every experience the subject may operate.
    ///
    /// The base experience is always included. Administrators may operate
    /// any portal; everyone else gets exactly the singleton.
    pub fn available_experiences(&self, subject: &Subject) -> Vec<Experience> {
        let base = self.resolve_experience(subject);
        if base == Experience::Admin {
            Experience::ALL.to_vec()
        } else {
            vec![base]
        }
    }

    /// Whether `experience` is in the subject's available set.
    pub fn is_available(&self, subject: &Subject, experience: Experience) -> bool {
        let base = self.resolve_experience(subject);
        experience == base || base == Experience::Admin
    }

    /// Resolve the experience configuration, substituting the override when
    /// the subject is entitled to it. An unavailable override is ignored
    /// rather than widening access.
    pub fn resolve_config(
        &self,
        subject: &Subject,
        override_experience: Option<Experience>,
    ) -> &ExperienceConfig {
        self.registry
            .config_for(self.active_experience(subject, override_experience))
    }

    /// Whether the subject may navigate to `path` under the active
    /// experience.
    pub fn is_route_allowed(
        &self,
        path: &str,
        subject: &Subject,
        override_experience: Option<Experience>,
    ) -> bool {
        let experience = self.active_experience(subject, override_experience);
        let allowed = self.registry.route_allowed(experience, path);

        if allowed {
            if self.audit.log_allowed {
                tracing::debug!(
                    path = %path,
                    experience = %experience,
                    external_id = ?subject.external_id,
                    "Route allowed"
                );
            }
        } else if self.audit.log_denied {
            tracing::warn!(
                path = %path,
                experience = %experience,
                external_id = ?subject.external_id,
                "Route denied"
            );
        }

        allowed
    }

    /// Whether `held` grants the `requested` permission string.
    /// Independent of experience.
    pub fn check_permission(&self, held: &PermissionSet, requested: &str) -> bool {
        held.allows(requested)
    }

    /// The experience in effect: the base, or a permitted override.
    fn active_experience(
        &self,
        subject: &Subject,
        override_experience: Option<Experience>,
    ) -> Experience {
        let base = self.resolve_experience(subject);
        match override_experience {
            Some(desired) if desired == base || base == Experience::Admin => desired,
            Some(desired) => {
                tracing::warn!(
                    attempted = %desired,
                    base = %base,
                    "Ignoring experience override outside the available set"
                );
                base
            }
            None => base,
        }
    }

    pub(crate) fn role_fingerprint(&self, subject: &Subject) -> Vec<String> {
        self.classifier.fingerprint(&subject.roles)
    }
}
