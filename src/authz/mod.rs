//! Experience resolution and authorization decisions.
//!
//! This module implements the decision core of the crate:
//! - Roles from the authentication layer classify the actor to a portal
//!   experience (priority table first, substring fallbacks second)
//! - A session override may replace the base experience, gated by the
//!   actor's available experience set
//! - The resolved experience's configuration answers route queries through
//!   pattern sets compiled once at startup
//! - Permission strings are checked against the actor's held set
//!
//! The flow for a navigation attempt:
//! 1. Normalize the subject's roles and resolve the base experience
//! 2. Apply the session override if it is still permitted
//! 3. Look up the experience configuration in the registry
//! 4. Test the candidate path against the compiled pattern set
//! 5. Return allow/deny; denials never raise errors

mod classifier;
mod engine;
mod error;
mod patterns;
mod registry;
mod session;

pub use classifier::RoleClassifier;
pub use engine::{AuthzEngine, Subject};
pub use error::AuthzError;
pub use patterns::PatternSet;
pub use registry::ExperienceRegistry;
pub use session::SessionOverride;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The permission string granting everything.
const GLOBAL_GRANT: &str = "*";

/// Permission strings held by an actor.
///
/// Each entry is `*` (global grant), `resource.*` (resource-level wildcard),
/// or `resource.action` (exact grant).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    entries: HashSet<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permission string to the set.
    pub fn grant(&mut self, permission: impl Into<String>) {
        self.entries.insert(permission.into());
    }

    /// Whether the set holds `permission` verbatim (no wildcard logic).
    pub fn contains(&self, permission: &str) -> bool {
        self.entries.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the set grants `requested`.
    ///
    /// A global `*` grant matches anything. Otherwise the requested string
    /// must be held verbatim, or the set must hold `resource.*` where
    /// `resource` is everything before the first `.`. A request without a
    /// separator has no resource to wildcard against and can only match
    /// exactly or through the global grant.
    pub fn allows(&self, requested: &str) -> bool {
        if self.entries.contains(GLOBAL_GRANT) {
            return true;
        }
        if self.entries.contains(requested) {
            return true;
        }
        match requested.split_once('.') {
            Some((resource, _)) => self.entries.contains(&format!("{resource}.*")),
            None => false,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}
