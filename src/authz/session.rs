//! Session-scoped experience override.
//!
//! An actor entitled to multiple experiences (an administrator) may switch
//! the active experience without changing roles. The override lives in a
//! per-session slot with two states, unset and set; transitions into the set
//! state are gated by the availability check, and any role-set change
//! invalidates the slot. The host application owns one `SessionOverride` per
//! session and drops it on logout.

use parking_lot::Mutex;

use super::{AuthzEngine, AuthzError, Subject};
use crate::experience::Experience;

/// Per-session override slot.
///
/// Mutation is atomic: `set` performs its read-check-write under the slot
/// mutex, so two concurrent switches cannot interleave with the availability
/// check that authorized them.
#[derive(Debug, Default)]
pub struct SessionOverride {
    slot: Mutex<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    selected: Option<Experience>,
    /// Canonical role set captured when the override was set.
    fingerprint: Vec<String>,
}

impl SessionOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the session to `desired`.
    ///
    /// Succeeds only when `desired` is in the subject's available set;
    /// otherwise fails with [`AuthzError::OverrideRejected`] and leaves the
    /// slot untouched.
    pub fn set(
        &self,
        engine: &AuthzEngine,
        subject: &Subject,
        desired: Experience,
    ) -> Result<Experience, AuthzError> {
        let mut slot = self.slot.lock();

        if !engine.is_available(subject, desired) {
            tracing::warn!(
                attempted = %desired,
                external_id = ?subject.external_id,
                "Experience override rejected"
            );
            return Err(AuthzError::OverrideRejected { attempted: desired });
        }

        slot.selected = Some(desired);
        slot.fingerprint = engine.role_fingerprint(subject);
        tracing::debug!(experience = %desired, "Experience override set");
        Ok(desired)
    }

    /// Clear the slot (logout or explicit switch-back).
    pub fn clear(&self) {
        let mut slot = self.slot.lock();
        slot.selected = None;
        slot.fingerprint.clear();
    }

    /// The override currently in effect for `subject`, if any.
    ///
    /// A role-set change since `set` clears the slot and forces
    /// re-resolution from the new roles. Availability can only change
    /// through a role change, so the fingerprint comparison covers the
    /// gating rule too.
    pub fn active(&self, engine: &AuthzEngine, subject: &Subject) -> Option<Experience> {
        let mut slot = self.slot.lock();
        let selected = slot.selected?;

        if slot.fingerprint != engine.role_fingerprint(subject) {
            tracing::debug!(
                dropped = %selected,
                "Role set changed, clearing experience override"
            );
            slot.selected = None;
            slot.fingerprint.clear();
            return None;
        }

        Some(selected)
    }
}
