//! Authorization errors.

use thiserror::Error;

use crate::experience::Experience;

/// Errors produced by the authorization engine.
///
/// The set is deliberately small: every query operation is total and yields a
/// safe default instead of failing. `ConfigurationMissing` can only surface
/// while the engine is being built; `OverrideRejected` is the one recoverable
/// error callers see at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    /// The experience table has no entry for `experience`. The table must be
    /// exhaustive, so this is fatal at startup and never raised by queries.
    #[error("No experience configuration for '{experience}'")]
    ConfigurationMissing { experience: Experience },

    /// An actor attempted to switch to an experience outside their available
    /// set. The override state is left unchanged.
    #[error("Experience override to '{attempted}' is not permitted")]
    OverrideRejected { attempted: Experience },
}
