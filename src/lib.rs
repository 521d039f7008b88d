//! Experience resolution and route/permission authorization for multi-portal
//! applications.
//!
//! Given an authenticated subject (roles + permissions), `concourse` decides
//! which portal experience the subject operates under and answers allow/deny
//! queries for candidate paths and permission strings. The engine is pure
//! decision logic: no I/O, no async, deterministic for a given configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use concourse::{AuthzEngine, Experience, SessionOverride, Subject};
//!
//! let engine = AuthzEngine::with_defaults();
//! let subject = Subject::new().with_role("ADMIN");
//!
//! assert_eq!(engine.resolve_experience(&subject), Experience::Admin);
//! assert!(engine.is_route_allowed("/admin/users", &subject, None));
//!
//! // Administrators may operate any portal.
//! let session = SessionOverride::new();
//! session.set(&engine, &subject, Experience::Seller)?;
//! let config = engine.resolve_config(&subject, session.active(&engine, &subject));
//! assert_eq!(config.default_route, "/sales");
//! ```
//!
//! Classification and authorization never fail: unrecognized roles resolve
//! to the default experience and unmatched paths deny. The only runtime
//! error is a rejected experience override; an incomplete experience table
//! fails engine construction instead.

pub mod authz;
pub mod config;
pub mod experience;

pub use authz::{AuthzEngine, AuthzError, PermissionSet, SessionOverride, Subject};
pub use config::{ConcourseConfig, ConfigError, ExperienceConfig};
pub use experience::Experience;

#[cfg(test)]
mod tests;
