use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::{authz::PatternSet, experience::Experience};

/// Configuration for one experience: where the actor lands, which routes the
/// portal may navigate to, and display descriptors the engine passes through
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceConfig {
    /// Landing route after login or an experience switch.
    pub default_route: String,

    /// Ordered glob allow-patterns. `*` inside a pattern matches any run of
    /// characters; the literal pattern `*` grants every route.
    pub allowed_patterns: Vec<String>,

    /// Navigation descriptors for the portal shell. Opaque to the engine.
    #[serde(default)]
    pub navigation: Vec<NavigationItem>,

    /// Header options for the portal shell. Opaque to the engine.
    #[serde(default)]
    pub header: HeaderOptions,
}

impl ExperienceConfig {
    pub fn validate(&self, experience: Experience) -> Result<(), ConfigError> {
        if self.default_route.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Experience '{}': default_route cannot be empty",
                experience
            )));
        }
        if !self.default_route.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "Experience '{}': default_route '{}' must start with '/'",
                experience, self.default_route
            )));
        }
        if self.allowed_patterns.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Experience '{}': allowed_patterns cannot be empty",
                experience
            )));
        }
        if self.allowed_patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Experience '{}': allowed_patterns entries cannot be empty",
                experience
            )));
        }

        // A default route the experience cannot navigate to would strand the
        // actor immediately after login.
        if !PatternSet::compile(&self.allowed_patterns).allows(&self.default_route) {
            return Err(ConfigError::Validation(format!(
                "Experience '{}': default_route '{}' is not covered by allowed_patterns",
                experience, self.default_route
            )));
        }

        Ok(())
    }
}

/// One navigation entry, passed through for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationItem {
    /// Stable identifier for the entry.
    pub id: String,

    /// Display label.
    pub label: String,

    /// Route the entry navigates to.
    pub route: String,

    /// Icon name for the portal shell.
    #[serde(default)]
    pub icon: Option<String>,

    /// Badge text (e.g. a "new" marker).
    #[serde(default)]
    pub badge: Option<String>,
}

/// Header options for the portal shell, passed through unchanged.
///
/// The named options cover what the shells share today; anything else a
/// portal needs rides along in `extra` rather than being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderOptions {
    #[serde(default)]
    pub show_search: bool,

    #[serde(default)]
    pub show_notifications: bool,

    /// Show the experience switcher (only meaningful for actors with more
    /// than one available experience).
    #[serde(default)]
    pub show_experience_switcher: bool,

    /// Title shown next to the logo.
    #[serde(default)]
    pub title: Option<String>,

    /// Link target for the help/support action.
    #[serde(default)]
    pub support_url: Option<String>,

    /// Portal-specific options the engine does not interpret.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in defaults
// ─────────────────────────────────────────────────────────────────────────────

fn nav(id: &str, label: &str, route: &str, icon: &str) -> NavigationItem {
    NavigationItem {
        id: id.to_string(),
        label: label.to_string(),
        route: route.to_string(),
        icon: Some(icon.to_string()),
        badge: None,
    }
}

fn patterns(globs: &[&str]) -> Vec<String> {
    globs.iter().map(|g| g.to_string()).collect()
}

/// The stock experience table. Exhaustive over [`Experience::ALL`]; the
/// registry re-checks exhaustiveness when the engine is built so a partial
/// user-supplied table fails at startup rather than at query time.
pub(super) fn default_experiences() -> BTreeMap<Experience, ExperienceConfig> {
    let mut table = BTreeMap::new();

    table.insert(
        Experience::Operator,
        ExperienceConfig {
            default_route: "/control-tower".into(),
            allowed_patterns: patterns(&[
                "/control-tower",
                "/control-tower/*",
                "/service-orders",
                "/service-orders/*",
                "/providers",
                "/providers/*",
                "/assignments",
                "/assignments/*",
                "/reports/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("control-tower", "Control tower", "/control-tower", "radar"),
                nav("service-orders", "Service orders", "/service-orders", "clipboard"),
                nav("providers", "Providers", "/providers", "users"),
                nav("assignments", "Assignments", "/assignments", "calendar"),
                nav("reports", "Reports", "/reports/overview", "chart"),
            ],
            header: HeaderOptions {
                show_search: true,
                show_notifications: true,
                title: Some("Operations".into()),
                ..HeaderOptions::default()
            },
        },
    );

    table.insert(
        Experience::Provider,
        ExperienceConfig {
            default_route: "/agenda".into(),
            allowed_patterns: patterns(&[
                "/agenda",
                "/agenda/*",
                "/service-orders",
                "/service-orders/*",
                "/earnings",
                "/earnings/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("agenda", "Agenda", "/agenda", "calendar"),
                nav("service-orders", "Service orders", "/service-orders", "clipboard"),
                nav("earnings", "Earnings", "/earnings", "wallet"),
            ],
            header: HeaderOptions {
                show_notifications: true,
                ..HeaderOptions::default()
            },
        },
    );

    table.insert(
        Experience::ProviderOnboarding,
        ExperienceConfig {
            default_route: "/onboarding".into(),
            allowed_patterns: patterns(&[
                "/onboarding",
                "/onboarding/*",
                "/account/documents/*",
            ]),
            navigation: vec![nav("onboarding", "Get started", "/onboarding", "flag")],
            header: HeaderOptions {
                title: Some("Welcome".into()),
                ..HeaderOptions::default()
            },
        },
    );

    table.insert(
        Experience::WorkTeam,
        ExperienceConfig {
            default_route: "/work-orders".into(),
            allowed_patterns: patterns(&[
                "/work-orders",
                "/work-orders/*",
                "/agenda",
                "/agenda/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("work-orders", "Work orders", "/work-orders", "clipboard"),
                nav("agenda", "Agenda", "/agenda", "calendar"),
            ],
            header: HeaderOptions::default(),
        },
    );

    table.insert(
        Experience::Customer,
        ExperienceConfig {
            default_route: "/orders".into(),
            allowed_patterns: patterns(&[
                "/orders",
                "/orders/*",
                "/support",
                "/support/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("orders", "My orders", "/orders", "package"),
                nav("support", "Support", "/support", "life-buoy"),
            ],
            header: HeaderOptions {
                show_notifications: true,
                ..HeaderOptions::default()
            },
        },
    );

    table.insert(
        Experience::Psm,
        ExperienceConfig {
            default_route: "/portfolio".into(),
            allowed_patterns: patterns(&[
                "/portfolio",
                "/portfolio/*",
                "/providers",
                "/providers/*",
                "/service-orders",
                "/service-orders/*",
                "/reports/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("portfolio", "Portfolio", "/portfolio", "briefcase"),
                nav("providers", "Providers", "/providers", "users"),
                nav("service-orders", "Service orders", "/service-orders", "clipboard"),
                nav("reports", "Reports", "/reports/overview", "chart"),
            ],
            header: HeaderOptions {
                show_search: true,
                ..HeaderOptions::default()
            },
        },
    );

    table.insert(
        Experience::Seller,
        ExperienceConfig {
            default_route: "/sales".into(),
            allowed_patterns: patterns(&[
                "/sales",
                "/sales/*",
                "/offers",
                "/offers/*",
                "/customers",
                "/customers/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("sales", "Sales", "/sales", "trending-up"),
                nav("offers", "Offers", "/offers", "tag"),
                nav("customers", "Customers", "/customers", "users"),
            ],
            header: HeaderOptions::default(),
        },
    );

    table.insert(
        Experience::OfferManager,
        ExperienceConfig {
            default_route: "/offers".into(),
            allowed_patterns: patterns(&[
                "/offers",
                "/offers/*",
                "/catalog",
                "/catalog/*",
                "/pricing",
                "/pricing/*",
                "/account/*",
            ]),
            navigation: vec![
                nav("offers", "Offers", "/offers", "tag"),
                nav("catalog", "Catalog", "/catalog", "grid"),
                nav("pricing", "Pricing", "/pricing", "dollar-sign"),
            ],
            header: HeaderOptions {
                show_search: true,
                ..HeaderOptions::default()
            },
        },
    );

    table.insert(
        Experience::Admin,
        ExperienceConfig {
            default_route: "/admin".into(),
            // Full route access. This is registry configuration, not an
            // engine rule: a deployment may scope admins to a finite list.
            allowed_patterns: patterns(&["*"]),
            navigation: vec![
                nav("admin", "Administration", "/admin", "shield"),
                nav("control-tower", "Control tower", "/control-tower", "radar"),
                nav("offers", "Offers", "/offers", "tag"),
                nav("reports", "Reports", "/reports/overview", "chart"),
            ],
            header: HeaderOptions {
                show_search: true,
                show_notifications: true,
                show_experience_switcher: true,
                title: Some("Administration".into()),
                ..HeaderOptions::default()
            },
        },
    );

    table
}
