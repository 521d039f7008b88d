use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The portal experience an actor operates under.
///
/// The set is closed: every role set resolves to exactly one of these, and
/// the registry must carry a configuration for each variant. Identity is the
/// only comparison that matters; two experiences are interchangeable only if
/// they are the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    /// Back-office operations portal (control tower, dispatch).
    Operator,
    /// Field service provider portal.
    Provider,
    /// Onboarding flow for providers not yet activated.
    ProviderOnboarding,
    /// Portal for members of a provider's work team.
    WorkTeam,
    /// End-customer portal.
    Customer,
    /// Provider success manager portal.
    Psm,
    /// Sales portal.
    Seller,
    /// Offer and catalog management portal.
    OfferManager,
    /// Administration portal.
    Admin,
}

impl Experience {
    /// Every experience, in declaration order.
    ///
    /// The registry indexes its entries by this order; keep it in sync with
    /// the variant declarations above.
    pub const ALL: [Experience; 9] = [
        Experience::Operator,
        Experience::Provider,
        Experience::ProviderOnboarding,
        Experience::WorkTeam,
        Experience::Customer,
        Experience::Psm,
        Experience::Seller,
        Experience::OfferManager,
        Experience::Admin,
    ];

    /// Returns the string identifier of the experience.
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Operator => "operator",
            Experience::Provider => "provider",
            Experience::ProviderOnboarding => "provider_onboarding",
            Experience::WorkTeam => "work_team",
            Experience::Customer => "customer",
            Experience::Psm => "psm",
            Experience::Seller => "seller",
            Experience::OfferManager => "offer_manager",
            Experience::Admin => "admin",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Experience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator" => Ok(Experience::Operator),
            "provider" => Ok(Experience::Provider),
            "provider_onboarding" => Ok(Experience::ProviderOnboarding),
            "work_team" => Ok(Experience::WorkTeam),
            "customer" => Ok(Experience::Customer),
            "psm" => Ok(Experience::Psm),
            "seller" => Ok(Experience::Seller),
            "offer_manager" => Ok(Experience::OfferManager),
            "admin" => Ok(Experience::Admin),
            _ => Err(format!(
                "Invalid experience: '{}'. Valid experiences: {}",
                s,
                Experience::ALL
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}
