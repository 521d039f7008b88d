//! End-to-end portal flow tests.

use rstest::rstest;

use crate::{
    AuthzEngine, ConcourseConfig, Experience, PermissionSet, SessionOverride, Subject,
};

fn subject(roles: &[&str]) -> Subject {
    Subject::new().with_roles(roles.iter().copied())
}

#[rstest]
#[case(&["OPERATOR"], Experience::Operator, "/control-tower")]
#[case(&["PROVIDER"], Experience::Provider, "/agenda")]
#[case(&["PROVIDER_ONBOARDING"], Experience::ProviderOnboarding, "/onboarding")]
#[case(&["WORK_TEAM"], Experience::WorkTeam, "/work-orders")]
#[case(&["CUSTOMER"], Experience::Customer, "/orders")]
#[case(&["PSM"], Experience::Psm, "/portfolio")]
#[case(&["PROVIDER_SUCCESS_MANAGER"], Experience::Psm, "/portfolio")]
#[case(&["SELLER"], Experience::Seller, "/sales")]
#[case(&["OFFER_MANAGER"], Experience::OfferManager, "/offers")]
#[case(&["ADMIN"], Experience::Admin, "/admin")]
fn login_lands_each_role_on_its_portal(
    #[case] roles: &[&str],
    #[case] expected: Experience,
    #[case] landing: &str,
) {
    let engine = AuthzEngine::with_defaults();
    let subject = subject(roles);

    assert_eq!(engine.resolve_experience(&subject), expected);

    let config = engine.resolve_config(&subject, None);
    assert_eq!(config.default_route, landing);
    // Every portal can navigate to its own landing route.
    assert!(engine.is_route_allowed(landing, &subject, None));
}

#[rstest]
#[case(Experience::Operator, "/service-orders/42", true)]
#[case(Experience::Operator, "/admin/users", false)]
#[case(Experience::Provider, "/earnings/2026-08", true)]
#[case(Experience::Provider, "/providers/7", false)]
#[case(Experience::Customer, "/support/tickets/9", true)]
#[case(Experience::Customer, "/reports/overview", false)]
#[case(Experience::Admin, "/literally/anything", true)]
fn route_checks_follow_the_experience(
    #[case] experience: Experience,
    #[case] path: &str,
    #[case] allowed: bool,
) {
    let engine = AuthzEngine::with_defaults();
    // Each experience's own priority role name is its uppercased identifier.
    let subject = Subject::new().with_role(experience.as_str().to_uppercase());
    assert_eq!(engine.resolve_experience(&subject), experience);
    assert_eq!(engine.is_route_allowed(path, &subject, None), allowed);
}

#[test]
fn admin_tours_another_portal_and_returns() {
    let engine = AuthzEngine::with_defaults();
    let admin = subject(&["ADMIN"]);
    let session = SessionOverride::new();

    // Base: full access.
    assert!(engine.is_route_allowed("/providers/7/audit", &admin, None));

    // Switch to the provider portal; scope narrows to provider routes.
    session.set(&engine, &admin, Experience::Provider).unwrap();
    let active = session.active(&engine, &admin);
    assert_eq!(active, Some(Experience::Provider));
    assert!(engine.is_route_allowed("/agenda", &admin, active));
    assert!(!engine.is_route_allowed("/admin/users", &admin, active));
    assert_eq!(
        engine.resolve_config(&admin, active).default_route,
        "/agenda"
    );

    // Switch back.
    session.clear();
    let active = session.active(&engine, &admin);
    assert_eq!(active, None);
    assert!(engine.is_route_allowed("/admin/users", &admin, active));
}

#[test]
fn operator_cannot_tour_other_portals() {
    let engine = AuthzEngine::with_defaults();
    let operator = subject(&["OPERATOR"]);
    let session = SessionOverride::new();

    for experience in Experience::ALL {
        if experience == Experience::Operator {
            continue;
        }
        assert!(session.set(&engine, &operator, experience).is_err());
    }
    assert_eq!(session.active(&engine, &operator), None);
}

#[test]
fn multi_role_actor_follows_priority_then_tours() {
    let engine = AuthzEngine::with_defaults();
    // ADMIN outranks the other roles no matter how the set is ordered.
    let actor = subject(&["SELLER", "ADMIN", "OPERATOR"]);
    assert_eq!(engine.resolve_experience(&actor), Experience::Admin);

    let session = SessionOverride::new();
    session.set(&engine, &actor, Experience::Seller).unwrap();
    assert_eq!(
        session.active(&engine, &actor),
        Some(Experience::Seller)
    );

    // Losing the admin role mid-session drops the override and the actor
    // re-resolves from what is left.
    let demoted = subject(&["SELLER", "OPERATOR"]);
    assert_eq!(session.active(&engine, &demoted), None);
    assert_eq!(engine.resolve_experience(&demoted), Experience::Seller);
}

#[test]
fn permission_checks_are_independent_of_experience() {
    let engine = AuthzEngine::with_defaults();
    let held: PermissionSet = ["service_orders.*", "providers.read"]
        .into_iter()
        .collect();

    assert!(engine.check_permission(&held, "service_orders.cancel"));
    assert!(engine.check_permission(&held, "providers.read"));
    assert!(!engine.check_permission(&held, "providers.suspend"));

    let root: PermissionSet = ["*"].into_iter().collect();
    assert!(engine.check_permission(&root, "anything.at.all"));
}

#[test]
fn customized_configuration_drives_the_whole_flow() {
    let mut config = ConcourseConfig::default();
    config
        .roles
        .mapping
        .insert("field-ops".to_string(), "OPERATOR".to_string());
    let seller = config
        .experiences
        .get_mut(&Experience::Seller)
        .unwrap();
    seller.allowed_patterns.push("/campaigns/*".to_string());

    let engine = AuthzEngine::new(&config).unwrap();

    // Mapped IdP group classifies like the internal role.
    assert_eq!(
        engine.resolve_experience(&subject(&["field-ops"])),
        Experience::Operator
    );

    // The extra pattern is live for sellers only.
    assert!(engine.is_route_allowed("/campaigns/summer", &subject(&["SELLER"]), None));
    assert!(!engine.is_route_allowed("/campaigns/summer", &subject(&["CUSTOMER"]), None));
}

#[test]
fn engine_is_shareable_across_threads() {
    use std::sync::Arc;

    let engine = Arc::new(AuthzEngine::with_defaults());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let roles = if i % 2 == 0 { ["ADMIN"] } else { ["SELLER"] };
                let s = subject(&roles);
                for _ in 0..100 {
                    let experience = engine.resolve_experience(&s);
                    assert!(engine.is_route_allowed(
                        &engine.resolve_config(&s, None).default_route,
                        &s,
                        None
                    ));
                    assert!(engine.available_experiences(&s).contains(&experience));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
