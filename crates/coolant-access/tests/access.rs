//! Integration tests for the access layer: the policy, guard and menu seen
//! together from the outside.

use coolant_access::{
    AccessPolicy, Action, Audience, GuardDecision, Section, guard, menu,
};
use coolant_protocol::{Role, Route, User, UserId};
use coolant_session::SessionState;

fn user(role: Role) -> User {
    User {
        id: UserId(42),
        full_name: "Robin Role".into(),
        email: "robin@example.com".into(),
        role,
        designation: None,
        company_name: None,
        profile_image: None,
    }
}

const PROTECTED: [Route; 7] = [
    Route::Dashboard,
    Route::Clients,
    Route::Distributors,
    Route::Employees,
    Route::Machines,
    Route::Reports,
    Route::Profile,
];

#[test]
fn test_evaluation_is_deterministic() {
    let policy = AccessPolicy::default();

    for role in Role::ALL {
        let first: Vec<bool> = Action::ALL
            .iter()
            .map(|action| policy.allows(role, *action))
            .collect();
        for _ in 0..10 {
            let again: Vec<bool> = Action::ALL
                .iter()
                .map(|action| policy.allows(role, *action))
                .collect();
            assert_eq!(first, again, "{role} changed its answers");
        }
        assert_eq!(menu(&policy, Some(role)), menu(&policy, Some(role)));
    }
}

#[test]
fn test_guard_agrees_with_menu() {
    let policy = AccessPolicy::default();

    for role in Role::ALL {
        let state = SessionState::signed_in(user(role));
        let visible: Vec<Route> = menu(&policy, Some(role))
            .into_iter()
            .map(|item| item.route())
            .collect();

        for route in PROTECTED {
            let decision = guard(&policy, &state, &route);
            if visible.contains(&route) {
                assert_eq!(decision, GuardDecision::Proceed, "{role} on {route}");
            } else {
                assert_eq!(decision, GuardDecision::Forbidden, "{role} on {route}");
            }
        }
    }
}

#[test]
fn test_signed_out_user_is_sent_to_login_everywhere() {
    let policy = AccessPolicy::default();
    let state = SessionState::signed_out();

    for route in PROTECTED {
        assert_eq!(
            guard(&policy, &state, &route),
            GuardDecision::Redirect(Route::Login)
        );
    }
}

#[test]
fn test_unknown_path_is_not_guarded() {
    let policy = AccessPolicy::default();
    let route = Route::parse("/no/such/page");
    assert_eq!(
        guard(&policy, &SessionState::signed_out(), &route),
        GuardDecision::Proceed
    );
}

#[test]
fn test_custom_policy_changes_every_consumer() {
    let policy = AccessPolicy::default()
        .with_section(Section::Reports, Audience::Only(vec![Role::Admin]));
    let manager = SessionState::signed_in(user(Role::Manager));

    assert_eq!(
        guard(&policy, &manager, &Route::Reports),
        GuardDecision::Forbidden
    );
    assert!(
        !menu(&policy, Some(Role::Manager))
            .iter()
            .any(|item| item.section == Section::Reports)
    );
}
