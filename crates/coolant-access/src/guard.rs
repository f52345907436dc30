//! The route guard: what happens when the console is asked to show a view.

use coolant_protocol::Route;
use coolant_session::SessionState;

use crate::{AccessError, AccessPolicy};

/// Outcome of [`guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested view.
    Proceed,
    /// The session is still loading; decide again once it settles.
    Wait,
    /// Show another view instead.
    Redirect(Route),
    /// Logged in, but the role may not see this view.
    Forbidden,
}

/// Decides whether `route` may be shown for the session in `state`.
///
/// - `/` always redirects to the dashboard (which is itself guarded).
/// - Other public routes always proceed, even while loading.
/// - Protected routes wait while the session is loading, redirect to the
///   login view when nobody is logged in, and are forbidden when the
///   user's role is not admitted by `policy`.
///
/// The decision is a pure function of its inputs.
pub fn guard(policy: &AccessPolicy, state: &SessionState, route: &Route) -> GuardDecision {
    if *route == Route::Root {
        return GuardDecision::Redirect(Route::Dashboard);
    }
    if route.is_public() {
        return GuardDecision::Proceed;
    }
    if state.is_loading() {
        return GuardDecision::Wait;
    }
    let Some(role) = state.role() else {
        return GuardDecision::Redirect(Route::Login);
    };
    if policy.allows_route(role, route) {
        GuardDecision::Proceed
    } else {
        tracing::debug!(%role, route = %route, "route forbidden");
        GuardDecision::Forbidden
    }
}

impl GuardDecision {
    /// Folds the decision into the view to show, for callers that cannot
    /// wait.
    ///
    /// # Errors
    /// [`AccessError::NotAuthenticated`] for [`GuardDecision::Wait`] and
    /// [`AccessError::RouteDenied`] for [`GuardDecision::Forbidden`].
    pub fn resolve(self, state: &SessionState, requested: Route) -> Result<Route, AccessError> {
        match self {
            Self::Proceed => Ok(requested),
            Self::Redirect(to) => Ok(to),
            Self::Wait => Err(AccessError::NotAuthenticated),
            Self::Forbidden => match state.role() {
                Some(role) => Err(AccessError::RouteDenied {
                    role,
                    route: requested.path(),
                }),
                None => Err(AccessError::NotAuthenticated),
            },
        }
    }
}
