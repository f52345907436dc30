//! Error types for the access layer.

use coolant_protocol::Role;

use crate::Action;

/// A role asked for something the access policy does not grant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The role may not open this view.
    #[error("role {role} may not open {route}")]
    RouteDenied { role: Role, route: String },

    /// The role may not perform this action.
    #[error("role {role} may not perform {action}")]
    ActionDenied { role: Role, action: Action },

    /// A protected view or action was requested with nobody logged in.
    #[error("login required")]
    NotAuthenticated,
}
