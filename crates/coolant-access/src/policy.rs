//! The access-policy table: which roles may open which views and perform
//! which actions.

use std::collections::HashMap;
use std::fmt;

use coolant_protocol::{Role, Route};
use serde::{Deserialize, Serialize};

use crate::AccessError;

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A protected area of the console. Every non-public [`Route`] belongs to
/// exactly one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Clients,
    Distributors,
    Employees,
    Machines,
    Reports,
    Profile,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Self::Dashboard,
        Self::Clients,
        Self::Distributors,
        Self::Employees,
        Self::Machines,
        Self::Reports,
        Self::Profile,
    ];

    /// The section a route belongs to, or `None` for public routes.
    pub fn of(route: &Route) -> Option<Self> {
        match route {
            Route::Dashboard => Some(Self::Dashboard),
            Route::Clients => Some(Self::Clients),
            Route::Distributors => Some(Self::Distributors),
            Route::Employees => Some(Self::Employees),
            Route::Machines => Some(Self::Machines),
            Route::Reports => Some(Self::Reports),
            Route::Profile => Some(Self::Profile),
            Route::Root
            | Route::Login
            | Route::ForgotPassword
            | Route::ResetPassword { .. }
            | Route::NotFound { .. } => None,
        }
    }

    /// The route that opens this section.
    pub fn route(self) -> Route {
        match self {
            Self::Dashboard => Route::Dashboard,
            Self::Clients => Route::Clients,
            Self::Distributors => Route::Distributors,
            Self::Employees => Route::Employees,
            Self::Machines => Route::Machines,
            Self::Reports => Route::Reports,
            Self::Profile => Route::Profile,
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A role-gated operation offered somewhere in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AddReading,
    RespondToReading,
    DeleteReading,
    AddClient,
    DeleteClient,
    AssignClientDistributor,
    AddDistributor,
    EditDistributor,
    DeleteDistributor,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Self::AddReading,
        Self::RespondToReading,
        Self::DeleteReading,
        Self::AddClient,
        Self::DeleteClient,
        Self::AssignClientDistributor,
        Self::AddDistributor,
        Self::EditDistributor,
        Self::DeleteDistributor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddReading => "add_reading",
            Self::RespondToReading => "respond_to_reading",
            Self::DeleteReading => "delete_reading",
            Self::AddClient => "add_client",
            Self::DeleteClient => "delete_client",
            Self::AssignClientDistributor => "assign_client_distributor",
            Self::AddDistributor => "add_distributor",
            Self::EditDistributor => "edit_distributor",
            Self::DeleteDistributor => "delete_distributor",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// The set of roles an entry admits.
///
/// `AllExcept` and `Only` differ when nobody is logged in: an exclusion list
/// admits an anonymous viewer, an allow-list does not. The sidebar relies on
/// that difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "roles")]
pub enum Audience {
    Everyone,
    Only(Vec<Role>),
    AllExcept(Vec<Role>),
}

impl Audience {
    pub fn admits(&self, role: Option<Role>) -> bool {
        match (self, role) {
            (Self::Everyone, _) => true,
            (Self::Only(roles), Some(role)) => roles.contains(&role),
            (Self::Only(_), None) => false,
            (Self::AllExcept(roles), Some(role)) => !roles.contains(&role),
            (Self::AllExcept(_), None) => true,
        }
    }
}

// ---------------------------------------------------------------------------
// AccessPolicy
// ---------------------------------------------------------------------------

/// Declarative section/action → audience table.
///
/// Anything missing from the table is denied. [`AccessPolicy::default`] is
/// the console's stock table; a deployment can load its own with serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    sections: HashMap<Section, Audience>,
    actions: HashMap<Action, Audience>,
}

impl AccessPolicy {
    /// An empty table that denies everything.
    pub fn deny_all() -> Self {
        Self {
            sections: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    pub fn with_section(mut self, section: Section, audience: Audience) -> Self {
        self.sections.insert(section, audience);
        self
    }

    pub fn with_action(mut self, action: Action, audience: Audience) -> Self {
        self.actions.insert(action, audience);
        self
    }

    pub fn section_audience(&self, section: Section) -> Option<&Audience> {
        self.sections.get(&section)
    }

    pub fn action_audience(&self, action: Action) -> Option<&Audience> {
        self.actions.get(&action)
    }

    /// Whether `role` may perform `action`.
    pub fn allows(&self, role: Role, action: Action) -> bool {
        self.action_audience(action)
            .is_some_and(|audience| audience.admits(Some(role)))
    }

    /// Whether `role` may open `route`. Public routes are open to everyone.
    pub fn allows_route(&self, role: Role, route: &Route) -> bool {
        self.admits_route(Some(role), route)
    }

    /// Like [`allows_route`](Self::allows_route), for a viewer who may be
    /// anonymous.
    pub fn admits_route(&self, role: Option<Role>, route: &Route) -> bool {
        match Section::of(route) {
            None => true,
            Some(section) => self
                .section_audience(section)
                .is_some_and(|audience| audience.admits(role)),
        }
    }

    /// # Errors
    /// [`AccessError::ActionDenied`] when the table refuses.
    pub fn check(&self, role: Role, action: Action) -> Result<(), AccessError> {
        if self.allows(role, action) {
            Ok(())
        } else {
            Err(AccessError::ActionDenied { role, action })
        }
    }

    /// # Errors
    /// [`AccessError::RouteDenied`] when the table refuses.
    pub fn check_route(&self, role: Role, route: &Route) -> Result<(), AccessError> {
        if self.allows_route(role, route) {
            Ok(())
        } else {
            Err(AccessError::RouteDenied {
                role,
                route: route.path(),
            })
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        use Audience::{AllExcept, Everyone, Only};
        use Role::{Admin, Client, Distributor, Manager, Manufacturer};

        Self::deny_all()
            .with_section(Section::Dashboard, Everyone)
            .with_section(Section::Clients, Everyone)
            .with_section(Section::Profile, Everyone)
            .with_section(Section::Distributors, Only(vec![Admin, Manufacturer]))
            .with_section(Section::Employees, AllExcept(vec![Client]))
            .with_section(Section::Machines, AllExcept(vec![Client]))
            .with_section(Section::Reports, AllExcept(vec![Client]))
            .with_action(Action::AddReading, AllExcept(vec![Manufacturer, Client]))
            .with_action(Action::RespondToReading, Only(vec![Manager, Distributor]))
            .with_action(Action::DeleteReading, Only(vec![Admin, Manager, Distributor]))
            .with_action(Action::AddClient, AllExcept(vec![Client]))
            .with_action(Action::DeleteClient, Only(vec![Admin, Manager, Distributor]))
            .with_action(
                Action::AssignClientDistributor,
                Only(vec![Admin, Manager, Distributor]),
            )
            .with_action(Action::AddDistributor, Only(vec![Admin, Manufacturer]))
            .with_action(Action::EditDistributor, Only(vec![Admin, Manufacturer]))
            .with_action(Action::DeleteDistributor, Only(vec![Admin]))
    }
}
