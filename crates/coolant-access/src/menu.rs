//! The sidebar menu.

use coolant_protocol::{Role, Route};
use serde::Serialize;

use crate::{AccessPolicy, Section};

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub section: Section,
}

impl MenuItem {
    pub fn route(&self) -> Route {
        self.section.route()
    }
}

/// Every sidebar entry, in display order.
pub const SIDEBAR: [MenuItem; 7] = [
    MenuItem {
        label: "Home",
        section: Section::Dashboard,
    },
    MenuItem {
        label: "Distributor Management",
        section: Section::Distributors,
    },
    MenuItem {
        label: "Employee Management",
        section: Section::Employees,
    },
    MenuItem {
        label: "Client Management",
        section: Section::Clients,
    },
    MenuItem {
        label: "Machine Management",
        section: Section::Machines,
    },
    MenuItem {
        label: "Reports",
        section: Section::Reports,
    },
    MenuItem {
        label: "User Profile",
        section: Section::Profile,
    },
];

/// The entries `role` may see. `None` is an anonymous viewer.
pub fn menu(policy: &AccessPolicy, role: Option<Role>) -> Vec<MenuItem> {
    SIDEBAR
        .into_iter()
        .filter(|item| policy.admits_route(role, &item.route()))
        .collect()
}
