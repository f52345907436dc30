//! Role-based access control for the Coolant console.
//!
//! Every visibility decision in the console reads one table, the
//! [`AccessPolicy`]. On top of it:
//!
//! - [`guard`]: what to do when a view is requested
//! - [`menu`]: which sidebar entries a role sees
//! - [`ClientScope`] / [`ReadingScope`]: which records a user sees

mod error;
mod guard;
mod menu;
mod policy;
mod scope;

pub use error::AccessError;
pub use guard::{GuardDecision, guard};
pub use menu::{MenuItem, SIDEBAR, menu};
pub use policy::{AccessPolicy, Action, Audience, Section};
pub use scope::{ClientScope, ReadingScope, can_edit_client};
