//! # Coolant
//!
//! Core of the Coolant Manager console: who is logged in, what they may
//! see, and authorized access to the REST API.
//!
//! The console wires a [`SessionManager`](coolant_session::SessionManager)
//! (login, logout, password recovery, startup validation of the persisted
//! token) to an [`AccessPolicy`](coolant_access::AccessPolicy) (route guard,
//! sidebar, action gates) and an [`ApiClient`] for every other endpoint.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coolant::prelude::*;
//!
//! # async fn run() -> Result<(), ConsoleError> {
//! coolant::telemetry::init();
//!
//! let console = Console::builder().config(ConsoleConfig::from_env()).build()?;
//! console.start(Route::Dashboard).await?;
//! console.session().login("admin@example.com", "secret").await?;
//! for item in console.menu() {
//!     println!("{} -> {}", item.label, item.route());
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod console;
mod error;
pub mod telemetry;

pub use api::ApiClient;
pub use config::{CREDENTIALS_FILE, ConsoleConfig, DEFAULT_API_BASE_URL};
pub use console::{Console, ConsoleBuilder};
pub use error::ConsoleError;

pub use coolant_access as access;
pub use coolant_protocol as protocol;
pub use coolant_session as session;
pub use coolant_transport as transport;

/// Everything a console front end usually needs.
pub mod prelude {
    pub use crate::{ApiClient, Console, ConsoleBuilder, ConsoleConfig, ConsoleError};
    pub use coolant_access::{AccessPolicy, Action, GuardDecision, MenuItem};
    pub use coolant_protocol::{Role, Route, User, UserId};
    pub use coolant_session::{
        FileStore, MemoryStore, Notification, NotificationLevel, SessionPhase, SessionState,
    };
}
