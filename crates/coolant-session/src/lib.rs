//! Authentication session management for the Coolant console.
//!
//! This crate owns the lifecycle of a console session:
//!
//! 1. **Startup** — validating a persisted bearer token ([`SessionManager::initialize`])
//! 2. **Login / logout** — obtaining and forgetting the credential
//! 3. **Password recovery** — the forgot/reset round-trips
//!
//! Side effects leave through three seams injected at construction:
//! [`CredentialStore`] (durable storage), [`Notifier`] (toasts) and
//! [`Navigator`] (view changes).
//!
//! # How it fits in the stack
//!
//! ```text
//! Access Layer (above)  ← reads the session to gate routes and menus
//!     ↕
//! Session Layer (this crate)  ← manages who is logged in
//!     ↕
//! Protocol + Transport (below)  ← provide User, Route, and the REST round-trip
//! ```

mod auth;
mod error;
mod manager;
mod navigate;
mod notify;
mod session;
mod store;

#[cfg(test)]
mod test_utils;

pub use auth::AuthClient;
pub use error::{SessionError, StoreError};
pub use manager::SessionManager;
pub use navigate::{History, Navigator};
pub use notify::{Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier};
pub use session::{AuthOperation, SessionPhase, SessionState};
pub use store::{CredentialStore, Credentials, FileStore, MemoryStore, TOKEN_KEY, USER_KEY};
