//! Session types: the in-memory record of "who is logged in".
//!
//! One [`SessionState`] exists per running console. It tracks:
//! - WHO is logged in (`user`)
//! - WHETHER an authentication call is in flight (`phase`)

use std::fmt;

use coolant_protocol::{Role, User};

// ---------------------------------------------------------------------------
// AuthOperation
// ---------------------------------------------------------------------------

/// The authentication-affecting operations that put the session into a
/// loading phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOperation {
    Initialize,
    Login,
    ForgotPassword,
    ResetPassword,
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialize => write!(f, "initialize"),
            Self::Login => write!(f, "login"),
            Self::ForgotPassword => write!(f, "forgot-password"),
            Self::ResetPassword => write!(f, "reset-password"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Lifecycle of the session.
///
/// ```text
///   Uninitialized ──initialize──→ Loading(Initialize) ──→ Authenticated
///                                                    └──→ Unauthenticated
///
///   Unauthenticated ──login──→ Loading(Login) ──ok──→ Authenticated
///                                         └──err──→ Unauthenticated
///   Authenticated ──logout──→ Unauthenticated           (synchronous)
///   Unauthenticated ──forgot/reset──→ Loading(..) ──→ Unauthenticated
/// ```
///
/// After any operation the phase is derived from whether a user is present,
/// so a password flow can never produce `Authenticated` on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, startup check not run yet. Counts as loading so route
    /// guards wait instead of redirecting.
    Uninitialized,
    Loading(AuthOperation),
    Authenticated,
    Unauthenticated,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Snapshot of the session, as published to every consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    phase: SessionPhase,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            phase: SessionPhase::Uninitialized,
        }
    }
}

impl SessionState {
    /// A settled session for `user`.
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            phase: SessionPhase::Authenticated,
        }
    }

    /// A settled session with nobody logged in.
    pub fn signed_out() -> Self {
        Self {
            user: None,
            phase: SessionPhase::Unauthenticated,
        }
    }

    /// The current user, if a validated credential exists.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Shorthand for the current user's role.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// `true` before the startup check has finished and while any
    /// authentication call is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Uninitialized | SessionPhase::Loading(_)
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) fn begin(&mut self, operation: AuthOperation) {
        self.phase = SessionPhase::Loading(operation);
    }

    /// Leaves the loading phase, deriving the new phase from `user`.
    pub(crate) fn settle(&mut self) {
        self.phase = if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        };
    }

    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Drops the user without touching an in-flight loading phase.
    pub(crate) fn clear_user(&mut self) {
        self.user = None;
        if !self.is_loading() {
            self.phase = SessionPhase::Unauthenticated;
        }
    }
}
