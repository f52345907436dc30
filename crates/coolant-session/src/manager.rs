//! The session manager: the single owner of "who is logged in".
//!
//! It's responsible for:
//! - Validating a persisted credential at startup ([`SessionManager::initialize`])
//! - Exchanging credentials for a token ([`SessionManager::login`])
//! - Forgetting the credential ([`SessionManager::logout`])
//! - The two password-recovery calls
//!
//! Every outcome is reported three ways: the published [`SessionState`],
//! a [`Notification`], and (for some outcomes) a navigation. The returned
//! `Result` exists for callers that want the detail; the UI contract is the
//! state plus the notifications.
//!
//! # Concurrency note
//!
//! There is a single loading slot. Overlapping calls are not de-duplicated
//! and each one settles the phase when it finishes, so the last call to
//! finish decides what the phase reads afterwards.

use std::sync::Arc;
use std::time::Duration;

use coolant_protocol::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, Route, User};
use coolant_transport::Transport;
use tokio::sync::watch;

use crate::{
    AuthClient, AuthOperation, CredentialStore, Credentials, Navigator, Notification, Notifier,
    SessionError, SessionState, StoreError,
};

const SHORT_TOAST: Duration = Duration::from_secs(3);
const LONG_TOAST: Duration = Duration::from_secs(5);

/// Owns the session state and performs every authentication operation.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ initialize() ──→ login() ──→ logout()
///   │            │              │           │
///   ▼            ▼              ▼           ▼
/// [Uninitialized] [Loading] [Authenticated] [Unauthenticated]
/// ```
pub struct SessionManager<T: Transport> {
    api: AuthClient<T>,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    /// Published snapshot. Receivers come and go; updates never need one.
    state: watch::Sender<SessionState>,
}

impl<T: Transport> SessionManager<T> {
    pub fn new(
        transport: T,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            api: AuthClient::new(transport),
            store,
            notifier,
            navigator,
            state,
        }
    }

    /// A copy of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// The persisted bearer token, for callers that make authorized requests.
    ///
    /// # Errors
    /// Propagates store read failures.
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.credentials().load_token()
    }

    pub fn api(&self) -> &AuthClient<T> {
        &self.api
    }

    fn credentials(&self) -> Credentials<'_> {
        Credentials::new(self.store.as_ref())
    }

    fn begin(&self, operation: AuthOperation) {
        tracing::debug!(%operation, "auth operation started");
        self.state.send_modify(|s| s.begin(operation));
    }

    fn finish(&self, user: Option<Option<User>>) {
        self.state.send_modify(|s| {
            if let Some(user) = user {
                s.set_user(user);
            }
            s.settle();
        });
    }

    fn forget_credentials(&self) {
        if let Err(e) = self.credentials().clear() {
            tracing::error!(error = %e, "failed to clear persisted credentials");
        }
    }

    /// Validates the persisted token, if any, against `GET /profile`.
    ///
    /// No token means no network call. A refused token (or any failure of
    /// the profile call) removes both persisted entries. No notification is
    /// shown either way.
    ///
    /// # Errors
    /// The profile call's failure, after the credential has been cleared.
    pub async fn initialize(&self) -> Result<Option<User>, SessionError> {
        self.begin(AuthOperation::Initialize);

        let token = self.credentials().load_token().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "credential store unreadable, starting signed out");
            None
        });
        let Some(token) = token else {
            self.finish(None);
            return Ok(None);
        };

        match self.api.fetch_profile(&token).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "session restored");
                self.finish(Some(Some(user.clone())));
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted credential rejected");
                self.forget_credentials();
                self.finish(Some(None));
                Err(e)
            }
        }
    }

    /// Exchanges credentials for a token, persists both entries, greets the
    /// user and moves to the dashboard.
    ///
    /// On failure nothing about the session changes except that loading
    /// ends.
    ///
    /// # Errors
    /// The login call's failure, or a store failure while persisting.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        self.begin(AuthOperation::Login);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let outcome = async {
            let response = self.api.login(&request).await?;
            self.credentials().save(&response.token, &response.user)?;
            Ok::<_, SessionError>(response.user)
        }
        .await;

        match outcome {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "logged in");
                self.finish(Some(Some(user.clone())));
                self.notifier.notify(Notification::success(
                    format!("Welcome {}!", user.full_name),
                    SHORT_TOAST,
                ));
                self.navigator.navigate(Route::Dashboard);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.finish(None);
                self.notifier.notify(Notification::error(
                    "Login failed. Please check your credentials.",
                    LONG_TOAST,
                ));
                Err(e)
            }
        }
    }

    /// Removes the persisted credential and the in-memory user, then moves
    /// to the login view. Calling it while signed out repeats the same
    /// effects harmlessly.
    pub fn logout(&self) {
        self.forget_credentials();
        self.state.send_modify(SessionState::clear_user);
        tracing::info!("logged out");
        self.navigator.navigate(Route::Login);
        self.notifier.notify(Notification::info(
            "You have been logged out.",
            SHORT_TOAST,
        ));
    }

    /// Asks the API to email a reset link.
    ///
    /// # Errors
    /// The call's failure. The user has already been notified.
    pub async fn forgot_password(&self, email: &str) -> Result<(), SessionError> {
        self.begin(AuthOperation::ForgotPassword);

        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        let outcome = self.api.forgot_password(&request).await;
        self.finish(None);

        match outcome {
            Ok(response) => {
                if let Some(link) = &response.reset_link {
                    tracing::debug!(reset_link = %link, "reset link issued");
                }
                self.notifier.notify(Notification::success(
                    format!("Password reset link sent to {email}"),
                    LONG_TOAST,
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "forgot-password failed");
                self.notifier.notify(Notification::error(
                    "Failed to send reset email. Please try again.",
                    LONG_TOAST,
                ));
                Err(e)
            }
        }
    }

    /// Sets a new password using a reset token, then sends the user to the
    /// login view. Never signs anyone in.
    ///
    /// # Errors
    /// The call's failure. The user has already been notified.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), SessionError> {
        self.begin(AuthOperation::ResetPassword);

        let request = ResetPasswordRequest {
            token: token.to_string(),
            password: new_password.to_string(),
        };
        let outcome = self.api.reset_password(&request).await;
        self.finish(None);

        match outcome {
            Ok(()) => {
                self.notifier.notify(Notification::success(
                    "Password has been reset successfully. Please log in.",
                    LONG_TOAST,
                ));
                self.navigator.navigate(Route::Login);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "reset-password failed");
                self.notifier.notify(Notification::error(
                    "Failed to reset password. Please try again.",
                    LONG_TOAST,
                ));
                Err(e)
            }
        }
    }
}
