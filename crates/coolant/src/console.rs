//! `Console` builder and lifetime.
//!
//! This is the entry point for running the console core. It ties together
//! all the layers: transport → protocol → session → access.

use std::sync::Arc;

use coolant_access::{AccessError, AccessPolicy, Action, GuardDecision, MenuItem, guard, menu};
use coolant_protocol::Route;
use coolant_session::{
    CredentialStore, FileStore, History, MemoryStore, Navigator, Notification, NotificationLog,
    Notifier, SessionManager, TracingNotifier,
};
use coolant_transport::{HttpTransport, Transport};

use crate::{ApiClient, ConsoleConfig, ConsoleError};

/// Builder for configuring and starting a [`Console`].
///
/// # Example
///
/// ```rust,no_run
/// use coolant::prelude::*;
///
/// # async fn run() -> Result<(), ConsoleError> {
/// let console = Console::builder()
///     .config(ConsoleConfig::from_env())
///     .build()?;
/// let landing = console.start(Route::Dashboard).await?;
/// println!("showing {landing}");
/// # Ok(())
/// # }
/// ```
pub struct ConsoleBuilder {
    config: ConsoleConfig,
    store: Option<Arc<dyn CredentialStore>>,
    policy: AccessPolicy,
    echo_notifications: bool,
}

impl ConsoleBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ConsoleConfig::default(),
            store: None,
            policy: AccessPolicy::default(),
            echo_notifications: false,
        }
    }

    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `store` instead of the one `config.state_dir` implies.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Also write every notification to the log.
    pub fn echo_notifications(mut self, echo: bool) -> Self {
        self.echo_notifications = echo;
        self
    }

    /// Builds a console talking HTTP to `config.api_base_url`.
    ///
    /// # Errors
    /// Returns an error for an invalid base URL or an unusable state
    /// directory.
    pub fn build(self) -> Result<Console<HttpTransport>, ConsoleError> {
        let transport =
            HttpTransport::with_timeout(&self.config.api_base_url, self.config.request_timeout)?;
        self.build_with(transport)
    }

    /// Builds a console over any transport.
    ///
    /// # Errors
    /// Returns [`ConsoleError::Store`] if the state directory cannot be
    /// created.
    pub fn build_with<T: Transport>(self, transport: T) -> Result<Console<T>, ConsoleError> {
        let store: Arc<dyn CredentialStore> = match (self.store, self.config.credentials_path()) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(FileStore::open(path)?),
            (None, None) => Arc::new(MemoryStore::new()),
        };
        let notifications = Arc::new(NotificationLog::new());
        let history = Arc::new(History::default());
        let notifier: Arc<dyn Notifier> = Arc::new(Outbox {
            log: Arc::clone(&notifications),
            echo: self.echo_notifications.then_some(TracingNotifier),
        });

        let transport = Arc::new(transport);
        let session = SessionManager::new(
            Arc::clone(&transport),
            Arc::clone(&store),
            notifier,
            Arc::clone(&history) as Arc<dyn Navigator>,
        );
        let api = ApiClient::new(transport, Arc::clone(&store));

        tracing::debug!(api_base_url = %self.config.api_base_url, "console built");

        Ok(Console {
            session,
            api,
            notifications,
            history,
            policy: self.policy,
        })
    }
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues notifications for the UI and optionally logs them.
struct Outbox {
    log: Arc<NotificationLog>,
    echo: Option<TracingNotifier>,
}

impl Notifier for Outbox {
    fn notify(&self, notification: Notification) {
        if let Some(echo) = &self.echo {
            echo.notify(notification.clone());
        }
        self.log.notify(notification);
    }
}

/// A running console: one session, one history, one policy.
pub struct Console<T: Transport> {
    session: SessionManager<Arc<T>>,
    api: ApiClient<Arc<T>>,
    notifications: Arc<NotificationLog>,
    history: Arc<History>,
    policy: AccessPolicy,
}

impl Console<HttpTransport> {
    /// Creates a new builder.
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::new()
    }
}

impl<T: Transport> Console<T> {
    /// Restores any persisted session, then opens `initial`.
    ///
    /// A persisted credential the API no longer accepts is not an error
    /// here; the console simply starts signed out.
    ///
    /// # Errors
    /// As [`open`](Self::open).
    pub async fn start(&self, initial: Route) -> Result<Route, ConsoleError> {
        tracing::info!("console starting");
        if let Err(e) = self.session.initialize().await {
            tracing::info!(error = %e, "starting signed out");
        }
        self.open(initial).await
    }

    /// Opens `route` if the guard allows it, following redirects, and
    /// returns the view actually shown. While an authentication call is in
    /// flight the decision waits for it to settle.
    ///
    /// # Errors
    /// [`ConsoleError::Access`] when the user's role may not see the view;
    /// nothing is navigated in that case.
    pub async fn open(&self, route: Route) -> Result<Route, ConsoleError> {
        let mut route = route;
        loop {
            let state = self.session.state();
            match guard(&self.policy, &state, &route) {
                GuardDecision::Proceed => {
                    self.history.navigate(route.clone());
                    return Ok(route);
                }
                GuardDecision::Redirect(to) => {
                    tracing::debug!(from = %route, to = %to, "redirecting");
                    route = to;
                }
                GuardDecision::Wait => {
                    let mut rx = self.session.subscribe();
                    // The sender lives in `self.session`, so this only
                    // returns once the session has settled.
                    let _ = rx.wait_for(|s| !s.is_loading()).await;
                }
                decision @ GuardDecision::Forbidden => {
                    return decision.resolve(&state, route).map_err(ConsoleError::from);
                }
            }
        }
    }

    /// The sidebar for the current user.
    pub fn menu(&self) -> Vec<MenuItem> {
        menu(&self.policy, self.session.state().role())
    }

    /// Whether the current user may perform `action`.
    pub fn can(&self, action: Action) -> bool {
        self.session
            .state()
            .role()
            .is_some_and(|role| self.policy.allows(role, action))
    }

    /// Like [`can`](Self::can), as a `Result`.
    ///
    /// # Errors
    /// [`AccessError::NotAuthenticated`] with nobody logged in,
    /// [`AccessError::ActionDenied`] when the role may not.
    pub fn check(&self, action: Action) -> Result<(), ConsoleError> {
        let role = self
            .session
            .state()
            .role()
            .ok_or(AccessError::NotAuthenticated)?;
        Ok(self.policy.check(role, action)?)
    }

    pub fn session(&self) -> &SessionManager<Arc<T>> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient<Arc<T>> {
        &self.api
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Ends the session lifetime. State subscribers observe the channel
    /// closing. Persisted credentials are left as they are.
    pub fn shutdown(self) {
        tracing::info!(route = %self.history.current(), "console shutting down");
    }
}
