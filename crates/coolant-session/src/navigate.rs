//! Active-view tracking.

use std::sync::{Mutex, MutexGuard, PoisonError};

use coolant_protocol::Route;

/// Moves the console to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Keeps the active route and every route visited since creation.
#[derive(Debug)]
pub struct History {
    inner: Mutex<HistoryInner>,
}

#[derive(Debug)]
struct HistoryInner {
    current: Route,
    trail: Vec<Route>,
}

impl History {
    /// Starts at `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                current: initial.clone(),
                trail: vec![initial],
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The active route.
    pub fn current(&self) -> Route {
        self.lock().current.clone()
    }

    /// Every route visited, oldest first, including the initial one.
    pub fn trail(&self) -> Vec<Route> {
        self.lock().trail.clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Root)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigating");
        let mut inner = self.lock();
        inner.trail.push(route.clone());
        inner.current = route;
    }
}
