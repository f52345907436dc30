//! User-facing notifications ("toasts").
//!
//! The session manager reports every outcome through a [`Notifier`]. The UI
//! decides how to render them; [`NotificationLog`] simply queues them.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message shown to the user for `duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(NotificationLevel::Info, message, duration)
    }

    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(NotificationLevel::Success, message, duration)
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(NotificationLevel::Error, message, duration)
    }

    fn new(level: NotificationLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            duration,
        }
    }
}

/// Receives notifications from the session manager.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// An in-memory queue of notifications, drained by whoever renders them.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Copies the queue without removing anything.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            level = %notification.level,
            message = %notification.message,
            "notification queued"
        );
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Writes notifications to the log instead of a screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            level,
            message,
            duration,
        } = notification;
        match level {
            NotificationLevel::Error => tracing::warn!(?duration, "{message}"),
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!(%level, ?duration, "{message}")
            }
        }
    }
}
