//! User-facing notifications (toasts).
//!
//! Handlers never present anything themselves; they return
//! [`Action::Notify`](super::Action::Notify) and the runtime hands the
//! [`Notification`] to whichever [`Notifier`] it was built with.

use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// An operation completed.
    Success,
    /// The request was refused, nothing failed.
    Warning,
    /// An operation failed.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// Creates a [`NotificationLevel::Success`] notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Creates a [`NotificationLevel::Warning`] notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    /// Creates a [`NotificationLevel::Error`] notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Presents notifications to the user.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Notifier that records notifications as `tracing` events.
///
/// Success maps to `INFO`, warning to `WARN` and error to `ERROR`; the message is
/// carried in the `text` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(text = %notification.message, "notification"),
            NotificationLevel::Warning => tracing::warn!(text = %notification.message, "notification"),
            NotificationLevel::Error => tracing::error!(text = %notification.message, "notification"),
        }
    }
}
