// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and the `Severity` and
//! `Expiry` enums used throughout the notification system.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Auto-expiry applied when a notification does not specify a duration and
/// no configured default overrides it.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(crate::config::DEFAULT_DURATION_MS);

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level of a notification.
///
/// Purely informational: severity drives presentation choices in consumers
/// and has no effect on expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral message.
    #[default]
    Default,
    /// Something was removed or failed irreversibly.
    Destructive,
    /// Operation completed successfully.
    Success,
    /// Something needs attention but did not block the operation.
    Warning,
}

/// When a notification leaves the active set on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// Use the store's configured default (5000 ms unless overridden).
    #[default]
    Default,
    /// Auto-dismiss after the given duration.
    After(Duration),
    /// Never auto-dismiss; the toast stays until explicitly dismissed.
    Never,
}

impl Expiry {
    /// Resolves to a concrete timer duration, `None` meaning no timer.
    pub(crate) fn resolve(self, default: Option<Duration>) -> Option<Duration> {
        match self {
            Expiry::Default => default,
            Expiry::After(d) => Some(d),
            Expiry::Never => None,
        }
    }
}

/// A transient, auto-expiring, user-dismissable message.
///
/// Notifications are immutable after creation; only their membership in the
/// active set changes over their lifetime.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique identifier for this notification.
    id: NotificationId,
    /// Severity level (informational only).
    severity: Severity,
    /// Optional short display text.
    title: Option<String>,
    /// Optional longer display text.
    description: Option<String>,
    /// Auto-expiry behavior.
    expiry: Expiry,
    /// When this notification was created.
    created_at: Instant,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new()
    }
}

impl Notification {
    /// Creates an empty notification with [`Severity::Default`].
    ///
    /// By convention at least one of title/description should be supplied,
    /// though nothing enforces it.
    #[must_use]
    pub fn new() -> Self {
        Self::with_severity(Severity::Default)
    }

    /// Creates a success notification.
    #[must_use]
    pub fn success() -> Self {
        Self::with_severity(Severity::Success)
    }

    /// Creates a warning notification.
    #[must_use]
    pub fn warning() -> Self {
        Self::with_severity(Severity::Warning)
    }

    /// Creates a destructive notification.
    #[must_use]
    pub fn destructive() -> Self {
        Self::with_severity(Severity::Destructive)
    }

    pub(crate) fn with_severity(severity: Severity) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            title: None,
            description: None,
            expiry: Expiry::Default,
            created_at: Instant::now(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the auto-expiry duration, overriding the configured default.
    ///
    /// A zero duration means "never auto-expire", same as [`Self::sticky`].
    /// Positive values are taken as given, without clamping.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.expiry = if duration.is_zero() {
            Expiry::Never
        } else {
            Expiry::After(duration)
        };
        self
    }

    /// Keeps the notification until it is explicitly dismissed.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.expiry = Expiry::Never;
        self
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the title, if any.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the auto-expiry behavior.
    #[must_use]
    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Returns when this notification was created.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the age of this notification.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
