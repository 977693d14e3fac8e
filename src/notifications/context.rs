// SPDX-License-Identifier: MPL-2.0
//! Provider scope and shared subscription handle.
//!
//! Exactly one store exists per provider scope. The [`Provider`] owns it and
//! registers itself at a process-wide acquisition point; [`Notifications`]
//! handles hold only a weak reference, so no consumer can keep the store
//! alive past its scope or mutate it after teardown. Using the API without
//! an active provider fails fast with [`Error::NotInitialized`] instead of
//! silently operating on an empty store.

use super::notification::{Notification, NotificationId};
use super::store::Store;
use crate::config::Config;
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::watch;

/// The process-wide acquisition point for [`Notifications::current`].
static CURRENT: Mutex<Option<Weak<Store>>> = Mutex::new(None);

fn current_slot() -> std::sync::MutexGuard<'static, Option<Weak<Store>>> {
    CURRENT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scoped owner of the notification store.
///
/// Establishes the store for the application (or a subtree of it) and tears
/// it down when dropped: all outstanding expiry timers are cancelled, the
/// snapshot channel closes, and every handle created from this scope fails
/// with [`Error::NotInitialized`] from then on.
pub struct Provider {
    store: Arc<Store>,
}

impl Provider {
    /// Installs a provider with default settings.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; the store schedules its
    /// expiry timers on the runtime that is current at construction.
    #[must_use]
    pub fn install() -> Self {
        Self::with_config(&Config::default())
    }

    /// Installs a provider honoring the given settings.
    ///
    /// A configured `default_duration_ms` replaces the built-in 5000 ms
    /// default for notifications that did not specify a duration.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        let store = Store::new(config.default_duration());
        *current_slot() = Some(Arc::downgrade(&store));
        Self { store }
    }

    /// Returns a handle bound to this provider's store.
    #[must_use]
    pub fn handle(&self) -> Notifications {
        Notifications {
            store: Arc::downgrade(&self.store),
        }
    }

    /// Sets the diagnostics handle lifecycle events are logged to.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.store.set_diagnostics(handle);
    }
}

impl Drop for Provider {
    fn drop(&mut self) {
        self.store.dismiss_all();
        let mut slot = current_slot();
        // Only clear the slot if it still points at this provider's store; a
        // newer provider may have replaced it.
        if slot
            .as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(&self.store)))
        {
            *slot = None;
        }
    }
}

/// Shared handle to the live notification store.
///
/// Cheap to clone and freely shareable across consumers. Every operation
/// re-validates the provider scope and returns [`Error::NotInitialized`]
/// once it is gone, without mutating anything.
#[derive(Clone)]
pub struct Notifications {
    store: Weak<Store>,
}

impl Notifications {
    /// Acquires a handle to the currently installed provider's store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when no provider scope is active.
    pub fn current() -> Result<Self> {
        let slot = current_slot();
        let weak = slot.as_ref().ok_or(Error::NotInitialized)?;
        if weak.strong_count() == 0 {
            return Err(Error::NotInitialized);
        }
        Ok(Self {
            store: weak.clone(),
        })
    }

    fn store(&self) -> Result<Arc<Store>> {
        self.store.upgrade().ok_or(Error::NotInitialized)
    }

    /// Inserts a notification at the end of the active set and schedules its
    /// expiry. Returns the assigned id immediately; never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when the provider scope is gone.
    pub fn notify(&self, notification: Notification) -> Result<NotificationId> {
        Ok(self.store()?.insert(notification))
    }

    /// Removes the notification with the given id and cancels its pending
    /// timer. Unknown or already-removed ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when the provider scope is gone.
    pub fn dismiss(&self, id: NotificationId) -> Result<()> {
        self.store()?.dismiss(id);
        Ok(())
    }

    /// Removes every active notification in a single published transition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when the provider scope is gone.
    pub fn dismiss_all(&self) -> Result<()> {
        self.store()?.dismiss_all();
        Ok(())
    }

    /// Returns the current active set in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when the provider scope is gone.
    pub fn snapshot(&self) -> Result<Vec<Notification>> {
        Ok(self.store()?.snapshot())
    }

    /// Subscribes to snapshot updates.
    ///
    /// The receiver's value is replaced synchronously by every mutation, in
    /// mutation order; it closes when the provider scope ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when the provider scope is gone.
    pub fn subscribe(&self) -> Result<watch::Receiver<Vec<Notification>>> {
        Ok(self.store()?.subscribe())
    }
}
