// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle bookkeeping.
//!
//! The `Store` owns the ordered active set and the pending expiry timers.
//! Insert, explicit dismiss, and timer fire all funnel through one removal
//! path, so the race between a user dismiss and an in-flight expiry resolves
//! to an idempotent no-op. Every mutation publishes a fresh snapshot into a
//! watch channel while the interior lock is held, which keeps publication
//! order identical to mutation order.

use super::notification::{Notification, NotificationId};
use crate::diagnostics::{DiagnosticsHandle, ToastEventKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Why a notification left the active set.
enum Removal {
    Dismissed,
    Expired,
}

struct Inner {
    /// Active notifications in insertion order, newest last.
    active: Vec<Notification>,
    /// Pending expiry tasks, at most one per live id.
    timers: HashMap<NotificationId, AbortHandle>,
    /// Snapshot channel; the value is replaced on every mutation.
    snapshot_tx: watch::Sender<Vec<Notification>>,
    /// Optional lifecycle event sink.
    diagnostics: Option<DiagnosticsHandle>,
}

impl Inner {
    fn publish(&self) {
        // send_replace updates the value even before the first subscriber
        // exists, so late subscribers start from the current set.
        self.snapshot_tx.send_replace(self.active.clone());
    }

    fn emit(&self, kind: ToastEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.emit(kind);
        }
    }
}

/// Authoritative mapping of active notifications and their expiry timers.
///
/// Owned by the provider scope; consumers reach it only through
/// [`super::Notifications`] handles.
pub(crate) struct Store {
    inner: Mutex<Inner>,
    /// Expiry applied to notifications that did not specify one.
    default_duration: Option<std::time::Duration>,
    /// Runtime the expiry tasks are spawned onto, captured at construction.
    runtime: tokio::runtime::Handle,
}

impl Store {
    /// Creates an empty store.
    ///
    /// Captures the current tokio runtime handle for timer scheduling, so it
    /// must be called from within a runtime (the provider documents this).
    pub(crate) fn new(default_duration: Option<std::time::Duration>) -> Arc<Self> {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Arc::new(Self {
            inner: Mutex::new(Inner {
                active: Vec::new(),
                timers: HashMap::new(),
                snapshot_tx,
                diagnostics: None,
            }),
            default_duration,
            runtime: tokio::runtime::Handle::current(),
        })
    }

    /// Sets the diagnostics handle for logging lifecycle events.
    pub(crate) fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.lock().diagnostics = Some(handle);
    }

    // Store operations are infallible by design; on poison the critical
    // section that panicked was a cheap pointer/map update, so the state is
    // still coherent and the guard is recovered.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a notification at the end of the active set, schedules its
    /// expiry timer, and publishes the new snapshot. Returns the assigned id.
    ///
    /// Never blocks and has no suspension points; the timer is a deferred
    /// one-shot task that performs the same removal as an explicit dismiss.
    pub(crate) fn insert(self: &Arc<Self>, notification: Notification) -> NotificationId {
        let id = notification.id();
        let severity = notification.severity();
        let duration = notification.expiry().resolve(self.default_duration);

        let mut inner = self.lock();
        if let Some(duration) = duration {
            // Spawned while the lock is held: the timer's first action is to
            // take the same lock, so even an immediate fire cannot observe
            // the set before this insert is complete.
            let store = Arc::downgrade(self);
            let timer = self
                .runtime
                .spawn(async move {
                    tokio::time::sleep(duration).await;
                    if let Some(store) = store.upgrade() {
                        store.remove(id, Removal::Expired);
                    }
                })
                .abort_handle();
            inner.timers.insert(id, timer);
        }
        inner.active.push(notification);
        inner.publish();
        inner.emit(ToastEventKind::Created { id, severity });
        id
    }

    /// Removes the notification with the given id, if present, and cancels
    /// its pending timer. Unknown or already-removed ids are a silent no-op:
    /// a user dismiss racing an in-flight timer fire is expected, not an
    /// error.
    pub(crate) fn dismiss(&self, id: NotificationId) {
        self.remove(id, Removal::Dismissed);
    }

    fn remove(&self, id: NotificationId, cause: Removal) {
        let mut inner = self.lock();
        let Some(pos) = inner.active.iter().position(|n| n.id() == id) else {
            return;
        };
        inner.active.remove(pos);
        if let Some(timer) = inner.timers.remove(&id) {
            timer.abort();
        }
        inner.publish();
        inner.emit(match cause {
            Removal::Dismissed => ToastEventKind::Dismissed { id },
            Removal::Expired => ToastEventKind::Expired { id },
        });
    }

    /// Removes every active notification and aborts every pending timer in a
    /// single published transition.
    pub(crate) fn dismiss_all(&self) {
        let mut inner = self.lock();
        if inner.active.is_empty() && inner.timers.is_empty() {
            return;
        }
        for (_, timer) in inner.timers.drain() {
            timer.abort();
        }
        let count = inner.active.len();
        inner.active.clear();
        inner.publish();
        inner.emit(ToastEventKind::Cleared { count });
    }

    /// Returns a consistent point-in-time view of the active set, in
    /// insertion order.
    pub(crate) fn snapshot(&self) -> Vec<Notification> {
        self.lock().active.clone()
    }

    /// Returns a receiver that observes every published snapshot.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.lock().snapshot_tx.subscribe()
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        // Outstanding timers hold only Weak backreferences, but aborting
        // them releases their resources immediately instead of at fire time.
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        for timer in inner.timers.values() {
            timer.abort();
        }
    }
}
