// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event log for the notification subsystem.
//!
//! Consumers of the store never see these events; they exist so a long-lived
//! session can answer "what did the toast layer do and when". Events travel
//! over a bounded channel with a non-blocking sender and land in a
//! memory-bounded ring that evicts the oldest entries when full.

use crate::notifications::{NotificationId, Severity};
use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;
use std::collections::VecDeque;

/// What happened to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToastEventKind {
    /// A notification entered the active set.
    Created {
        id: NotificationId,
        severity: Severity,
    },
    /// A consumer explicitly dismissed a notification.
    Dismissed { id: NotificationId },
    /// A notification's expiry timer fired.
    Expired { id: NotificationId },
    /// The whole active set was cleared at once.
    Cleared { count: usize },
}

/// A timestamped lifecycle event.
#[derive(Debug, Clone, Serialize)]
pub struct ToastEvent {
    /// Wall-clock time the event was emitted.
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ToastEventKind,
}

/// Handle for sending lifecycle events to the collector.
///
/// Cheap to clone and shareable across threads. Sending is non-blocking and
/// drops the event when the channel is full (backpressure protection), so
/// the store's mutation path never stalls on diagnostics.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<ToastEvent>,
}

impl DiagnosticsHandle {
    /// Emits a lifecycle event. Non-blocking; dropped if the channel is full.
    pub fn emit(&self, kind: ToastEventKind) {
        let event = ToastEvent {
            at: Utc::now(),
            kind,
        };
        let _ = self.event_tx.try_send(event);
    }
}

/// Receiving side: drains the channel into a capacity-bounded ring.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    event_rx: Receiver<ToastEvent>,
    events: VecDeque<ToastEvent>,
    capacity: usize,
}

impl DiagnosticsCollector {
    /// Pulls every pending event into the ring, evicting the oldest entries
    /// once capacity is reached.
    pub fn drain(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if self.events.len() == self.capacity {
                self.events.pop_front();
            }
            self.events.push_back(event);
        }
    }

    /// Collected events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &ToastEvent> {
        self.events.iter()
    }

    /// Number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Ring capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discards all collected events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Creates a connected handle/collector pair.
///
/// `capacity` bounds both the in-flight channel and the collector's ring;
/// it is clamped to at least 1.
#[must_use]
pub fn channel(capacity: usize) -> (DiagnosticsHandle, DiagnosticsCollector) {
    let capacity = capacity.max(1);
    let (event_tx, event_rx) = bounded(capacity);
    (
        DiagnosticsHandle { event_tx },
        DiagnosticsCollector {
            event_rx,
            events: VecDeque::with_capacity(capacity),
            capacity,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Notification;

    #[test]
    fn collector_receives_emitted_events_in_order() {
        let (handle, mut collector) = channel(8);
        let id = Notification::new().id();

        handle.emit(ToastEventKind::Created {
            id,
            severity: Severity::Success,
        });
        handle.emit(ToastEventKind::Dismissed { id });
        collector.drain();

        let kinds: Vec<_> = collector.events().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ToastEventKind::Created {
                    id,
                    severity: Severity::Success
                },
                ToastEventKind::Dismissed { id },
            ]
        );
    }

    #[test]
    fn ring_evicts_oldest_when_full() {
        let (handle, mut collector) = channel(2);

        handle.emit(ToastEventKind::Cleared { count: 1 });
        collector.drain();
        handle.emit(ToastEventKind::Cleared { count: 2 });
        collector.drain();
        handle.emit(ToastEventKind::Cleared { count: 3 });
        collector.drain();

        let counts: Vec<_> = collector
            .events()
            .map(|e| match e.kind {
                ToastEventKind::Cleared { count } => count,
                _ => panic!("unexpected event kind"),
            })
            .collect();
        assert_eq!(counts, vec![2, 3]);
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (handle, mut collector) = channel(1);

        handle.emit(ToastEventKind::Cleared { count: 1 });
        // Channel is full; this send is dropped silently.
        handle.emit(ToastEventKind::Cleared { count: 2 });
        collector.drain();

        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let (_handle, collector) = channel(0);
        assert_eq!(collector.capacity(), 1);
    }
}
