// SPDX-License-Identifier: MPL-2.0
//! Toast notification core.
//!
//! A process-wide registry of transient user-facing messages, each with an
//! independent auto-expiry timer, shared with any number of consumers
//! through a subscription context.
//!
//! # Components
//!
//! - [`notification`] - `Notification` data model with severity and expiry
//! - [`store`] - authoritative active set and expiry schedule (crate-private)
//! - [`context`] - `Provider` scope and the shared `Notifications` handle
//!
//! # Lifecycle
//!
//! A producer calls [`Notifications::notify`]; the store assigns identity,
//! appends to the ordered active set, and schedules a one-shot expiry task.
//! Subscribers receive the updated snapshot. Either the timer fires or a
//! consumer calls [`Notifications::dismiss`]; both funnel into the same
//! idempotent removal, so the two racing for one id is harmless. Dropping
//! the [`Provider`] cancels every outstanding timer.

mod context;
mod notification;
mod store;

pub use context::{Notifications, Provider};
pub use notification::{Expiry, Notification, NotificationId, Severity, DEFAULT_DURATION};
