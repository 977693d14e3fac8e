// SPDX-License-Identifier: MPL-2.0
//! `toast_hub` is the notification core of a data-platform UI shell.
//!
//! It keeps an authoritative, ordered registry of transient user-facing
//! messages (toasts), each with an independent auto-expiry timer, and shares
//! it with any number of consumers through a subscription context. Rendering
//! is deliberately out of scope; presentation layers are pure consumers of
//! the published snapshot.
//!
//! # Usage
//!
//! ```no_run
//! use toast_hub::{Notification, Notifications, Provider};
//!
//! # async fn demo() -> toast_hub::Result<()> {
//! // Establish the provider scope once, inside the UI runtime.
//! let provider = Provider::install();
//!
//! // Anywhere else in the process:
//! let toasts = Notifications::current()?;
//! let id = toasts.notify(Notification::success().title("Saved"))?;
//!
//! // A presentation layer reads the live snapshot reactively:
//! let updates = toasts.subscribe()?;
//! assert_eq!(updates.borrow().len(), 1);
//!
//! // User-initiated close:
//! toasts.dismiss(id)?;
//! # drop(provider);
//! # Ok(())
//! # }
//! ```
//!
//! Dropping the [`Provider`] tears the store down: all pending expiry timers
//! are cancelled and every outstanding handle fails fast with
//! [`Error::NotInitialized`] from then on.

#![doc(html_root_url = "https://docs.rs/toast_hub/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;

pub use error::{Error, Result};
pub use notifications::{Expiry, Notification, NotificationId, Notifications, Provider, Severity};
