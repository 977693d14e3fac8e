// SPDX-License-Identifier: MPL-2.0
//! End-to-end properties of the notification core: expiry timing, ordering,
//! cancellation, and provider-scope acquisition. Timer behavior runs under
//! tokio's paused virtual clock, so the timing assertions are exact.

use serial_test::serial;
use std::time::Duration;
use toast_hub::config::Config;
use toast_hub::{Error, Notification, Notifications, Provider};

#[tokio::test(start_paused = true)]
#[serial]
async fn toast_is_present_until_its_duration_elapses() {
    let provider = Provider::install();
    let toasts = provider.handle();

    let id = toasts
        .notify(
            Notification::new()
                .title("Saved")
                .duration(Duration::from_millis(1000)),
        )
        .unwrap();

    let snapshot = toasts.snapshot().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id(), id);
    assert_eq!(snapshot[0].title_text(), Some("Saved"));

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(toasts.snapshot().unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(toasts.snapshot().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn insertion_order_is_preserved() {
    let provider = Provider::install();
    let toasts = provider.handle();

    let a = toasts.notify(Notification::new().title("A")).unwrap();
    let b = toasts.notify(Notification::new().title("B")).unwrap();

    let ids: Vec<_> = toasts
        .snapshot()
        .unwrap()
        .iter()
        .map(Notification::id)
        .collect();
    assert_eq!(ids, vec![a, b]);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn dismiss_is_idempotent() {
    let provider = Provider::install();
    let toasts = provider.handle();

    let a = toasts.notify(Notification::new().title("A")).unwrap();
    let b = toasts.notify(Notification::new().title("B")).unwrap();

    toasts.dismiss(a).unwrap();
    let ids: Vec<_> = toasts
        .snapshot()
        .unwrap()
        .iter()
        .map(Notification::id)
        .collect();
    assert_eq!(ids, vec![b]);

    // Second dismiss of the same id is a silent no-op.
    toasts.dismiss(a).unwrap();
    let ids: Vec<_> = toasts
        .snapshot()
        .unwrap()
        .iter()
        .map(Notification::id)
        .collect();
    assert_eq!(ids, vec![b]);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn dismiss_cancels_the_pending_timer() {
    let provider = Provider::install();
    let toasts = provider.handle();

    let id = toasts
        .notify(Notification::new().duration(Duration::from_millis(1000)))
        .unwrap();
    toasts.dismiss(id).unwrap();

    // Subscribe after the dismissal; if the timer were still alive, its fire
    // would publish another (no-op) transition and flag the receiver.
    let rx = toasts.subscribe().unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert!(!rx.has_changed().unwrap());
    assert!(toasts.snapshot().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn sticky_toast_never_expires() {
    let provider = Provider::install();
    let toasts = provider.handle();

    let zero = toasts
        .notify(Notification::new().title("zero").duration(Duration::ZERO))
        .unwrap();
    let sticky = toasts
        .notify(Notification::warning().title("sticky").sticky())
        .unwrap();

    tokio::time::sleep(Duration::from_secs(3600)).await;

    let ids: Vec<_> = toasts
        .snapshot()
        .unwrap()
        .iter()
        .map(Notification::id)
        .collect();
    assert_eq!(ids, vec![zero, sticky]);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn unspecified_duration_defaults_to_five_seconds() {
    let provider = Provider::install();
    let toasts = provider.handle();

    toasts.notify(Notification::success().title("done")).unwrap();

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(toasts.snapshot().unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(toasts.snapshot().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn configured_default_applies_to_unspecified_durations_only() {
    let config = Config {
        default_duration_ms: Some(100),
        diagnostics_capacity: None,
    };
    let provider = Provider::with_config(&config);
    let toasts = provider.handle();

    let explicit = toasts
        .notify(Notification::new().duration(Duration::from_millis(500)))
        .unwrap();
    toasts.notify(Notification::new().title("implicit")).unwrap();

    tokio::time::sleep(Duration::from_millis(101)).await;
    let ids: Vec<_> = toasts
        .snapshot()
        .unwrap()
        .iter()
        .map(Notification::id)
        .collect();
    assert_eq!(ids, vec![explicit]);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(toasts.snapshot().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn configured_zero_default_makes_toasts_sticky() {
    let config = Config {
        default_duration_ms: Some(0),
        diagnostics_capacity: None,
    };
    let provider = Provider::with_config(&config);
    let toasts = provider.handle();

    toasts.notify(Notification::new().title("stays")).unwrap();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(toasts.snapshot().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn subscriber_sees_every_mutation_synchronously() {
    let provider = Provider::install();
    let toasts = provider.handle();
    let rx = toasts.subscribe().unwrap();

    assert!(rx.borrow().is_empty());

    let a = toasts.notify(Notification::new().title("A")).unwrap();
    assert_eq!(
        rx.borrow().iter().map(Notification::id).collect::<Vec<_>>(),
        vec![a]
    );

    let b = toasts.notify(Notification::new().title("B")).unwrap();
    assert_eq!(
        rx.borrow().iter().map(Notification::id).collect::<Vec<_>>(),
        vec![a, b]
    );

    toasts.dismiss(a).unwrap();
    assert_eq!(
        rx.borrow().iter().map(Notification::id).collect::<Vec<_>>(),
        vec![b]
    );
}

#[tokio::test(start_paused = true)]
#[serial]
async fn dismiss_all_empties_the_set_in_one_transition() {
    let provider = Provider::install();
    let toasts = provider.handle();

    toasts.notify(Notification::new().title("A")).unwrap();
    toasts.notify(Notification::new().title("B")).unwrap();

    let mut rx = toasts.subscribe().unwrap();
    rx.mark_unchanged();

    toasts.dismiss_all().unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_empty());
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn provider_teardown_cancels_timers_and_invalidates_handles() {
    let provider = Provider::install();
    let toasts = provider.handle();

    toasts
        .notify(Notification::new().duration(Duration::from_millis(100)))
        .unwrap();
    drop(provider);

    // Timers are gone along with the store; nothing fires later.
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(
        toasts.notify(Notification::new()).unwrap_err(),
        Error::NotInitialized
    );
    assert_eq!(
        toasts.dismiss(toast_hub::NotificationId::default()).unwrap_err(),
        Error::NotInitialized
    );
    assert_eq!(toasts.snapshot().unwrap_err(), Error::NotInitialized);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn diagnostics_records_one_event_per_transition() {
    use toast_hub::diagnostics::{self, ToastEventKind};

    let provider = Provider::install();
    let (handle, mut collector) = diagnostics::channel(16);
    provider.set_diagnostics(handle);
    let toasts = provider.handle();

    let id = toasts
        .notify(Notification::success().title("imported"))
        .unwrap();
    toasts.dismiss(id).unwrap();
    collector.drain();

    let kinds: Vec<_> = collector.events().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ToastEventKind::Created {
                id,
                severity: toast_hub::Severity::Success
            },
            ToastEventKind::Dismissed { id },
        ]
    );
}

#[tokio::test(start_paused = true)]
#[serial]
async fn diagnostics_distinguishes_expiry_from_dismissal() {
    use toast_hub::diagnostics::{self, ToastEventKind};

    let provider = Provider::install();
    let (handle, mut collector) = diagnostics::channel(16);
    provider.set_diagnostics(handle);
    let toasts = provider.handle();

    let id = toasts
        .notify(Notification::new().duration(Duration::from_millis(50)))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(51)).await;
    collector.drain();

    let kinds: Vec<_> = collector.events().map(|e| e.kind.clone()).collect();
    assert!(kinds.contains(&ToastEventKind::Expired { id }));
    assert!(!kinds.iter().any(|k| matches!(k, ToastEventKind::Dismissed { .. })));
}

#[tokio::test]
#[serial]
async fn current_fails_fast_without_provider_scope() {
    assert!(matches!(
        Notifications::current(),
        Err(Error::NotInitialized)
    ));
}

#[tokio::test]
#[serial]
async fn current_resolves_inside_provider_scope() {
    let provider = Provider::install();
    let toasts = Notifications::current().unwrap();

    let id = toasts.notify(Notification::new().title("wired")).unwrap();
    assert_eq!(provider.handle().snapshot().unwrap()[0].id(), id);

    drop(provider);
    assert!(matches!(
        Notifications::current(),
        Err(Error::NotInitialized)
    ));
}
