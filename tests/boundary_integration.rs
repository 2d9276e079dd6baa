use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use faultline_boundary::{
    BoundaryConfig, BoundaryLevel, BoundaryStatus, FallbackKind, FaultBoundary, RenderOutcome,
    ResetKey,
};
use faultline_telemetry::{TelemetryConfig, TelemetryStore};

/// An inner boundary converts the panic into a fallback value, so the outer
/// boundary never sees a fault.
#[test]
fn inner_boundary_contains_fault_from_outer() {
    let mut outer = FaultBoundary::new(
        BoundaryConfig::builder()
            .level(BoundaryLevel::Screen)
            .name("outer")
            .build(),
    );
    let inner = Arc::new(Mutex::new(FaultBoundary::new(
        BoundaryConfig::builder().name("inner").build(),
    )));

    let inner_handle = Arc::clone(&inner);
    let outcome = outer.render(&[], move || {
        let mut inner = inner_handle.lock().unwrap();
        let widget: RenderOutcome<&str> = inner.render(&[], || panic!("widget bug"));
        // The faulting widget became a value; the rest of the screen renders.
        assert!(widget.fallback().is_some());
        "screen content"
    });

    assert_eq!(outcome.rendered(), Some("screen content"));
    assert_eq!(outer.status(), BoundaryStatus::Healthy);
    assert_eq!(inner.lock().unwrap().status(), BoundaryStatus::Faulted);
}

#[test]
fn fault_is_forwarded_to_telemetry() {
    let store = Arc::new(TelemetryStore::new(TelemetryConfig::builder().build()));
    let mut boundary = FaultBoundary::new(
        BoundaryConfig::builder()
            .name("profile")
            .level(BoundaryLevel::Component)
            .telemetry(Arc::clone(&store))
            .build(),
    );

    let _ = boundary.render(&[], || -> () { panic!("render bug") });

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "render bug");
    assert_eq!(records[0].context["boundary"], "profile");
    assert_eq!(records[0].context["level"], "component");
    assert_eq!(records[0].id, boundary.fault_id().unwrap());
}

#[test]
fn on_fault_and_on_reset_listeners_fire() {
    let faults = Arc::new(AtomicUsize::new(0));
    let manual_resets = Arc::new(AtomicUsize::new(0));
    let key_resets = Arc::new(AtomicUsize::new(0));

    let fault_counter = Arc::clone(&faults);
    let manual_counter = Arc::clone(&manual_resets);
    let key_counter = Arc::clone(&key_resets);

    let mut boundary = FaultBoundary::new(
        BoundaryConfig::builder()
            .on_fault(move |_record| {
                fault_counter.fetch_add(1, Ordering::SeqCst);
            })
            .on_reset(move |manual| {
                if manual {
                    manual_counter.fetch_add(1, Ordering::SeqCst);
                } else {
                    key_counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build(),
    );

    let keys = [ResetKey::from(1)];
    let _ = boundary.render(&keys, || -> () { panic!("first") });
    boundary.reset();

    let _ = boundary.render(&keys, || -> () { panic!("second") });
    let _ = boundary.render(&[ResetKey::from(2)], || ());

    assert_eq!(faults.load(Ordering::SeqCst), 2);
    assert_eq!(manual_resets.load(Ordering::SeqCst), 1);
    assert_eq!(key_resets.load(Ordering::SeqCst), 1);
}

/// A panicking listener must not break the capture path or starve the other
/// listeners.
#[test]
fn panicking_listener_does_not_break_capture() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invoked);

    let mut boundary = FaultBoundary::new(
        BoundaryConfig::builder()
            .on_fault(|_record| panic!("listener bug"))
            .on_fault(move |_record| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build(),
    );

    let _ = boundary.render(&[], || -> () { panic!("render bug") });

    assert_eq!(boundary.status(), BoundaryStatus::Faulted);
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
}

#[test]
fn occurrence_count_survives_resets() {
    let mut boundary = FaultBoundary::new(BoundaryConfig::builder().build());

    for expected in 1..=3u32 {
        let _ = boundary.render(&[], || -> () { panic!("recurring bug") });
        assert_eq!(boundary.occurrence_count(), expected);
        boundary.reset();
    }
    assert_eq!(boundary.status(), BoundaryStatus::Healthy);
    assert_eq!(boundary.occurrence_count(), 3);
}

#[test]
fn fallback_shape_follows_level_and_isolation() {
    // Isolated component: inline notice.
    let mut component = FaultBoundary::new(BoundaryConfig::builder().build());
    let outcome: RenderOutcome<()> = component.render(&[], || panic!("bug"));
    assert_eq!(outcome.fallback().unwrap().kind, FallbackKind::Inline);

    // App level: full fallback regardless of isolation.
    let mut app = FaultBoundary::new(
        BoundaryConfig::builder()
            .level(BoundaryLevel::App)
            .isolate(true)
            .build(),
    );
    let outcome: RenderOutcome<()> = app.render(&[], || panic!("bug"));
    let view = outcome.fallback().unwrap();
    assert_eq!(view.kind, FallbackKind::Full);
    assert!(view.offers_retry);
    // No details configured: no detail text, no diagnostics.
    assert_eq!(view.detail, None);
    assert!(!view.offers_diagnostics);
}

#[test]
fn captured_error_faults_like_a_panic() {
    let store = Arc::new(TelemetryStore::new(TelemetryConfig::builder().build()));
    let mut boundary = FaultBoundary::new(
        BoundaryConfig::builder()
            .telemetry(Arc::clone(&store))
            .build(),
    );

    boundary.capture("explicit failure");
    assert_eq!(boundary.status(), BoundaryStatus::Faulted);
    assert_eq!(store.records()[0].message, "explicit failure");

    // Subsequent render passes short-circuit to the fallback.
    assert!(!boundary.render(&[], || ()).is_rendered());
}
