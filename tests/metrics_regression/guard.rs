//! Async guard metrics regression tests

use super::helpers::*;
use faultline_guard::{AsyncGuard, AsyncGuardConfig, Settlement};
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn settlement_counter_tracks_results() {
    init_recorder();

    let guard: AsyncGuard<u32, String> = AsyncGuard::new(
        || async { Ok(1) },
        AsyncGuardConfig::builder().name("test_guard").build(),
    );
    guard.run().await;

    let failing: AsyncGuard<u32, String> = AsyncGuard::new(
        || async { Err("boom".to_string()) },
        AsyncGuardConfig::builder().name("test_guard").build(),
    );
    failing.run().await;

    assert_counter_exists("guard_settlements_total");
    assert_metric_has_label("guard_settlements_total", "guard", "test_guard");
    assert_metric_has_label("guard_settlements_total", "result", "succeeded");
    assert_metric_has_label("guard_settlements_total", "result", "failed");
}

#[tokio::test(start_paused = true)]
#[serial]
async fn discarded_settlements_are_counted() {
    init_recorder();

    let guard: Arc<AsyncGuard<u32, String>> = Arc::new(AsyncGuard::new(
        || async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(1)
        },
        AsyncGuardConfig::builder().name("unmounted_guard").build(),
    ));

    // Unmount while the operation is in flight so it settles as discarded.
    let runner = Arc::clone(&guard);
    let handle = tokio::spawn(async move { runner.run().await });
    tokio::time::sleep(Duration::from_secs(1)).await;
    guard.unmount();

    assert_eq!(handle.await.unwrap(), Settlement::Discarded);
    assert_counter_exists("guard_settlements_total");
    assert_metric_has_label("guard_settlements_total", "guard", "unmounted_guard");
    assert_metric_has_label("guard_settlements_total", "result", "discarded");
}
