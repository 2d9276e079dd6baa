//! Telemetry store metrics regression tests

use super::helpers::*;
use faultline_core::Context;
use faultline_telemetry::{TelemetryConfig, TelemetryStore};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn capture_counter_exists() {
    init_recorder();

    let store = TelemetryStore::new(TelemetryConfig::builder().name("test_store").build());
    store.capture_exception("metric me", Context::new());
    store.capture_exception("metric me again", Context::new());

    assert_counter_exists("telemetry_records_captured_total");
    assert_metric_has_label("telemetry_records_captured_total", "store", "test_store");
}
