use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use faultline_core::Context;
use faultline_telemetry::{
    DispatchMode, MemoryStorage, SinkError, StorageBackend, StorageError, TelemetryConfig,
    TelemetrySink, TelemetryStore, STORAGE_KEY,
};
use futures::future::BoxFuture;
use tokio::task::yield_now;

/// Sink that counts what it receives.
#[derive(Default)]
struct CountingSink {
    received: AtomicUsize,
}

impl TelemetrySink for CountingSink {
    fn send(&self, _record: faultline_core::ErrorRecord) -> BoxFuture<'static, Result<(), SinkError>> {
        self.received.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok(()) })
    }
}

/// Sink that always rejects.
struct FailingSink;

impl TelemetrySink for FailingSink {
    fn send(&self, record: faultline_core::ErrorRecord) -> BoxFuture<'static, Result<(), SinkError>> {
        Box::pin(async move { Err(SinkError(format!("rejected {}", record.id))) })
    }
}

/// Backend whose writes always fail.
struct FailingStorage;

impl StorageBackend for FailingStorage {
    fn get(&self, _key: &str) -> BoxFuture<'static, Result<Option<String>, StorageError>> {
        Box::pin(async { Err(StorageError("disk gone".to_string())) })
    }

    fn set(&self, _key: &str, _value: String) -> BoxFuture<'static, Result<(), StorageError>> {
        Box::pin(async { Err(StorageError("disk gone".to_string())) })
    }

    fn remove(&self, _key: &str) -> BoxFuture<'static, Result<(), StorageError>> {
        Box::pin(async { Err(StorageError("disk gone".to_string())) })
    }
}

#[tokio::test]
async fn one_failing_sink_does_not_starve_the_others() {
    let counting = Arc::new(CountingSink::default());
    let store = TelemetryStore::new(
        TelemetryConfig::builder()
            .mode(DispatchMode::Production)
            .sink(Arc::new(FailingSink))
            .sink(Arc::clone(&counting) as Arc<dyn TelemetrySink>)
            .build(),
    );

    store.capture_exception("dispatch me", Context::new());
    yield_now().await;

    assert_eq!(counting.received.load(Ordering::SeqCst), 1);
    // The rejected record stays in the local buffer.
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn every_sink_receives_every_record() {
    let first = Arc::new(CountingSink::default());
    let second = Arc::new(CountingSink::default());
    let store = TelemetryStore::new(
        TelemetryConfig::builder()
            .mode(DispatchMode::Production)
            .sink(Arc::clone(&first) as Arc<dyn TelemetrySink>)
            .sink(Arc::clone(&second) as Arc<dyn TelemetrySink>)
            .build(),
    );

    for i in 0..5 {
        store.capture_exception(format!("failure {i}"), Context::new());
    }
    yield_now().await;

    assert_eq!(first.received.load(Ordering::SeqCst), 5);
    assert_eq!(second.received.load(Ordering::SeqCst), 5);
}

/// Development mode never touches sinks; records go to tracing instead.
#[tokio::test]
async fn development_mode_skips_sinks() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let counting = Arc::new(CountingSink::default());
    let store = TelemetryStore::new(
        TelemetryConfig::builder()
            .mode(DispatchMode::Development)
            .sink(Arc::clone(&counting) as Arc<dyn TelemetrySink>)
            .build(),
    );

    store.capture_exception("local only", Context::new());
    yield_now().await;

    assert_eq!(counting.received.load(Ordering::SeqCst), 0);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn failing_storage_never_disturbs_the_capture_path() {
    let store = TelemetryStore::new(
        TelemetryConfig::builder()
            .storage(Arc::new(FailingStorage))
            .build(),
    );

    for i in 0..3 {
        store.capture_exception(format!("failure {i}"), Context::new());
    }
    yield_now().await;

    // Persistence failed silently; hydration fails silently too.
    store.hydrate().await;
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn corrupt_persisted_payload_is_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(STORAGE_KEY, "{not json".to_string())
        .await
        .unwrap();

    let store = TelemetryStore::new(
        TelemetryConfig::builder()
            .storage(Arc::clone(&storage) as Arc<dyn StorageBackend>)
            .build(),
    );
    store.hydrate().await;
    assert!(store.is_empty());
}

#[tokio::test]
async fn hydration_respects_capacity() {
    let storage = Arc::new(MemoryStorage::new());

    // Persist 5 records through a roomy store.
    let writer = TelemetryStore::new(
        TelemetryConfig::builder()
            .capacity(10)
            .storage(Arc::clone(&storage) as Arc<dyn StorageBackend>)
            .build(),
    );
    for i in 0..5 {
        writer.capture_exception(format!("failure {i}"), Context::new());
    }
    yield_now().await;

    // Reload into a store that only holds 2: newest survive.
    let reader = TelemetryStore::new(
        TelemetryConfig::builder()
            .capacity(2)
            .storage(storage as Arc<dyn StorageBackend>)
            .build(),
    );
    reader.hydrate().await;

    let records = reader.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "failure 3");
    assert_eq!(records[1].message, "failure 4");
}

#[tokio::test]
async fn user_identity_spans_stores_not_sessions() {
    let store = TelemetryStore::new(TelemetryConfig::builder().build());
    store.set_user("user-1");
    store.capture_exception("as user-1", Context::new());
    store.clear_user();
    store.capture_exception("anonymous again", Context::new());

    let records = store.records();
    assert_eq!(records[0].context["user_id"], "user-1");
    assert!(!records[1].context.contains_key("user_id"));
    // Session id is stamped on both.
    assert_eq!(records[0].context["session_id"], records[1].context["session_id"]);
}
