//! End-to-end exercise of the public engine surface: configuration, a
//! custom value source standing in for a live feed, periodic production,
//! signal delivery and shutdown.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::time::timeout;
use twinstream::Channel;
use twinstream::SourceError;
use twinstream::TelemetryConfig;
use twinstream::TelemetryEngineBuilder;
use twinstream::ValueSource;

/// Deterministic "live feed": 20.0, 21.0, 22.0, ... per produced value
struct CountingFeed {
    produced: AtomicU64,
}

impl CountingFeed {
    fn new() -> Self {
        Self {
            produced: AtomicU64::new(0),
        }
    }
}

impl ValueSource for CountingFeed {
    fn next_value(
        &self,
        _sensor_key: &str,
        _channel_key: &str,
        _channel: &Channel,
    ) -> Result<f64, SourceError> {
        let n = self.produced.fetch_add(1, Ordering::SeqCst);
        Ok(20.0 + n as f64)
    }
}

fn small_config() -> TelemetryConfig {
    let mut config = TelemetryConfig::default();
    config.catalog.sensors.truncate(3);
    config.store.window_capacity = 4;
    config.scheduler.tick_interval_ms = 1000;
    config
}

#[tokio::test(start_paused = true)]
async fn engine_should_produce_notify_and_stop() {
    let engine = TelemetryEngineBuilder::from_config(small_config())
        .value_source(Box::new(CountingFeed::new()))
        .build()
        .expect("engine should build");

    let (values_handle, mut values_rx) = engine.subscribe_values_changed();
    let (_time_handle, mut time_rx) = engine.subscribe_time_advanced();

    engine.start();

    // Let a few periods elapse
    for _ in 0..3 {
        let delta = timeout(Duration::from_secs(5), values_rx.recv())
            .await
            .expect("tick should land within the period")
            .unwrap();
        assert_eq!(delta.len(), 3);
    }

    // The time cursor moved at least once and carries a sample timestamp
    let cursor = timeout(Duration::from_secs(5), time_rx.recv())
        .await
        .expect("time-advanced should have fired")
        .unwrap();
    let (earliest, latest) = engine.time_range();
    assert!(earliest <= cursor && cursor <= latest);

    // Windows hold every tick so far, in order, within the capacity bound
    for (sensor_key, _) in engine.sensors() {
        let snapshot = engine.read(sensor_key, "temperature").unwrap();
        assert!(snapshot.values.len() <= 4);
        assert_eq!(snapshot.timestamps.len(), snapshot.values.len());
        assert!(snapshot.timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(snapshot.count, 3);
    }

    // Unsubscribed consumers never hear from the engine again
    engine.unsubscribe(&values_handle);
    engine.stop();

    assert!(values_rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn window_bound_should_hold_over_many_ticks() {
    let engine = TelemetryEngineBuilder::from_config(small_config())
        .value_source(Box::new(CountingFeed::new()))
        .build()
        .expect("engine should build");

    // Drive production deterministically, far past the window capacity
    for tick in 1..=50u64 {
        engine.tick_once(tick * 1000);
    }

    for (sensor_key, _) in engine.sensors() {
        let snapshot = engine.read(sensor_key, "temperature").unwrap();
        assert_eq!(snapshot.values.len(), 4);
        assert_eq!(snapshot.count, 50);
        assert_eq!(
            snapshot.timestamps,
            vec![47_000, 48_000, 49_000, 50_000]
        );
    }
}
