use std::sync::Arc;
use std::time::Duration;

use tokio::task::yield_now;
use tokio::time::advance;
use tokio::time::timeout;

use super::MockValueSource;
use crate::scheduler::ValueSource;
use crate::test_utils::test_catalog;
use crate::test_utils::PartialFailureSource;
use crate::NotificationCoalescer;
use crate::SampleStore;
use crate::SignalHub;
use crate::TickScheduler;

fn scheduler_with_source(
    sensor_count: usize,
    source: Box<dyn ValueSource>,
    tick_interval_ms: u64,
) -> (TickScheduler, Arc<SampleStore>, Arc<SignalHub>) {
    let catalog = Arc::new(test_catalog(sensor_count));
    let store = Arc::new(SampleStore::from_catalog(&catalog, 20));
    let hub = Arc::new(SignalHub::new());
    let coalescer = NotificationCoalescer::new(hub.clone(), Duration::from_millis(1000));
    let scheduler = TickScheduler::new(
        catalog,
        store.clone(),
        coalescer,
        source,
        Duration::from_millis(tick_interval_ms),
    );

    (scheduler, store, hub)
}

fn fixed_source(value: f64) -> Box<MockValueSource> {
    let mut source = MockValueSource::new();
    source
        .expect_next_value()
        .returning(move |_, _, _| Ok(value));

    Box::new(source)
}

#[tokio::test]
async fn tick_once_should_append_one_sample_per_sensor() {
    let (scheduler, store, hub) = scheduler_with_source(3, fixed_source(25.0), 1000);
    let (_handle, mut rx) = hub.subscribe_values_changed();

    scheduler.tick_once(5000);

    for i in 1..=3 {
        let snapshot = store.read(&format!("sensor_{}", i), "temperature").unwrap();
        assert_eq!(snapshot.timestamps, vec![5000]);
        assert_eq!(snapshot.values, vec![25.0]);
    }

    let delta = rx.recv().await.unwrap();
    assert_eq!(delta.len(), 3);
    assert_eq!(delta.get("sensor_1"), Some(&25.0));
}

#[tokio::test]
async fn one_failing_sensor_should_not_stop_the_tick() {
    let source = Box::new(PartialFailureSource::new("sensor_2", 30.0));
    let (scheduler, store, hub) = scheduler_with_source(3, source, 1000);
    let (_handle, mut rx) = hub.subscribe_values_changed();

    scheduler.tick_once(1000);

    assert!(store.read("sensor_1", "temperature").is_some());
    assert!(store.read("sensor_2", "temperature").is_none());
    assert!(store.read("sensor_3", "temperature").is_some());

    let delta = rx.recv().await.unwrap();
    assert_eq!(delta.len(), 2);
    assert!(!delta.contains_key("sensor_2"));
}

#[tokio::test]
async fn consecutive_ticks_should_keep_windows_ordered() {
    let (scheduler, store, _hub) = scheduler_with_source(2, fixed_source(25.0), 1000);

    scheduler.tick_once(1000);
    scheduler.tick_once(2000);
    scheduler.tick_once(3000);

    let snapshot = store.read("sensor_1", "temperature").unwrap();
    assert_eq!(snapshot.timestamps, vec![1000, 2000, 3000]);
    assert!(snapshot.timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test(start_paused = true)]
async fn started_scheduler_should_tick_on_its_period() {
    let (scheduler, _store, hub) = scheduler_with_source(2, fixed_source(25.0), 1000);
    let (_handle, mut rx) = hub.subscribe_values_changed();

    scheduler.start();
    assert!(scheduler.is_running());

    let delta = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("first tick should land within the period")
        .unwrap();
    assert_eq!(delta.len(), 2);

    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_should_be_effective_before_the_next_tick() {
    let (scheduler, _store, hub) = scheduler_with_source(1, fixed_source(25.0), 1000);
    let (_handle, mut rx) = hub.subscribe_values_changed();

    scheduler.start();
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("first tick should land within the period")
        .unwrap();

    scheduler.stop();
    assert!(!scheduler.is_running());

    // No further delta may ever arrive
    let result = timeout(Duration::from_secs(10), rx.recv()).await;
    assert!(result.is_err(), "tick fired after stop");
}

#[tokio::test(start_paused = true)]
async fn stop_while_not_running_should_be_a_noop() {
    let (scheduler, _store, _hub) = scheduler_with_source(1, fixed_source(25.0), 1000);

    scheduler.stop();
    scheduler.stop();

    assert!(!scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn start_twice_should_replace_the_driver_not_duplicate_it() {
    let (scheduler, _store, hub) = scheduler_with_source(1, fixed_source(25.0), 1000);
    let (_handle, mut rx) = hub.subscribe_values_changed();

    scheduler.start();
    scheduler.start();
    assert!(scheduler.is_running());

    // Let the replacement driver arm its timer before moving the clock
    for _ in 0..10 {
        yield_now().await;
    }

    // One full period: exactly one tick's delta, not two
    advance(Duration::from_millis(1001)).await;
    for _ in 0..10 {
        yield_now().await;
    }

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());

    scheduler.stop();
}
