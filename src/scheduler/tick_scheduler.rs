//! Periodic driver producing one sample per sensor per channel.
//!
//! ## Key Responsibilities
//! - Owns the only write path into the [`SampleStore`]
//! - Runs every tick to completion (all appends, then all signals) before
//!   the next tick can begin
//! - Isolates per-sensor production failures so one bad sensor cannot stop
//!   the shared tick
//! - `start` replaces any running driver instead of duplicating it; `stop`
//!   is observed before the next scheduled tick

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

use super::ValueSource;
use crate::catalog::EntityCatalog;
use crate::catalog::SensorKey;
use crate::signal::NotificationCoalescer;
use crate::store::SampleStore;
use crate::utils::time::timestamp_millis;

pub struct TickScheduler {
    core: Arc<TickCore>,
    tick_interval: Duration,
    driver: Mutex<Option<CancellationToken>>,
}

/// Per-tick work, shared between the timer-driven loop and `tick_once`
struct TickCore {
    catalog: Arc<EntityCatalog>,
    store: Arc<SampleStore>,
    coalescer: NotificationCoalescer,
    source: Box<dyn ValueSource>,
}

impl TickScheduler {
    pub(crate) fn new(
        catalog: Arc<EntityCatalog>,
        store: Arc<SampleStore>,
        coalescer: NotificationCoalescer,
        source: Box<dyn ValueSource>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            core: Arc::new(TickCore {
                catalog,
                store,
                coalescer,
                source,
            }),
            tick_interval,
            driver: Mutex::new(None),
        }
    }

    /// Spawns the periodic driver task. Must be called within a Tokio
    /// runtime.
    ///
    /// Starting while already running replaces the existing driver: the old
    /// task is cancelled before the new one is spawned, so there is never a
    /// second concurrent driver.
    pub fn start(&self) {
        let mut driver = self.driver.lock();

        if let Some(previous) = driver.take() {
            info!("scheduler already running, replacing driver");
            previous.cancel();
        }

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let core = self.core.clone();
        let tick_interval = self.tick_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The interval's first tick completes immediately; consume it so
            // the first sample lands one full period after start.
            interval.tick().await;

            loop {
                tokio::select! {
                    // Use biased to ensure branch order
                    biased;
                    // P0: stop requested; no tick may fire afterwards
                    _ = task_cancel.cancelled() => {
                        info!("scheduler driver stopped");
                        return;
                    }
                    // P1: produce this tick's samples
                    _ = interval.tick() => {
                        core.run_tick(timestamp_millis());
                    }
                }
            }
        });

        *driver = Some(cancel);
        info!("scheduler driver started, period {:?}", self.tick_interval);
    }

    /// Requests the driver to stop. Effective before the next scheduled
    /// tick; a tick already running completes first. Stopping when not
    /// running is a no-op.
    pub fn stop(&self) {
        let mut driver = self.driver.lock();

        match driver.take() {
            Some(cancel) => {
                cancel.cancel();
            }
            None => {
                debug!("scheduler stop requested while not running");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver.lock().is_some()
    }

    /// Runs exactly one tick synchronously with the given timestamp.
    ///
    /// Lets tests and external drivers single-step production without the
    /// wall-clock timer.
    pub fn tick_once(
        &self,
        timestamp_ms: u64,
    ) {
        self.core.run_tick(timestamp_ms);
    }
}

impl TickCore {
    /// One production pass across every sensor and channel in the catalog.
    /// All appends complete before any signal for the tick goes out.
    fn run_tick(
        &self,
        timestamp_ms: u64,
    ) {
        let mut latest: HashMap<SensorKey, f64> = HashMap::new();

        for (sensor_key, _) in self.catalog.sensors() {
            for (channel_key, channel) in self.catalog.channels() {
                match self.source.next_value(sensor_key, channel_key, channel) {
                    Ok(value) => {
                        self.store.append(sensor_key, channel_key, timestamp_ms, value);
                        latest.insert(sensor_key.clone(), value);
                    }
                    Err(e) => {
                        warn!(
                            "value production failed for {}/{}: {}",
                            sensor_key, channel_key, e
                        );
                    }
                }
            }
        }

        trace!(
            "tick complete @ {} ({} sensors updated)",
            timestamp_ms,
            latest.len()
        );
        self.coalescer.after_tick(timestamp_ms, latest);
    }
}
