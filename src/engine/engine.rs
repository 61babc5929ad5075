//! The telemetry engine handle.
//!
//! ## Key Responsibilities
//! - Owns the entity catalog, sample store, signal hub and tick scheduler
//! - Exposes the pull-based read API consumed by chart panels, list panels
//!   and heatmap coloring
//! - Exposes the push-based signal API (subscribe/unsubscribe)
//! - Drives the scheduler lifecycle (`start`/`stop`)
//!
//! Exactly one engine exists per running application. Consumers receive a
//! shared reference at construction instead of reaching for process-global
//! state; the store itself is never handed out mutably.
//!
//! ## Example Usage
//! ```rust,no_run
//! use twinstream::TelemetryEngineBuilder;
//!
//! # fn main() -> twinstream::Result<()> {
//! let engine = TelemetryEngineBuilder::new(None)?.build()?;
//! let (_handle, _updates) = engine.subscribe_values_changed();
//! engine.start();
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::Channel;
use crate::catalog::ChannelKey;
use crate::catalog::EntityCatalog;
use crate::catalog::Sensor;
use crate::catalog::SensorKey;
use crate::config::TelemetryConfig;
use crate::scheduler::TickScheduler;
use crate::signal::SensorValues;
use crate::signal::SignalHub;
use crate::signal::SubscriptionHandle;
use crate::store::SampleSnapshot;
use crate::store::SampleStore;

pub struct TelemetryEngine {
    catalog: Arc<EntityCatalog>,
    store: Arc<SampleStore>,
    hub: Arc<SignalHub>,
    scheduler: TickScheduler,
    config: TelemetryConfig,
}

impl TelemetryEngine {
    pub(crate) fn new(
        catalog: Arc<EntityCatalog>,
        store: Arc<SampleStore>,
        hub: Arc<SignalHub>,
        scheduler: TickScheduler,
        config: TelemetryConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            hub,
            scheduler,
            config,
        }
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    //-----------------------------------------------------------
    // Read API (pull)

    /// Sensors in registration order
    pub fn sensors(&self) -> &[(SensorKey, Sensor)] {
        self.catalog.sensors()
    }

    /// Channels in registration order
    pub fn channels(&self) -> &[(ChannelKey, Channel)] {
        self.catalog.channels()
    }

    pub fn sensor(
        &self,
        key: &str,
    ) -> Option<&Sensor> {
        self.catalog.sensor(key)
    }

    pub fn channel(
        &self,
        key: &str,
    ) -> Option<&Channel> {
        self.catalog.channel(key)
    }

    /// Point-in-time snapshot of the pair's recent samples, or `None` when
    /// nothing has been recorded yet
    pub fn read(
        &self,
        sensor_key: &str,
        channel_key: &str,
    ) -> Option<SampleSnapshot> {
        self.store.read(sensor_key, channel_key)
    }

    /// Newest (timestamp, value) of the pair, if any
    pub fn latest(
        &self,
        sensor_key: &str,
        channel_key: &str,
    ) -> Option<(u64, f64)> {
        self.store.latest(sensor_key, channel_key)
    }

    /// (earliest, latest) timestamps across all windows
    pub fn time_range(&self) -> (u64, u64) {
        self.store.time_range()
    }

    //-----------------------------------------------------------
    // Signal API (push)

    pub fn subscribe_time_advanced(&self) -> (SubscriptionHandle, mpsc::UnboundedReceiver<u64>) {
        self.hub.subscribe_time_advanced()
    }

    pub fn subscribe_values_changed(
        &self
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<SensorValues>) {
        self.hub.subscribe_values_changed()
    }

    pub fn subscribe_sensor_selected(
        &self
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<SensorKey>) {
        self.hub.subscribe_sensor_selected()
    }

    pub fn subscribe_sensor_hovered(
        &self
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<SensorKey>) {
        self.hub.subscribe_sensor_hovered()
    }

    pub fn unsubscribe(
        &self,
        handle: &SubscriptionHandle,
    ) {
        self.hub.unsubscribe(handle);
    }

    /// Pass-through for the selection layer; the telemetry core itself never
    /// emits this signal
    pub fn emit_sensor_selected(
        &self,
        sensor_key: SensorKey,
    ) {
        self.hub.emit_sensor_selected(sensor_key);
    }

    /// Pass-through for the hover layer; the telemetry core itself never
    /// emits this signal
    pub fn emit_sensor_hovered(
        &self,
        sensor_key: SensorKey,
    ) {
        self.hub.emit_sensor_hovered(sensor_key);
    }

    //-----------------------------------------------------------
    // Lifecycle

    /// Starts periodic production. Must be called within a Tokio runtime.
    /// Starting while running replaces the driver instead of duplicating it.
    pub fn start(&self) {
        self.scheduler.start();
    }

    /// Stops periodic production before its next scheduled tick
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Runs exactly one production tick with the given timestamp, without
    /// the wall-clock timer
    pub fn tick_once(
        &self,
        timestamp_ms: u64,
    ) {
        self.scheduler.tick_once(timestamp_ms);
    }
}
