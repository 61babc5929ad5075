//! A builder pattern implementation for constructing a [`TelemetryEngine`].
//!
//! The [`TelemetryEngineBuilder`] wires catalog, store, signal hub,
//! coalescer and scheduler together from a [`TelemetryConfig`].
//!
//! ## Key Design Points
//! - **Default Components**: the synthetic value source configured in
//!   `[scheduler.synthetic]` drives production out of the box.
//! - **Customization**: `value_source()` plugs a live feed (or a mock)
//!   behind the same seam.
//! - **Fatal path**: a catalog that cannot be built aborts `build()`;
//!   nothing downstream is meaningful without it.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::TelemetryEngine;
use crate::catalog::EntityCatalog;
use crate::config::TelemetryConfig;
use crate::scheduler::SyntheticSource;
use crate::scheduler::TickScheduler;
use crate::scheduler::ValueSource;
use crate::signal::NotificationCoalescer;
use crate::signal::SignalHub;
use crate::store::SampleStore;
use crate::Result;

pub struct TelemetryEngineBuilder {
    config: TelemetryConfig,
    source: Option<Box<dyn ValueSource>>,
}

impl TelemetryEngineBuilder {
    /// Creates a builder with configuration loaded from defaults, an
    /// optional file and environment overrides
    pub fn new(config_path: Option<&str>) -> Result<Self> {
        let config = TelemetryConfig::load(config_path)?;
        Ok(Self::from_config(config))
    }

    /// Constructs the builder from an in-memory configuration
    pub fn from_config(config: TelemetryConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// Replaces the synthetic generator with a custom value source
    pub fn value_source(
        mut self,
        source: Box<dyn ValueSource>,
    ) -> Self {
        self.source = Some(source);
        self
    }

    /// Assembles the engine: catalog first, then one sample window per
    /// sensor x channel pair, then the notification and scheduling layers.
    pub fn build(self) -> Result<TelemetryEngine> {
        self.config.validate()?;

        let catalog = Arc::new(EntityCatalog::from_config(&self.config.catalog)?);
        let store = Arc::new(SampleStore::from_catalog(
            &catalog,
            self.config.store.window_capacity,
        ));
        let hub = Arc::new(SignalHub::new());
        let coalescer = NotificationCoalescer::new(
            hub.clone(),
            Duration::from_millis(self.config.notification.time_signal_interval_ms),
        );
        let source = self
            .source
            .unwrap_or_else(|| Box::new(SyntheticSource::new(&self.config.scheduler.synthetic)));
        let scheduler = TickScheduler::new(
            catalog.clone(),
            store.clone(),
            coalescer,
            source,
            Duration::from_millis(self.config.scheduler.tick_interval_ms),
        );

        info!(
            "telemetry engine assembled: {} sensors, {} channels, window capacity {}",
            catalog.sensors().len(),
            catalog.channels().len(),
            self.config.store.window_capacity
        );

        Ok(TelemetryEngine::new(
            catalog,
            store,
            hub,
            scheduler,
            self.config,
        ))
    }
}
