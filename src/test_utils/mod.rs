//! Shared fixtures for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::Channel;
use crate::catalog::EntityCatalog;
use crate::catalog::Location;
use crate::catalog::ValueKind;
use crate::config::CatalogConfig;
use crate::config::ChannelConfig;
use crate::config::SensorConfig;
use crate::config::StoreConfig;
use crate::config::TelemetryConfig;
use crate::scheduler::ValueSource;
use crate::SourceError;

/// Catalog config with `sensor_1..sensor_N` and a single temperature channel
pub fn test_catalog_config(sensor_count: usize) -> CatalogConfig {
    let sensors = (1..=sensor_count)
        .map(|i| SensorConfig {
            key: format!("sensor_{}", i),
            name: format!("Sensor {}", i),
            group_name: format!("Stator {}", i),
            location: Location {
                x: 0.0,
                y: 2.0 + i as f64 * 0.895,
                z: 0.0,
            },
            object_id: 1000 + i as u64,
        })
        .collect();

    let channels = vec![ChannelConfig {
        key: "temperature".to_string(),
        name: "Temperature".to_string(),
        kind: ValueKind::Double,
        unit: "°C".to_string(),
        min: 10.0,
        max: 40.0,
    }];

    CatalogConfig { sensors, channels }
}

pub fn test_catalog(sensor_count: usize) -> EntityCatalog {
    EntityCatalog::from_config(&test_catalog_config(sensor_count))
        .expect("test catalog should build")
}

pub fn test_config(
    sensor_count: usize,
    window_capacity: usize,
) -> TelemetryConfig {
    TelemetryConfig {
        catalog: test_catalog_config(sensor_count),
        store: StoreConfig { window_capacity },
        ..TelemetryConfig::default()
    }
}

/// Source returning whatever value the test scripted last
pub struct ScriptedSource {
    value: Arc<Mutex<f64>>,
}

impl ScriptedSource {
    pub fn new(initial: f64) -> (Self, Arc<Mutex<f64>>) {
        let value = Arc::new(Mutex::new(initial));
        (
            Self {
                value: value.clone(),
            },
            value,
        )
    }
}

impl ValueSource for ScriptedSource {
    fn next_value(
        &self,
        _sensor_key: &str,
        _channel_key: &str,
        _channel: &Channel,
    ) -> std::result::Result<f64, SourceError> {
        Ok(*self.value.lock())
    }
}

/// Source failing for one sensor and succeeding for every other
pub struct PartialFailureSource {
    failing_sensor: String,
    value: f64,
}

impl PartialFailureSource {
    pub fn new(
        failing_sensor: &str,
        value: f64,
    ) -> Self {
        Self {
            failing_sensor: failing_sensor.to_string(),
            value,
        }
    }
}

impl ValueSource for PartialFailureSource {
    fn next_value(
        &self,
        sensor_key: &str,
        channel_key: &str,
        _channel: &Channel,
    ) -> std::result::Result<f64, SourceError> {
        if sensor_key == self.failing_sensor {
            return Err(SourceError::Unavailable {
                sensor_key: sensor_key.to_string(),
                channel_key: channel_key.to_string(),
            });
        }
        Ok(self.value)
    }
}
