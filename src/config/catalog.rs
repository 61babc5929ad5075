use ::config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::catalog::Location;
use crate::catalog::ValueKind;
use crate::Error;
use crate::Result;

/// One sensor definition. The key is opaque to the engine.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SensorConfig {
    /// Unique key, e.g. "sensor_7"
    pub key: String,
    pub name: String,
    /// Owning group shown in list panels, e.g. "Stator 7"
    pub group_name: String,
    #[serde(default)]
    pub location: Location,
    /// Scene object this sensor is attached to
    pub object_id: u64,
}

/// One channel definition shared by every sensor.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelConfig {
    /// Unique key, e.g. "temperature"
    pub key: String,
    pub name: String,
    #[serde(default = "default_value_kind")]
    pub kind: ValueKind,
    pub unit: String,
    /// Expected display range; used for downstream scaling only
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

impl Default for CatalogConfig {
    /// Default machine layout: 24 stator-mounted temperature sensors, stacked
    /// along the machine axis.
    fn default() -> Self {
        let sensors = (1..=24)
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

        Self { sensors, channels }
    }
}

impl CatalogConfig {
    /// Validates the catalog definitions
    pub fn validate(&self) -> Result<()> {
        if self.sensors.is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "catalog must define at least one sensor".into(),
            )));
        }

        if self.channels.is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "catalog must define at least one channel".into(),
            )));
        }

        Ok(())
    }
}

fn default_value_kind() -> ValueKind {
    ValueKind::Double
}
