//! Static registry of sensors and channels.
//!
//! The catalog is the single source of truth for which entities exist. It is
//! built once from configuration before any other component runs and is
//! read-only afterwards. Construction failure is the one fatal condition of
//! the crate: nothing downstream is meaningful without the catalog.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::config::CatalogConfig;
use crate::CatalogError;
use crate::Result;

/// Opaque identifier of a telemetry source, e.g. `sensor_7`
pub type SensorKey = String;

/// Opaque identifier of a measurement kind, e.g. `temperature`
pub type ChannelKey = String;

/// Value representation tag for a channel, as reported by the upstream feed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Double,
    Integer,
    Boolean,
}

/// Mounting position inside the machine model, in scene coordinates.
/// Consumed only by the scene layer; the telemetry core stores it verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A named telemetry source. Immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    /// Display name, e.g. "Sensor 7"
    pub name: String,
    /// Owning group shown in list panels, e.g. "Stator 7"
    pub group_name: String,
    pub location: Location,
    /// Reference to the scene object this sensor is attached to
    pub object_id: u64,
}

/// A named measurement kind. Immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Display name, e.g. "Temperature"
    pub name: String,
    pub kind: ValueKind,
    /// Physical unit for display, e.g. "°C"
    pub unit: String,
    /// Expected display range; scales rendering, never clamps values
    pub min: f64,
    pub max: f64,
}

pub struct EntityCatalog {
    sensors: Vec<(SensorKey, Sensor)>,
    channels: Vec<(ChannelKey, Channel)>,
    sensor_index: HashMap<SensorKey, usize>,
    channel_index: HashMap<ChannelKey, usize>,
}

impl EntityCatalog {
    /// Builds the catalog from configuration.
    ///
    /// Rejects empty sensor/channel sets and duplicate keys.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        if config.sensors.is_empty() {
            return Err(CatalogError::EmptySensorSet.into());
        }
        if config.channels.is_empty() {
            return Err(CatalogError::EmptyChannelSet.into());
        }

        let mut catalog = Self {
            sensors: Vec::with_capacity(config.sensors.len()),
            channels: Vec::with_capacity(config.channels.len()),
            sensor_index: HashMap::with_capacity(config.sensors.len()),
            channel_index: HashMap::with_capacity(config.channels.len()),
        };

        for sensor_config in &config.sensors {
            if catalog.sensor_index.contains_key(&sensor_config.key) {
                return Err(CatalogError::DuplicateSensor(sensor_config.key.clone()).into());
            }
            catalog
                .sensor_index
                .insert(sensor_config.key.clone(), catalog.sensors.len());
            catalog.sensors.push((
                sensor_config.key.clone(),
                Sensor {
                    name: sensor_config.name.clone(),
                    group_name: sensor_config.group_name.clone(),
                    location: sensor_config.location,
                    object_id: sensor_config.object_id,
                },
            ));
        }

        for channel_config in &config.channels {
            if catalog.channel_index.contains_key(&channel_config.key) {
                return Err(CatalogError::DuplicateChannel(channel_config.key.clone()).into());
            }
            catalog
                .channel_index
                .insert(channel_config.key.clone(), catalog.channels.len());
            catalog.channels.push((
                channel_config.key.clone(),
                Channel {
                    name: channel_config.name.clone(),
                    kind: channel_config.kind,
                    unit: channel_config.unit.clone(),
                    min: channel_config.min,
                    max: channel_config.max,
                },
            ));
        }

        Ok(catalog)
    }

    /// Sensors in registration order
    pub fn sensors(&self) -> &[(SensorKey, Sensor)] {
        &self.sensors
    }

    /// Channels in registration order
    pub fn channels(&self) -> &[(ChannelKey, Channel)] {
        &self.channels
    }

    pub fn sensor(
        &self,
        key: &str,
    ) -> Option<&Sensor> {
        self.sensor_index.get(key).map(|i| &self.sensors[*i].1)
    }

    pub fn channel(
        &self,
        key: &str,
    ) -> Option<&Channel> {
        self.channel_index.get(key).map(|i| &self.channels[*i].1)
    }

    pub fn contains_sensor(
        &self,
        key: &str,
    ) -> bool {
        self.sensor_index.contains_key(key)
    }

    pub fn contains_channel(
        &self,
        key: &str,
    ) -> bool {
        self.channel_index.contains_key(key)
    }
}
