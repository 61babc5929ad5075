//! In-memory sample window store.
//!
//! One bounded window per (sensor, channel) pair the catalog defines,
//! created up front at engine build time. The tick scheduler is the sole
//! writer; every other component reads through copy-on-read snapshots, so a
//! snapshot already handed out is never retroactively mutated by a later
//! append.

use std::collections::HashMap;

use dashmap::DashMap;
use tracing::trace;
use tracing::warn;

use super::sample_window::SampleWindow;
use super::SampleSnapshot;
use crate::catalog::ChannelKey;
use crate::catalog::EntityCatalog;
use crate::catalog::SensorKey;
use crate::utils::time::timestamp_millis;

pub struct SampleStore {
    windows: DashMap<SensorKey, HashMap<ChannelKey, SampleWindow>>,
}

impl SampleStore {
    /// Creates one empty window per sensor x channel the catalog defines
    pub fn from_catalog(
        catalog: &EntityCatalog,
        window_capacity: usize,
    ) -> Self {
        let windows = DashMap::new();

        for (sensor_key, _) in catalog.sensors() {
            let mut channels = HashMap::with_capacity(catalog.channels().len());
            for (channel_key, _) in catalog.channels() {
                channels.insert(channel_key.clone(), SampleWindow::new(window_capacity));
            }
            windows.insert(sensor_key.clone(), channels);
        }

        Self { windows }
    }

    /// Appends a sample to the pair's window, evicting the oldest entry once
    /// the window is full.
    ///
    /// Unknown pairs are logged and dropped instead of failing: one
    /// misconfigured sensor must not stop the shared tick.
    pub fn append(
        &self,
        sensor_key: &str,
        channel_key: &str,
        timestamp_ms: u64,
        value: f64,
    ) {
        match self.windows.get_mut(sensor_key) {
            Some(mut channels) => match channels.get_mut(channel_key) {
                Some(window) => {
                    window.push(timestamp_ms, value);
                    trace!(
                        "append {}/{} = {} @ {}",
                        sensor_key,
                        channel_key,
                        value,
                        timestamp_ms
                    );
                }
                None => {
                    warn!(
                        "append against unknown channel {}/{}, sample dropped",
                        sensor_key, channel_key
                    );
                }
            },
            None => {
                warn!("append against unknown sensor {}, sample dropped", sensor_key);
            }
        }
    }

    /// Point-in-time snapshot of the pair's window, or `None` when the pair
    /// is unknown or no sample has been recorded yet
    pub fn read(
        &self,
        sensor_key: &str,
        channel_key: &str,
    ) -> Option<SampleSnapshot> {
        let channels = match self.windows.get(sensor_key) {
            Some(channels) => channels,
            None => {
                warn!("read against unknown sensor {}", sensor_key);
                return None;
            }
        };

        match channels.get(channel_key) {
            Some(window) if !window.is_empty() => Some(window.snapshot()),
            Some(_) => None,
            None => {
                warn!(
                    "read against unknown channel {}/{}",
                    sensor_key, channel_key
                );
                None
            }
        }
    }

    /// Newest (timestamp, value) of the pair's window, if any
    pub fn latest(
        &self,
        sensor_key: &str,
        channel_key: &str,
    ) -> Option<(u64, f64)> {
        self.windows
            .get(sensor_key)?
            .get(channel_key)?
            .last_sample()
    }

    /// (earliest, latest) timestamps across all windows; anchored at "now"
    /// when no sample exists anywhere
    pub fn time_range(&self) -> (u64, u64) {
        let mut earliest: Option<u64> = None;
        let mut latest: Option<u64> = None;

        for entry in self.windows.iter() {
            for window in entry.value().values() {
                if let (Some(first), Some(last)) =
                    (window.first_timestamp(), window.last_timestamp())
                {
                    earliest = Some(earliest.map_or(first, |e| e.min(first)));
                    latest = Some(latest.map_or(last, |l| l.max(last)));
                }
            }
        }

        match (earliest, latest) {
            (Some(earliest), Some(latest)) => (earliest, latest),
            _ => {
                let now = timestamp_millis();
                (now, now)
            }
        }
    }
}

// Test helper methods
#[cfg(test)]
impl SampleStore {
    pub(crate) fn window_len(
        &self,
        sensor_key: &str,
        channel_key: &str,
    ) -> usize {
        self.windows
            .get(sensor_key)
            .and_then(|channels| channels.get(channel_key).map(|window| window.len()))
            .unwrap_or(0)
    }

    pub(crate) fn pair_count(&self) -> usize {
        self.windows.iter().map(|entry| entry.value().len()).sum()
    }
}
