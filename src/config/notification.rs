use ::config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_TIME_SIGNAL_INTERVAL_MS;
use crate::Error;
use crate::Result;

/// Signal rate-limit parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Minimum gap between two time-advanced emissions in milliseconds,
    /// measured on a monotonic clock. Decouples the UI's shared time cursor
    /// from the scheduler period.
    #[serde(default = "default_time_signal_interval_ms")]
    pub time_signal_interval_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            time_signal_interval_ms: default_time_signal_interval_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.time_signal_interval_ms < 1 {
            return Err(Error::Config(ConfigError::Message(
                "time_signal_interval_ms must be at least 1ms".into(),
            )));
        }

        Ok(())
    }
}

fn default_time_signal_interval_ms() -> u64 {
    DEFAULT_TIME_SIGNAL_INTERVAL_MS
}
