use ::config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_WINDOW_CAPACITY;
use crate::Error;
use crate::Result;

/// Sample window retention parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Maximum number of samples retained per (sensor, channel) window.
    /// Appending past this bound evicts the oldest sample.
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "window_capacity must be greater than 0".into(),
            )));
        }

        Ok(())
    }
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW_CAPACITY
}
