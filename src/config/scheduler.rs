use ::config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_SYNTHETIC_BASE;
use crate::constants::DEFAULT_SYNTHETIC_SPREAD;
use crate::constants::DEFAULT_TICK_INTERVAL_MS;
use crate::Error;
use crate::Result;

/// Tick cadence and synthetic generator parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Production period in milliseconds. Best-effort: a tick always runs to
    /// completion before the next one can begin.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Parameters for the synthetic value source
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

/// Uniform random generator standing in for a live machine feed
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyntheticConfig {
    /// Lowest value the generator can produce
    #[serde(default = "default_synthetic_base")]
    pub base_value: f64,

    /// Width of the uniform band above `base_value`
    #[serde(default = "default_synthetic_spread")]
    pub spread: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            base_value: default_synthetic_base(),
            spread: default_synthetic_spread(),
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms < 1 {
            return Err(Error::Config(ConfigError::Message(
                "tick_interval_ms must be at least 1ms".into(),
            )));
        }

        self.synthetic.validate()?;

        Ok(())
    }
}

impl SyntheticConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.base_value.is_finite() {
            return Err(Error::Config(ConfigError::Message(
                "synthetic base_value must be finite".into(),
            )));
        }

        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(Error::Config(ConfigError::Message(
                "synthetic spread must be finite and non-negative".into(),
            )));
        }

        Ok(())
    }
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_synthetic_base() -> f64 {
    DEFAULT_SYNTHETIC_BASE
}

fn default_synthetic_spread() -> f64 {
    DEFAULT_SYNTHETIC_SPREAD
}
