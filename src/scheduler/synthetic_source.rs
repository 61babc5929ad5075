use rand::Rng;

use super::ValueSource;
use crate::catalog::Channel;
use crate::config::SyntheticConfig;
use crate::SourceError;

/// Uniform random generator standing in for a live machine feed.
///
/// Produces `base_value + [0, spread)` for every sensor and channel. The
/// channel's display range is not consulted: it scales rendering downstream,
/// not generation.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    base_value: f64,
    spread: f64,
}

impl SyntheticSource {
    pub fn new(config: &SyntheticConfig) -> Self {
        Self {
            base_value: config.base_value,
            spread: config.spread,
        }
    }
}

impl ValueSource for SyntheticSource {
    fn next_value(
        &self,
        _sensor_key: &str,
        _channel_key: &str,
        _channel: &Channel,
    ) -> std::result::Result<f64, SourceError> {
        if self.spread <= 0.0 {
            return Ok(self.base_value);
        }

        let mut rng = rand::thread_rng();
        Ok(self.base_value + rng.gen_range(0.0..self.spread))
    }
}
