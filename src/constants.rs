// -
// Configuration defaults

/// Samples retained per (sensor, channel) window
pub(crate) const DEFAULT_WINDOW_CAPACITY: usize = 20;

/// Scheduler period in milliseconds
pub(crate) const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Minimum gap between two time-advanced emissions in milliseconds
pub(crate) const DEFAULT_TIME_SIGNAL_INTERVAL_MS: u64 = 1_000;

/// Synthetic generator baseline and uniform spread
pub(crate) const DEFAULT_SYNTHETIC_BASE: f64 = 20.0;
pub(crate) const DEFAULT_SYNTHETIC_SPREAD: f64 = 10.0;

/// Environment variable prefix for configuration overrides
pub(crate) const ENV_PREFIX: &str = "TWIN";
