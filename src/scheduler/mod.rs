mod synthetic_source;
mod tick_scheduler;
pub use synthetic_source::*;
pub use tick_scheduler::*;

#[cfg(test)]
mod synthetic_source_test;
#[cfg(test)]
mod tick_scheduler_test;

///--------------------------------------
/// Trait Definition
#[cfg(test)]
use mockall::automock;

use crate::catalog::Channel;
use crate::SourceError;

/// Produces one reading per (sensor, channel) per tick.
///
/// The synthetic generator implements this today; a live feed can be plugged
/// in behind the same seam without touching the scheduler or the store.
#[cfg_attr(test, automock)]
pub trait ValueSource: Send + Sync + 'static {
    fn next_value(
        &self,
        sensor_key: &str,
        channel_key: &str,
        channel: &Channel,
    ) -> std::result::Result<f64, SourceError>;
}
