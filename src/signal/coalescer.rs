//! Decides which signals a completed tick publishes.
//!
//! `values-changed` goes out on every tick with that tick's per-sensor
//! deltas. `time-advanced` is rate-limited: it fires at most once per
//! configured interval, measured on a monotonic clock, so a faster future
//! scheduler period cannot churn the UI's shared time cursor.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::SensorValues;
use super::SignalHub;

pub struct NotificationCoalescer {
    hub: Arc<SignalHub>,
    min_emit_interval: Duration,
    last_emit: Mutex<Option<Instant>>,
}

impl NotificationCoalescer {
    pub fn new(
        hub: Arc<SignalHub>,
        min_emit_interval: Duration,
    ) -> Self {
        Self {
            hub,
            min_emit_interval,
            last_emit: Mutex::new(None),
        }
    }

    /// Publishes this tick's signals. Must run only after every append of
    /// the tick has completed, so a subscriber reading the store in reaction
    /// observes the tick's data.
    pub fn after_tick(
        &self,
        timestamp_ms: u64,
        latest: SensorValues,
    ) {
        let now = Instant::now();
        let due = {
            let mut last_emit = self.last_emit.lock();
            let due = match *last_emit {
                Some(previous) => now.duration_since(previous) >= self.min_emit_interval,
                None => true,
            };
            if due {
                *last_emit = Some(now);
            }
            due
        };

        if due {
            self.hub.emit_time_advanced(timestamp_ms);
        } else {
            debug!("time-advanced suppressed @ {}, interval not elapsed", timestamp_ms);
        }

        self.hub.emit_values_changed(latest);
    }
}
