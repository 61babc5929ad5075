use std::collections::VecDeque;

/// Point-in-time copy of one window's contents.
///
/// Index-aligned: `timestamps[i]` is when `values[i]` was recorded. Appends
/// happening after the snapshot was taken never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSnapshot {
    /// Epoch milliseconds, non-decreasing
    pub timestamps: Vec<u64>,
    pub values: Vec<f64>,
    /// Samples ever appended to this window; eviction does not reset it
    pub count: u64,
}

/// Bounded, time-ordered buffer of recent samples for one (sensor, channel)
/// pair. Append-only at the tail; the head is evicted once the buffer is
/// past capacity.
#[derive(Debug)]
pub(crate) struct SampleWindow {
    timestamps: VecDeque<u64>,
    values: VecDeque<f64>,
    capacity: usize,
    count: u64,
}

impl SampleWindow {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(capacity),
            values: VecDeque::with_capacity(capacity),
            capacity,
            count: 0,
        }
    }

    pub(crate) fn push(
        &mut self,
        timestamp_ms: u64,
        value: f64,
    ) {
        self.timestamps.push_back(timestamp_ms);
        self.values.push_back(value);
        self.count += 1;

        // Maintain only the most recent `capacity` samples
        if self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
            self.values.pop_front();
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub(crate) fn first_timestamp(&self) -> Option<u64> {
        self.timestamps.front().copied()
    }

    pub(crate) fn last_timestamp(&self) -> Option<u64> {
        self.timestamps.back().copied()
    }

    pub(crate) fn last_sample(&self) -> Option<(u64, f64)> {
        match (self.timestamps.back(), self.values.back()) {
            (Some(timestamp_ms), Some(value)) => Some((*timestamp_ms, *value)),
            _ => None,
        }
    }

    pub(crate) fn snapshot(&self) -> SampleSnapshot {
        SampleSnapshot {
            timestamps: self.timestamps.iter().copied().collect(),
            values: self.values.iter().copied().collect(),
            count: self.count,
        }
    }
}
