//! Typed observer registry for the telemetry signals.
//!
//! ## Key Design Points
//! - One listener list per signal with a strongly-typed payload, instead of
//!   an untyped process-global event bus
//! - Subscribers hold an opaque [`SubscriptionHandle`] for clean
//!   unsubscription: after [`SignalHub::unsubscribe`] returns, that
//!   subscription observes zero further deliveries
//! - Delivery is fire-and-forget over unbounded channels: a slow subscriber
//!   never blocks the producer, and a closed subscriber is pruned on the
//!   next emission to its signal

use std::collections::HashMap;

use nanoid::nanoid;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::debug;
use tracing::warn;

use crate::catalog::SensorKey;

/// Newest value per sensor for one tick
pub type SensorValues = HashMap<SensorKey, f64>;

/// Signals routed through the hub.
///
/// `TimeAdvanced` and `ValuesChanged` are produced by the telemetry core.
/// `SensorSelected` and `SensorHovered` pass through on behalf of the
/// selection/hover layer; the core never emits them on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    TimeAdvanced,
    ValuesChanged,
    SensorSelected,
    SensorHovered,
}

/// Opaque proof of registration; pass it back to [`SignalHub::unsubscribe`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionHandle {
    signal: SignalKind,
    id: String,
}

impl SubscriptionHandle {
    pub fn signal(&self) -> SignalKind {
        self.signal
    }
}

struct Listener<T> {
    id: String,
    tx: mpsc::UnboundedSender<T>,
}

#[derive(Default)]
pub struct SignalHub {
    time_advanced: RwLock<Vec<Listener<u64>>>,
    values_changed: RwLock<Vec<Listener<SensorValues>>>,
    sensor_selected: RwLock<Vec<Listener<SensorKey>>>,
    sensor_hovered: RwLock<Vec<Listener<SensorKey>>>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_time_advanced(&self) -> (SubscriptionHandle, mpsc::UnboundedReceiver<u64>) {
        Self::subscribe(&self.time_advanced, SignalKind::TimeAdvanced)
    }

    pub fn subscribe_values_changed(
        &self
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<SensorValues>) {
        Self::subscribe(&self.values_changed, SignalKind::ValuesChanged)
    }

    pub fn subscribe_sensor_selected(
        &self
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<SensorKey>) {
        Self::subscribe(&self.sensor_selected, SignalKind::SensorSelected)
    }

    pub fn subscribe_sensor_hovered(
        &self
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<SensorKey>) {
        Self::subscribe(&self.sensor_hovered, SignalKind::SensorHovered)
    }

    /// Removes the subscription. No further deliveries reach its receiver,
    /// even while ticks continue. Unknown handles are a no-op.
    pub fn unsubscribe(
        &self,
        handle: &SubscriptionHandle,
    ) {
        match handle.signal {
            SignalKind::TimeAdvanced => Self::remove(&self.time_advanced, handle),
            SignalKind::ValuesChanged => Self::remove(&self.values_changed, handle),
            SignalKind::SensorSelected => Self::remove(&self.sensor_selected, handle),
            SignalKind::SensorHovered => Self::remove(&self.sensor_hovered, handle),
        }
    }

    pub(crate) fn emit_time_advanced(
        &self,
        timestamp_ms: u64,
    ) {
        Self::emit(&self.time_advanced, SignalKind::TimeAdvanced, &timestamp_ms);
    }

    pub(crate) fn emit_values_changed(
        &self,
        latest: SensorValues,
    ) {
        Self::emit(&self.values_changed, SignalKind::ValuesChanged, &latest);
    }

    /// Pass-through for the selection layer
    pub fn emit_sensor_selected(
        &self,
        sensor_key: SensorKey,
    ) {
        Self::emit(&self.sensor_selected, SignalKind::SensorSelected, &sensor_key);
    }

    /// Pass-through for the hover layer
    pub fn emit_sensor_hovered(
        &self,
        sensor_key: SensorKey,
    ) {
        Self::emit(&self.sensor_hovered, SignalKind::SensorHovered, &sensor_key);
    }

    fn subscribe<T>(
        listeners: &RwLock<Vec<Listener<T>>>,
        signal: SignalKind,
    ) -> (SubscriptionHandle, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = nanoid!();

        listeners.write().push(Listener { id: id.clone(), tx });
        debug!("subscribed {:?} listener {}", signal, id);

        (SubscriptionHandle { signal, id }, rx)
    }

    fn remove<T>(
        listeners: &RwLock<Vec<Listener<T>>>,
        handle: &SubscriptionHandle,
    ) {
        let mut listeners = listeners.write();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != handle.id);

        if listeners.len() == before {
            debug!(
                "unsubscribe for unknown {:?} listener {}",
                handle.signal, handle.id
            );
        }
    }

    /// Sends the payload to every listener of the signal. A listener whose
    /// receiver is gone is pruned; the remaining listeners still get the
    /// payload.
    fn emit<T: Clone>(
        listeners: &RwLock<Vec<Listener<T>>>,
        signal: SignalKind,
        payload: &T,
    ) {
        let mut listeners = listeners.write();
        listeners.retain(|listener| {
            if listener.tx.send(payload.clone()).is_err() {
                warn!("{:?} listener {} is gone, pruning", signal, listener.id);
                false
            } else {
                true
            }
        });
    }
}

// Test helper methods
#[cfg(test)]
impl SignalHub {
    pub(crate) fn listener_count(
        &self,
        signal: SignalKind,
    ) -> usize {
        match signal {
            SignalKind::TimeAdvanced => self.time_advanced.read().len(),
            SignalKind::ValuesChanged => self.values_changed.read().len(),
            SignalKind::SensorSelected => self.sensor_selected.read().len(),
            SignalKind::SensorHovered => self.sensor_hovered.read().len(),
        }
    }
}
