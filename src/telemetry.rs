//! Shared telemetry state and the event bus that feeds it.
//!
//! The original firmware let three tasks scribble on the same globals.
//! Here the mutation path is explicit and race-free by construction:
//!
//! - Producer activities (transmit, receive) publish [`TelemetryEvent`]s
//!   onto a bounded lock-free [`TelemetryBus`].
//! - Exactly one consumer - the render activity - owns the
//!   [`TelemetryStore`] and applies drained events to it.
//! - Anyone needing the current values takes a [`TelemetryStore`] copy
//!   (the struct is `Copy`) latched once per render cycle.
//!
//! Publishing never blocks. When the bus is full the event is dropped
//! and counted, the same accepted-loss posture the radio link itself has.
//!
//! # Example
//!
//! ```rust
//! use evdash::telemetry::{TelemetryBus, TelemetryEvent, TelemetryStore};
//!
//! let bus = TelemetryBus::new();
//! let mut store = TelemetryStore::default();
//!
//! bus.publish(TelemetryEvent::SpeedReported(18));
//! bus.publish(TelemetryEvent::TripAdvanced(3));
//! bus.publish(TelemetryEvent::LinkActive(true));
//!
//! while let Some(event) = bus.try_next() {
//!     store.apply(event);
//! }
//!
//! assert_eq!(store.speed, 18);
//! assert_eq!(store.trip_distance, 3);
//! assert!(store.link_up);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::mpmc::MpMcQueue;

/// Bus depth. Producers run at 4 Hz each and the consumer drains at 2 Hz,
/// so a handful of slots is already generous; 16 absorbs a stalled render
/// cycle without growing the footprint.
pub const BUS_DEPTH: usize = 16;

/// One state change flowing from a producer activity to the store owner.
///
/// This is the only mutation pathway into [`TelemetryStore`]: each field
/// of the store has exactly one event variant, and each variant has
/// exactly one producing activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TelemetryEvent {
    /// New displayed throttle percentage (from the transmit activity).
    ThrottleUpdated(u16),
    /// Speed reported by the drive unit (from the receive activity).
    SpeedReported(u16),
    /// Trip distance increment to accumulate (from the receive activity).
    TripAdvanced(u32),
    /// Whether the link produced data this poll cycle (from the receive
    /// activity).
    LinkActive(bool),
}

/// The telemetry aggregate the dashboard renders from.
///
/// Owned exclusively by the render activity; producers never hold a
/// reference to it. Lives for the whole process, mutated only through
/// [`apply`](Self::apply).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryStore {
    /// Latest displayed throttle percentage.
    pub throttle_pct: u16,
    /// Latest speed reported by the drive unit.
    pub speed: u16,
    /// Accumulated trip distance since boot.
    pub trip_distance: u32,
    /// Whether the most recent receive poll produced data.
    pub link_up: bool,
}

impl TelemetryStore {
    /// Apply one event to the store.
    pub fn apply(&mut self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::ThrottleUpdated(pct) => self.throttle_pct = pct,
            TelemetryEvent::SpeedReported(speed) => self.speed = speed,
            TelemetryEvent::TripAdvanced(delta) => {
                self.trip_distance = self.trip_distance.saturating_add(delta);
            }
            TelemetryEvent::LinkActive(up) => self.link_up = up,
        }
    }

    /// Latch a copy of the current values.
    ///
    /// The copy is what render code reads from for the rest of its
    /// cycle, so a cycle never observes a half-applied update.
    pub fn snapshot(&self) -> TelemetryStore {
        *self
    }
}

/// Bounded lock-free event channel from producers to the store owner.
///
/// Multi-producer so both the transmit and receive activities can share
/// one bus; the consumer side is single by convention (only the render
/// activity drains it). Methods take `&self`, so the bus can sit behind
/// a plain shared reference across threads.
pub struct TelemetryBus {
    queue: MpMcQueue<TelemetryEvent, BUS_DEPTH>,
    dropped: AtomicU32,
}

impl TelemetryBus {
    /// Create an empty bus.
    pub const fn new() -> Self {
        Self {
            queue: MpMcQueue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Publish one event.
    ///
    /// Never blocks. Returns `false` when the bus was full and the event
    /// was dropped; the drop is counted for diagnostics.
    pub fn publish(&self, event: TelemetryEvent) -> bool {
        match self.queue.enqueue(event) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Take the next pending event, if any.
    pub fn try_next(&self) -> Option<TelemetryEvent> {
        self.queue.dequeue()
    }

    /// Number of events dropped because the bus was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for TelemetryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // TelemetryStore
    // =========================================================================

    #[test]
    fn store_default_is_idle() {
        let store = TelemetryStore::default();
        assert_eq!(store.throttle_pct, 0);
        assert_eq!(store.speed, 0);
        assert_eq!(store.trip_distance, 0);
        assert!(!store.link_up);
    }

    #[test]
    fn events_map_to_single_fields() {
        let mut store = TelemetryStore::default();

        store.apply(TelemetryEvent::ThrottleUpdated(64));
        assert_eq!(store.throttle_pct, 64);
        assert_eq!(store.speed, 0);

        store.apply(TelemetryEvent::SpeedReported(22));
        assert_eq!(store.speed, 22);
        assert_eq!(store.throttle_pct, 64);

        store.apply(TelemetryEvent::LinkActive(true));
        assert!(store.link_up);
    }

    #[test]
    fn trip_distance_accumulates() {
        let mut store = TelemetryStore::default();
        store.apply(TelemetryEvent::TripAdvanced(5));
        store.apply(TelemetryEvent::TripAdvanced(7));
        assert_eq!(store.trip_distance, 12);
    }

    #[test]
    fn trip_distance_saturates() {
        let mut store = TelemetryStore {
            trip_distance: u32::MAX - 1,
            ..Default::default()
        };
        store.apply(TelemetryEvent::TripAdvanced(10));
        assert_eq!(store.trip_distance, u32::MAX);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut store = TelemetryStore::default();
        store.apply(TelemetryEvent::SpeedReported(9));

        let snap = store.snapshot();
        store.apply(TelemetryEvent::SpeedReported(30));

        assert_eq!(snap.speed, 9);
        assert_eq!(store.speed, 30);
    }

    // =========================================================================
    // TelemetryBus
    // =========================================================================

    #[test]
    fn bus_is_fifo() {
        let bus = TelemetryBus::new();
        bus.publish(TelemetryEvent::SpeedReported(1));
        bus.publish(TelemetryEvent::SpeedReported(2));

        assert_eq!(bus.try_next(), Some(TelemetryEvent::SpeedReported(1)));
        assert_eq!(bus.try_next(), Some(TelemetryEvent::SpeedReported(2)));
        assert_eq!(bus.try_next(), None);
    }

    #[test]
    fn bus_drops_when_full() {
        let bus = TelemetryBus::new();
        for i in 0..BUS_DEPTH as u16 {
            assert!(bus.publish(TelemetryEvent::SpeedReported(i)));
        }

        assert!(!bus.publish(TelemetryEvent::SpeedReported(99)));
        assert_eq!(bus.dropped(), 1);

        // Draining one slot makes room again
        assert!(bus.try_next().is_some());
        assert!(bus.publish(TelemetryEvent::SpeedReported(100)));
    }

    #[test]
    fn bus_shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let bus = Arc::new(TelemetryBus::new());
        let producer = {
            let bus = Arc::clone(&bus);
            thread::spawn(move || {
                for i in 0..8 {
                    bus.publish(TelemetryEvent::SpeedReported(i));
                }
            })
        };

        producer.join().unwrap();

        let mut received = 0;
        while bus.try_next().is_some() {
            received += 1;
        }
        assert_eq!(received, 8);
    }
}
