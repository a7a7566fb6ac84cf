//! Fail-fast admission control for outbound searches.
//!
//! A [`RequestGate`] holds a fixed number of slots. Admission never waits:
//! [`RequestGate::try_acquire`] either hands out a [`GatePermit`] right away
//! or reports that every slot is taken. Dropping the permit returns the
//! slot, so a guarded operation releases exactly once on every exit path,
//! including when its future is dropped mid-flight.

use tokio::sync::{Semaphore, SemaphorePermit};

/// Default number of concurrent in-flight searches.
pub const DEFAULT_CAPACITY: usize = 10;

/// Fixed-capacity, non-blocking request gate.
#[derive(Debug)]
pub struct RequestGate {
    slots: Semaphore,
    capacity: usize,
}

/// One admitted request. The slot is released when this is dropped.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct GatePermit<'a> {
    _permit: SemaphorePermit<'a>,
}

impl RequestGate {
    /// Create a gate with `capacity` slots.
    ///
    /// Capacity is checked by [`GeocodingConfig::validate`](crate::GeocodingConfig::validate)
    /// before a client builds its gate.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`Semaphore::MAX_PERMITS`].
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Semaphore::new(capacity),
            capacity,
        }
    }

    /// Take one slot if any is free. Never waits.
    pub fn try_acquire(&self) -> Option<GatePermit<'_>> {
        // The semaphore is never closed, so the only failure is exhaustion.
        match self.slots.try_acquire() {
            Ok(permit) => Some(GatePermit { _permit: permit }),
            Err(_) => None,
        }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    /// Slots currently held.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.available()
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
