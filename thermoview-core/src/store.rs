//! Ingestion store for sensor readings
//!
//! ## Overview
//!
//! The store is the authoritative, deduplicated list of readings
//! available to the view. It is populated wholesale by snapshot
//! fetches and appended to, one reading at a time, by the push
//! channel. It is never mutated in place.
//!
//! ## Lifecycle
//!
//! Created empty when a screen activates, replaced by each snapshot,
//! appended to by each push event, discarded when the screen is torn
//! down. Transport failures never touch it: a failed fetch leaves the
//! previous contents intact.

use crate::reading::Reading;
use crate::time::Timestamp;

/// Store health counters
///
/// Track ingestion behavior without affecting it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Readings accepted via push
    pub accepted: u32,
    /// Push events dropped as duplicates
    pub duplicates_dropped: u32,
    /// Full snapshot replacements applied
    pub snapshots_applied: u32,
}

/// Insertion-ordered, deduplicated sequence of readings.
#[derive(Debug, Default, Clone)]
pub struct ReadingStore {
    readings: Vec<Reading>,
    stats: StoreStats,
}

impl ReadingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire contents with a snapshot.
    ///
    /// No merge against prior state: the snapshot is taken as the
    /// full truth, residual entries from earlier loads are discarded.
    pub fn replace(&mut self, readings: Vec<Reading>) {
        self.readings = readings;
        self.stats.snapshots_applied += 1;
    }

    /// Append one pushed reading, unless its timestamp is already present.
    ///
    /// Returns `true` if the reading was stored. Duplicates are dropped
    /// silently, which makes the operation idempotent under redelivery.
    ///
    /// The timestamp is the whole dedup key; two physically distinct
    /// readings sharing a timestamp collapse into one. That matches the
    /// upstream contract, which never produces such pairs per sensor
    /// stream.
    pub fn apply(&mut self, reading: Reading) -> bool {
        if self.contains_timestamp(reading.timestamp) {
            self.stats.duplicates_dropped += 1;
            return false;
        }

        self.readings.push(reading);
        self.stats.accepted += 1;
        true
    }

    /// Check whether any stored reading carries `timestamp`.
    pub fn contains_timestamp(&self, timestamp: Timestamp) -> bool {
        self.readings.iter().any(|r| r.timestamp == timestamp)
    }

    /// Stored readings in insertion order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Number of stored readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Check if the store holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Ingestion counters.
    pub fn stats(&self) -> StoreStats {
        self.stats
    }
}
