//! Topic identifier generation.
//!
//! Generates 64-bit IDs that are unique for the life of the ledger and
//! roughly time-ordered. An ID is composed of the clock's millisecond
//! timestamp shifted left by [`SEQUENCE_BITS`], plus a sequence counter
//! within that millisecond:
//!
//! ```text
//! | 54 bits: timestamp (ms since epoch) | 10 bits: sequence |
//! ```
//!
//! The generator never moves its timestamp component backwards: if the
//! injected clock regresses (a test resetting a [`FixedClock`], or a wall
//! clock step), new IDs keep counting up from the high-water mark, so an
//! ID value is never reused.
//!
//! # Thread Safety
//!
//! Uses a `parking_lot::Mutex` to ensure uniqueness across threads. The
//! lock is held only for the duration of the increment operation.
//!
//! [`FixedClock`]: crate::clock::FixedClock

use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of bits used for the sequence portion.
const SEQUENCE_BITS: u32 = 10;

/// Mask for extracting the sequence portion (10 bits).
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Opaque unique identifier for a topic, stable for the topic's lifetime.
///
/// Displays, parses, and serializes as a decimal string, the form the
/// persisted ledger documents carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(u64);

impl TopicId {
    /// Creates an identifier from a raw value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TopicId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl Serialize for TopicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TopicId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u64>().map(Self).map_err(serde::de::Error::custom)
    }
}

/// State for sequence-based ID generation.
struct GeneratorState {
    /// High-water timestamp used for ID generation.
    last_timestamp: u64,
    /// Sequence counter within the current millisecond.
    sequence: u64,
}

/// Generator for unique [`TopicId`] values.
///
/// One generator is owned by the board context; IDs from a single
/// generator are strictly increasing.
pub struct TopicIdGenerator {
    state: Mutex<GeneratorState>,
}

impl TopicIdGenerator {
    /// Creates a generator with no history.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GeneratorState { last_timestamp: 0, sequence: 0 }),
        }
    }

    /// Produces the next unique identifier for the given instant.
    ///
    /// The caller supplies `now` from its [`Clock`](crate::clock::Clock) so
    /// that all time reads go through one source.
    pub fn next(&self, now: DateTime<Utc>) -> TopicId {
        let now_ms = now.timestamp_millis().max(0) as u64;
        let mut state = self.state.lock();

        if now_ms > state.last_timestamp {
            state.last_timestamp = now_ms;
            state.sequence = 0;
        } else {
            // Same millisecond, or the clock went backwards: keep the
            // high-water mark and bump the sequence. On sequence overflow
            // advance the timestamp component by one artificial millisecond.
            state.sequence += 1;
            if state.sequence > SEQUENCE_MASK {
                state.last_timestamp += 1;
                state.sequence = 0;
            }
        }

        TopicId((state.last_timestamp << SEQUENCE_BITS) | state.sequence)
    }

    /// Raises the high-water mark so every subsequent id sorts after `id`.
    ///
    /// A fresh generator has no history; a process restarted within the
    /// same clock millisecond could otherwise mint an id equal to one
    /// already persisted. Callers that load an existing ledger feed its
    /// largest id through here before generating new ones.
    pub fn advance_past(&self, id: TopicId) {
        let timestamp = id.value() >> SEQUENCE_BITS;
        let sequence = id.value() & SEQUENCE_MASK;
        let mut state = self.state.lock();
        if timestamp > state.last_timestamp
            || (timestamp == state.last_timestamp && sequence > state.sequence)
        {
            state.last_timestamp = timestamp;
            state.sequence = sequence;
        }
    }
}

impl Default for TopicIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
