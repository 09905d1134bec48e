//! Wall-clock instants
//!
//! Millisecond timestamps used by the unlock scheduler. Callers sample
//! the clock once and pass the same instant to every derived computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// An instant in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Convert a nanosecond timestamp, truncating to whole milliseconds.
    /// Stays in integer arithmetic so multi-year spans keep full precision.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos / NANOS_PER_MILLI)
    }

    /// Sample the system clock
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => Self(since_epoch.as_millis().min(u64::MAX as u128) as u64),
            Err(_) => {
                log::warn!("System clock is set before the Unix epoch");
                Self::EPOCH
            }
        }
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    pub const fn as_nanos(&self) -> u128 {
        self.0 as u128 * NANOS_PER_MILLI as u128
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Add a duration, saturating at the end of representable time
    pub fn plus(&self, duration: Duration) -> Timestamp {
        let millis = duration.as_millis().min(u64::MAX as u128) as u64;
        Timestamp(self.0.saturating_add(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
