use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A wall-clock timestamp in whole seconds since the Unix epoch.
///
/// The persisted session stores all of its scheduling state in these, so the
/// game survives process restarts without losing its place in time.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct UnixTime(pub u64);

impl UnixTime {
    /// Return the current wall-clock time
    pub fn now() -> UnixTime {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        UnixTime(secs)
    }

    /// Return this timestamp advanced by `minutes` minutes
    pub fn plus_minutes(self, minutes: u64) -> UnixTime {
        UnixTime(self.0.saturating_add(minutes.saturating_mul(60)))
    }

    /// Return how long from `now` until this timestamp, or zero if it has
    /// already passed
    pub fn since(self, now: UnixTime) -> Duration {
        Duration::from_secs(self.0.saturating_sub(now.0))
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An RGB color triple, serialized as a three-element array
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}
