use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Creation instant of a ledger record, in milliseconds since the UNIX
/// epoch.
///
/// The ledger requires timestamps to be monotonic non-decreasing across
/// the record sequence (not strictly increasing — two records may share a
/// millisecond). [`EventTime::at_or_after`] clamps a fresh wall-clock
/// reading to the predecessor's timestamp so the invariant survives clock
/// regressions.
///
/// Serialized as a bare integer, matching the persisted record format.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTime(u64);

impl EventTime {
    /// Create from an explicit millisecond value.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    /// The zero instant.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Milliseconds since the UNIX epoch.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Clamp this instant so it is never before `floor`.
    pub fn at_or_after(self, floor: EventTime) -> EventTime {
        if self < floor {
            floor
        } else {
            self
        }
    }
}

impl fmt::Debug for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventTime({}ms)", self.0)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_by_millis() {
        assert!(EventTime::from_millis(100) < EventTime::from_millis(200));
        assert_eq!(EventTime::from_millis(5), EventTime::from_millis(5));
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        let t = EventTime::now();
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(t.as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn at_or_after_clamps_backwards_clock() {
        let floor = EventTime::from_millis(1000);
        assert_eq!(EventTime::from_millis(900).at_or_after(floor), floor);
        assert_eq!(
            EventTime::from_millis(1100).at_or_after(floor),
            EventTime::from_millis(1100)
        );
        assert_eq!(floor.at_or_after(floor), floor);
    }

    #[test]
    fn serde_is_bare_integer() {
        let t = EventTime::from_millis(1758347513004);
        assert_eq!(serde_json::to_string(&t).unwrap(), "1758347513004");
        let parsed: EventTime = serde_json::from_str("1758347513004").unwrap();
        assert_eq!(parsed, t);
    }
}
