use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wall-clock time of day at half-hour granularity, printed as zero-padded
/// `HH:MM`. Ordering is (hour, minute), which matches the lexicographic order
/// of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    pub hour: u8,
    pub minute: u8,
}

impl SlotTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid time: {0}")]
pub struct ParseSlotTimeError(String);

impl FromStr for SlotTime {
    type Err = ParseSlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseSlotTimeError(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(bad)?;
        let hour: u8 = h.parse().map_err(|_| bad())?;
        let minute: u8 = m.parse().map_err(|_| bad())?;
        SlotTime::new(hour, minute).ok_or_else(bad)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// The bookable start times: every half hour from 06:00 through 02:30 the
/// next calendar day (the venue runs an overnight window), 42 slots total.
pub fn day_slots() -> Vec<SlotTime> {
    let mut slots = Vec::with_capacity(42);
    for hour in 6..24u8 {
        slots.push(SlotTime { hour, minute: 0 });
        slots.push(SlotTime { hour, minute: 30 });
    }
    for hour in 0..3u8 {
        slots.push(SlotTime { hour, minute: 0 });
        slots.push(SlotTime { hour, minute: 30 });
    }
    slots
}
