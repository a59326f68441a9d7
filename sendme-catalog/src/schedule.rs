use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label of the slot that is always available
pub const INSTANT_ORDER: &str = "Instant Order";

/// Half-hour purchase windows offered to customers, `(start, end)` as `(hour, minute)`
const WINDOWS: [((u32, u32), (u32, u32)); 7] = [
    ((7, 0), (7, 30)),
    ((9, 0), (9, 30)),
    ((11, 0), (11, 30)),
    ((13, 0), (13, 30)),
    ((14, 0), (14, 30)),
    ((16, 0), (16, 30)),
    ((18, 0), (18, 30)),
];

/// When the shopper should carry out the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TimeSlot {
    Window { start: NaiveTime, end: NaiveTime },
    Instant,
}

impl TimeSlot {
    /// The fixed slot menu, windows first and "Instant Order" last
    pub fn catalog() -> Vec<TimeSlot> {
        WINDOWS
            .iter()
            .filter_map(|&((sh, sm), (eh, em))| {
                Some(TimeSlot::Window {
                    start: NaiveTime::from_hms_opt(sh, sm, 0)?,
                    end: NaiveTime::from_hms_opt(eh, em, 0)?,
                })
            })
            .chain(std::iter::once(TimeSlot::Instant))
            .collect()
    }

    pub fn is_offered(&self) -> bool {
        Self::catalog().contains(self)
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        match self {
            TimeSlot::Window { start, .. } => Some(*start),
            TimeSlot::Instant => None,
        }
    }

    /// A window on `date` is gone once its start is earlier than the current
    /// minute of `now`. Other days, and the instant slot, are always open.
    pub fn is_available(&self, date: NaiveDate, now: NaiveDateTime) -> bool {
        match self.start_time() {
            Some(start) if date == now.date() => {
                let current = now.time().with_second(0).unwrap_or(now.time());
                let current = current.with_nanosecond(0).unwrap_or(current);
                start >= current
            }
            _ => true,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSlot::Window { start, end } => {
                write!(f, "{} – {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            TimeSlot::Instant => f.write_str(INSTANT_ORDER),
        }
    }
}

impl FromStr for TimeSlot {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case(INSTANT_ORDER) {
            return Ok(TimeSlot::Instant);
        }

        let mut parts = raw.split(['–', '-']).map(str::trim);
        let start = parts
            .next()
            .and_then(|p| NaiveTime::parse_from_str(p, "%H:%M").ok())
            .ok_or_else(|| SlotParseError(s.to_string()))?;
        let end = match parts.next() {
            Some(p) => NaiveTime::parse_from_str(p, "%H:%M")
                .map_err(|_| SlotParseError(s.to_string()))?,
            None => start + chrono::Duration::minutes(30),
        };

        Ok(TimeSlot::Window { start, end })
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown time slot: {0}")]
pub struct SlotParseError(pub String);
