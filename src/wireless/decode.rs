//! Value decoding for registration-table attributes
//!
//! Pure functions: the same raw value always decodes to the same output.

use crate::snmp::Value;

const VOLUME_UNITS: [&str; 4] = ["byte", "kiB", "MiB", "GiB"];

/// A byte counter with its human-readable rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteVolume {
    pub raw: u64,
    pub display: String,
}

/// Render `bytes` by dividing by 1024 while above 1024.
/// Stops at GiB; larger values keep growing in GiB.
pub fn scale_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < VOLUME_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, VOLUME_UNITS[unit])
}

/// Uptime split out of a hundredths-of-a-second counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    pub fn from_hundredths(ticks: u64) -> Self {
        let total = ticks / 100;
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }
}

/// Seconds are truncated, not rounded
impl std::fmt::Display for Uptime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

pub fn decode_integer(value: &Value) -> Option<i64> {
    value.as_i64()
}

pub fn decode_volume(value: &Value) -> Option<ByteVolume> {
    let raw = value.as_u64()?;
    Some(ByteVolume {
        raw,
        display: scale_bytes(raw),
    })
}

pub fn decode_uptime(value: &Value) -> Option<Uptime> {
    value.as_u64().map(Uptime::from_hundredths)
}
