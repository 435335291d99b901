use modular_bitfield::prelude::*;
use std::fmt;

/// Zero point of the 41-bit timestamp field: 2010-11-04T00:00:00Z.
///
/// The epoch is part of the format's public contract, not configurable; a
/// decoder parsing a previously generated ID must reproduce it.
pub const SNOWFLAKE_EPOCH_MS: i64 = 1_288_828_800_000;

/// How far past "now" a decoded timestamp may land and still be accepted
/// by the plausibility window.
pub const SNOWFLAKE_FUTURE_TOLERANCE_MS: i64 = 24 * 60 * 60 * 1000;

pub const MAX_SNOWFLAKE_TIMESTAMP_MS: u64 = (1 << 41) - 1;
pub const MAX_SNOWFLAKE_MACHINE_ID: u64 = (1 << 10) - 1;
pub const MAX_SNOWFLAKE_SEQUENCE: u64 = (1 << 12) - 1;

/// Twitter-style Snowflake layout, least significant field first.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeId {
    /// 12 bits for the per-millisecond sequence number.
    pub sequence: B12,
    /// 10 bits for the machine id.
    pub machine_id: B10,
    /// 41 bits for milliseconds since [`SNOWFLAKE_EPOCH_MS`].
    pub timestamp: B41,
    /// The sign bit; always zero so the ID fits a positive i64.
    pub sign: B1,
}

impl SnowflakeId {
    pub fn as_u64(self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }

    /// Whether a decoded Unix-millisecond timestamp is believable for a
    /// Snowflake observed at `now_ms`: not before the epoch, not more than
    /// the future tolerance ahead.
    pub fn plausible_at(unix_ms: i64, now_ms: i64) -> bool {
        unix_ms >= SNOWFLAKE_EPOCH_MS && unix_ms <= now_ms + SNOWFLAKE_FUTURE_TOLERANCE_MS
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("machine_id", &self.machine_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
