use modular_bitfield::prelude::*;
use std::fmt;

/// Zero point of the 39-bit timestamp field: 2014-09-01T00:00:00Z.
pub const SONYFLAKE_EPOCH_MS: i64 = 1_409_529_600_000;

/// Sonyflake counts time in 10 ms ticks, trading resolution for a longer
/// usable lifetime in 39 bits.
pub const SONYFLAKE_TICK_MS: i64 = 10;

pub const MAX_SONYFLAKE_TIMESTAMP_TICKS: u64 = (1 << 39) - 1;
pub const MAX_SONYFLAKE_SEQUENCE: u64 = (1 << 8) - 1;
pub const MAX_SONYFLAKE_MACHINE_ID: u64 = (1 << 16) - 1;

/// Sonyflake layout, least significant field first.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SonyflakeId {
    /// 16 bits for the machine id.
    pub machine_id: B16,
    /// 8 bits for the per-tick sequence number.
    pub sequence: B8,
    /// 39 bits for 10 ms ticks since [`SONYFLAKE_EPOCH_MS`].
    pub timestamp: B39,
    /// The sign bit; always zero.
    pub sign: B1,
}

impl SonyflakeId {
    pub fn as_u64(self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl fmt::Debug for SonyflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SonyflakeId")
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .field("machine_id", &self.machine_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_land_in_the_documented_bit_positions() {
        let id = SonyflakeId::new()
            .with_timestamp(0x12_3456_789A)
            .with_sequence(0x5C)
            .with_machine_id(0xBEEF);
        let expected = (0x12_3456_789A_u64 << 24) | (0x5C << 16) | 0xBEEF;
        assert_eq!(id.as_u64(), expected);
    }

    #[test]
    fn u64_round_trip_preserves_fields() {
        let id = SonyflakeId::new()
            .with_timestamp(MAX_SONYFLAKE_TIMESTAMP_TICKS)
            .with_sequence(9)
            .with_machine_id(513);
        let back = SonyflakeId::from_u64(id.as_u64());
        assert_eq!(back.timestamp(), MAX_SONYFLAKE_TIMESTAMP_TICKS);
        assert_eq!(back.sequence(), 9);
        assert_eq!(back.machine_id(), 513);
    }
}
