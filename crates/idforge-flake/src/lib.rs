//! Bit layouts for the 64-bit "flake" identifier formats.
//!
//! Snowflake and Sonyflake are plain 64-bit integers rendered as decimal
//! strings; nothing in the value tags which layout it uses. This crate
//! holds the two layouts, their epoch constants, and the timestamp
//! plausibility window used to disambiguate them.

mod snowflake;
mod sonyflake;

pub use snowflake::{
    SnowflakeId, MAX_SNOWFLAKE_MACHINE_ID, MAX_SNOWFLAKE_SEQUENCE, MAX_SNOWFLAKE_TIMESTAMP_MS,
    SNOWFLAKE_EPOCH_MS, SNOWFLAKE_FUTURE_TOLERANCE_MS,
};
pub use sonyflake::{
    SonyflakeId, MAX_SONYFLAKE_MACHINE_ID, MAX_SONYFLAKE_SEQUENCE, MAX_SONYFLAKE_TIMESTAMP_TICKS,
    SONYFLAKE_EPOCH_MS, SONYFLAKE_TICK_MS,
};
