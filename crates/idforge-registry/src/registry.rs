use crate::descriptor::FormatDescriptor;
use crate::formats;
use idforge_core::FormatId;

/// The classification priority order. This order is part of the contract:
/// strongly-anchored shapes (exact strings, fixed-length fixed-alphabet
/// formats) come before loosely-constrained ones, so a loose predicate
/// cannot swallow input that a more specific format owns. Within the
/// numeric family, digit count picks the decimal timestamp units and the
/// Snowflake plausibility window runs before the nanosecond and Sonyflake
/// fallbacks.
// Enum and table must not drift: the array length is the enum cardinality,
// so a missing or extra entry fails to compile.
static DESCRIPTORS: [FormatDescriptor; FormatId::ALL.len()] = [
    formats::uuid::NIL,
    formats::uuid::MAX,
    formats::uuid::V1,
    formats::uuid::V4,
    formats::uuid::V5,
    formats::uuid::V6,
    formats::uuid::V7,
    formats::ulid::ULID,
    formats::ksuid::KSUID,
    formats::object_id::OBJECT_ID,
    formats::hex_hash::HEX_HASH,
    formats::cuid2::CUID2,
    formats::timestamp::SECONDS,
    formats::timestamp::MILLIS,
    formats::timestamp::MICROS,
    formats::flake::SNOWFLAKE,
    formats::timestamp::NANOS,
    formats::flake::SONYFLAKE,
    formats::short_uuid::SHORT_UUID,
    formats::nano::NANO_ID,
    formats::sqids::SQIDS,
    formats::nano::NANO_ID_CUSTOM,
];

/// Looks up the descriptor for a format. Total: every `FormatId` has
/// exactly one entry, enforced by the checks below.
pub fn get(id: FormatId) -> &'static FormatDescriptor {
    DESCRIPTORS
        .iter()
        .find(|descriptor| descriptor.id == id)
        .expect("registry table covers every FormatId")
}

/// Descriptors in classification priority order.
pub fn iter_by_priority() -> impl Iterator<Item = &'static FormatDescriptor> {
    DESCRIPTORS.iter()
}
