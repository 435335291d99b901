use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of supported identifier formats.
///
/// Adding a format means adding one variant here and one descriptor to the
/// registry table; the registry asserts the two stay in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatId {
    UuidV1,
    UuidV4,
    UuidV5,
    UuidV6,
    UuidV7,
    UuidNil,
    UuidMax,
    Ulid,
    Ksuid,
    NanoId,
    NanoIdCustom,
    Cuid2,
    Snowflake,
    Sonyflake,
    Sqids,
    ShortUuid,
    UnixTimestampSeconds,
    UnixTimestampMillis,
    UnixTimestampMicros,
    UnixTimestampNanos,
    ObjectId,
    HexHash,
}

impl FormatId {
    /// Every format, in declaration order. The registry uses the length of
    /// this table as its exhaustiveness check.
    pub const ALL: [FormatId; 22] = [
        FormatId::UuidV1,
        FormatId::UuidV4,
        FormatId::UuidV5,
        FormatId::UuidV6,
        FormatId::UuidV7,
        FormatId::UuidNil,
        FormatId::UuidMax,
        FormatId::Ulid,
        FormatId::Ksuid,
        FormatId::NanoId,
        FormatId::NanoIdCustom,
        FormatId::Cuid2,
        FormatId::Snowflake,
        FormatId::Sonyflake,
        FormatId::Sqids,
        FormatId::ShortUuid,
        FormatId::UnixTimestampSeconds,
        FormatId::UnixTimestampMillis,
        FormatId::UnixTimestampMicros,
        FormatId::UnixTimestampNanos,
        FormatId::ObjectId,
        FormatId::HexHash,
    ];

    /// Stable kebab-case selector string, e.g. for UI query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatId::UuidV1 => "uuid-v1",
            FormatId::UuidV4 => "uuid-v4",
            FormatId::UuidV5 => "uuid-v5",
            FormatId::UuidV6 => "uuid-v6",
            FormatId::UuidV7 => "uuid-v7",
            FormatId::UuidNil => "uuid-nil",
            FormatId::UuidMax => "uuid-max",
            FormatId::Ulid => "ulid",
            FormatId::Ksuid => "ksuid",
            FormatId::NanoId => "nano-id",
            FormatId::NanoIdCustom => "nano-id-custom",
            FormatId::Cuid2 => "cuid2",
            FormatId::Snowflake => "snowflake",
            FormatId::Sonyflake => "sonyflake",
            FormatId::Sqids => "sqids",
            FormatId::ShortUuid => "short-uuid",
            FormatId::UnixTimestampSeconds => "unix-timestamp-seconds",
            FormatId::UnixTimestampMillis => "unix-timestamp-millis",
            FormatId::UnixTimestampMicros => "unix-timestamp-micros",
            FormatId::UnixTimestampNanos => "unix-timestamp-nanos",
            FormatId::ObjectId => "object-id",
            FormatId::HexHash => "hex-hash",
        }
    }
}

impl Display for FormatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown format selector: '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatId {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Informational grouping used by the UI format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Uuid,
    TimeSortable,
    Random,
    Numeric,
    Hash,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Uuid => "UUID",
            Category::TimeSortable => "Time-sortable",
            Category::Random => "Random",
            Category::Numeric => "Numeric",
            Category::Hash => "Hash",
        };
        f.write_str(label)
    }
}
