use crate::descriptor::{FormatDescriptor, GenContext};
use crate::formats::is_ascii_digits;
use crate::render;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use idforge_flake::{
    SnowflakeId, SonyflakeId, MAX_SNOWFLAKE_MACHINE_ID, MAX_SNOWFLAKE_SEQUENCE,
    MAX_SNOWFLAKE_TIMESTAMP_MS, MAX_SONYFLAKE_MACHINE_ID, MAX_SONYFLAKE_SEQUENCE,
    MAX_SONYFLAKE_TIMESTAMP_TICKS, SNOWFLAKE_EPOCH_MS, SONYFLAKE_EPOCH_MS, SONYFLAKE_TICK_MS,
};
use jiff::Timestamp;

const DEFAULT_MACHINE_ID: u64 = 1;

pub(crate) const SNOWFLAKE: FormatDescriptor = FormatDescriptor {
    id: FormatId::Snowflake,
    display_name: "Snowflake",
    description: "Twitter-style 64-bit ID: 41-bit millisecond timestamp, machine, sequence",
    category: Category::Numeric,
    tags: &["time-based", "sortable", "numeric"],
    example: "1541815603606036480",
    generate: generate_snowflake,
    matches: matches_flake,
    decode: decode_snowflake,
};

pub(crate) const SONYFLAKE: FormatDescriptor = FormatDescriptor {
    id: FormatId::Sonyflake,
    display_name: "Sonyflake",
    description: "Sony-style 64-bit ID: 39-bit 10 ms timestamp, sequence, machine",
    category: Category::Numeric,
    tags: &["time-based", "numeric", "heuristic"],
    example: "4818812140016566693",
    generate: generate_sonyflake,
    matches: matches_flake,
    decode: decode_sonyflake,
};

/// Both flake formats share one surface shape: a large decimal integer.
fn matches_flake(s: &str) -> bool {
    (17..=20).contains(&s.len()) && is_ascii_digits(s)
}

fn generate_snowflake(params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let now_ms = ctx.now().as_millisecond();
    let elapsed = now_ms - SNOWFLAKE_EPOCH_MS;
    if elapsed < 0 {
        return Err(GenError::invalid_params(
            FormatId::Snowflake,
            "clock is before the Snowflake epoch (2010-11-04)",
        ));
    }
    if elapsed as u64 > MAX_SNOWFLAKE_TIMESTAMP_MS {
        return Err(GenError::invalid_params(
            FormatId::Snowflake,
            "41-bit timestamp field exhausted",
        ));
    }
    let machine = params.machine_id.unwrap_or(DEFAULT_MACHINE_ID);
    if machine > MAX_SNOWFLAKE_MACHINE_ID {
        return Err(GenError::invalid_params(
            FormatId::Snowflake,
            format!("machine id must be 0..={MAX_SNOWFLAKE_MACHINE_ID}, got {machine}"),
        ));
    }
    // The batch index keeps IDs distinct when the clock doesn't move
    // between reads; the sequence wraps at its field width.
    let sequence =
        (params.sequence.unwrap_or(0) + ctx.batch_index as u64) & MAX_SNOWFLAKE_SEQUENCE;
    let id = SnowflakeId::new()
        .with_timestamp(elapsed as u64)
        .with_machine_id(machine as u16)
        .with_sequence(sequence as u16);
    Ok(id.as_u64().to_string())
}

/// Optimistic Snowflake decode, accepted only when the derived timestamp is
/// plausible at the classification instant. An implausible value falls
/// through to the Sonyflake descriptor.
fn decode_snowflake(s: &str, now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let value: u64 = s.parse().map_err(|_| DecodeError::Inconclusive)?;
    if value > i64::MAX as u64 {
        return Err(DecodeError::Inconclusive);
    }
    let id = SnowflakeId::from_u64(value);
    let unix_ms = SNOWFLAKE_EPOCH_MS + id.timestamp() as i64;
    if !SnowflakeId::plausible_at(unix_ms, now.as_millisecond()) {
        return Err(DecodeError::Inconclusive);
    }
    let mut props = PropertyMap::new();
    props.insert("timestamp", render::unix_ms(unix_ms));
    props.insert("machineId", id.machine_id().to_string());
    props.insert("sequence", id.sequence().to_string());
    Ok(props)
}

fn generate_sonyflake(params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let now_ms = ctx.now().as_millisecond();
    let elapsed_ticks = (now_ms - SONYFLAKE_EPOCH_MS) / SONYFLAKE_TICK_MS;
    if elapsed_ticks < 0 {
        return Err(GenError::invalid_params(
            FormatId::Sonyflake,
            "clock is before the Sonyflake epoch (2014-09-01)",
        ));
    }
    if elapsed_ticks as u64 > MAX_SONYFLAKE_TIMESTAMP_TICKS {
        return Err(GenError::invalid_params(
            FormatId::Sonyflake,
            "39-bit timestamp field exhausted",
        ));
    }
    let machine = params.machine_id.unwrap_or(DEFAULT_MACHINE_ID);
    if machine > MAX_SONYFLAKE_MACHINE_ID {
        return Err(GenError::invalid_params(
            FormatId::Sonyflake,
            format!("machine id must be 0..={MAX_SONYFLAKE_MACHINE_ID}, got {machine}"),
        ));
    }
    let sequence =
        (params.sequence.unwrap_or(0) + ctx.batch_index as u64) & MAX_SONYFLAKE_SEQUENCE;
    let id = SonyflakeId::new()
        .with_timestamp(elapsed_ticks as u64)
        .with_sequence(sequence as u8)
        .with_machine_id(machine as u16);
    Ok(id.as_u64().to_string())
}

/// Reached only after the Snowflake window check declined. With no
/// self-describing tag in the value this stays a best-effort label; fields
/// are deliberately not decoded.
fn decode_sonyflake(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let _value: u64 = s.parse().map_err(|_| DecodeError::Inconclusive)?;
    let mut props = PropertyMap::new();
    props.insert("confidence", "probable");
    props.insert("note", "Sonyflake-shaped 64-bit integer; layout not verifiable");
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::{Clock, FixedClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clock_2026() -> FixedClock {
        FixedClock::new("2026-01-15T00:00:00Z".parse().unwrap())
    }

    #[test]
    fn known_tweet_id_decodes() {
        let props = decode_snowflake("1541815603606036480", clock_2026().now()).unwrap();
        assert_eq!(props.get("timestamp"), Some("2022-06-28T14:24:45.448Z"));
        assert_eq!(props.get("machineId"), Some("378"));
        assert_eq!(props.get("sequence"), Some("0"));
    }

    #[test]
    fn implausible_timestamp_is_inconclusive() {
        // Snowflake-decoding the Sonyflake example lands in 2047.
        let err = decode_snowflake("4818812140016566693", clock_2026().now()).unwrap_err();
        assert_eq!(err, DecodeError::Inconclusive);
    }

    #[test]
    fn snowflake_round_trips_fields_through_the_decimal_rendering() {
        let clock = clock_2026();
        let mut rng = StdRng::seed_from_u64(2);
        let params = FormatParams::builder().machine_id(378).sequence(7).build();
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        let id = generate_snowflake(&params, &mut ctx).unwrap();
        assert!(matches_flake(&id));
        let props = decode_snowflake(&id, clock.now()).unwrap();
        assert_eq!(props.get("timestamp"), Some("2026-01-15T00:00:00Z"));
        assert_eq!(props.get("machineId"), Some("378"));
        assert_eq!(props.get("sequence"), Some("7"));
    }

    #[test]
    fn batch_index_advances_the_sequence() {
        let clock = clock_2026();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 3,
        };
        let id = generate_snowflake(&FormatParams::default(), &mut ctx).unwrap();
        let props = decode_snowflake(&id, clock.now()).unwrap();
        assert_eq!(props.get("sequence"), Some("3"));
    }

    #[test]
    fn oversized_machine_id_is_invalid_params() {
        let clock = clock_2026();
        let mut rng = StdRng::seed_from_u64(2);
        let params = FormatParams::builder().machine_id(1024).build();
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        let err = generate_snowflake(&params, &mut ctx).unwrap_err();
        assert!(matches!(err, GenError::InvalidParams { .. }));
    }

    #[test]
    fn sonyflake_reports_probable_without_fields() {
        let props = decode_sonyflake("4818812140016566693", clock_2026().now()).unwrap();
        assert_eq!(props.get("confidence"), Some("probable"));
        assert_eq!(props.get("timestamp"), None);
    }

    #[test]
    fn sonyflake_generation_fits_the_bit_layout() {
        let clock = clock_2026();
        let mut rng = StdRng::seed_from_u64(2);
        let params = FormatParams::builder().machine_id(513).build();
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        let id: u64 = generate_sonyflake(&params, &mut ctx).unwrap().parse().unwrap();
        let decoded = SonyflakeId::from_u64(id);
        assert_eq!(decoded.machine_id(), 513);
        let expected_ticks = (clock.now().as_millisecond() - SONYFLAKE_EPOCH_MS) / SONYFLAKE_TICK_MS;
        assert_eq!(decoded.timestamp(), expected_ticks as u64);
    }
}
