use crate::descriptor::{FormatDescriptor, GenContext};
use crate::formats::is_ascii_digits;
use crate::render;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;

// Digit count selects the unit: 10 digits read as seconds, 13 as
// milliseconds, 16 as microseconds. 19-digit nanoseconds are only claimed
// inside a 2001-2100 plausibility window, and only after the Snowflake
// window check has declined the value (registry priority order).
const NANOS_MIN: u64 = 1_000_000_000_000_000_000;
const NANOS_MAX: u64 = 4_102_444_800_000_000_000;

pub(crate) const SECONDS: FormatDescriptor = FormatDescriptor {
    id: FormatId::UnixTimestampSeconds,
    display_name: "Unix timestamp (seconds)",
    description: "Seconds since the Unix epoch, rendered as a 10-digit decimal",
    category: Category::Numeric,
    tags: &["time-based", "numeric"],
    example: "1700000000",
    generate: generate_seconds,
    matches: matches_seconds,
    decode: decode_seconds,
};

pub(crate) const MILLIS: FormatDescriptor = FormatDescriptor {
    id: FormatId::UnixTimestampMillis,
    display_name: "Unix timestamp (milliseconds)",
    description: "Milliseconds since the Unix epoch, rendered as a 13-digit decimal",
    category: Category::Numeric,
    tags: &["time-based", "numeric"],
    example: "1700000000000",
    generate: generate_millis,
    matches: matches_millis,
    decode: decode_millis,
};

pub(crate) const MICROS: FormatDescriptor = FormatDescriptor {
    id: FormatId::UnixTimestampMicros,
    display_name: "Unix timestamp (microseconds)",
    description: "Microseconds since the Unix epoch, rendered as a 16-digit decimal",
    category: Category::Numeric,
    tags: &["time-based", "numeric"],
    example: "1700000000000000",
    generate: generate_micros,
    matches: matches_micros,
    decode: decode_micros,
};

pub(crate) const NANOS: FormatDescriptor = FormatDescriptor {
    id: FormatId::UnixTimestampNanos,
    display_name: "Unix timestamp (nanoseconds)",
    description: "Nanoseconds since the Unix epoch, rendered as a 19-digit decimal",
    category: Category::Numeric,
    tags: &["time-based", "numeric", "heuristic"],
    example: "3141592653589793238",
    generate: generate_nanos,
    matches: matches_nanos,
    decode: decode_nanos,
};

fn matches_seconds(s: &str) -> bool {
    s.len() == 10 && is_ascii_digits(s)
}

fn matches_millis(s: &str) -> bool {
    s.len() == 13 && is_ascii_digits(s)
}

fn matches_micros(s: &str) -> bool {
    s.len() == 16 && is_ascii_digits(s)
}

fn matches_nanos(s: &str) -> bool {
    if s.len() != 19 || !is_ascii_digits(s) {
        return false;
    }
    s.parse::<u64>()
        .is_ok_and(|v| (NANOS_MIN..=NANOS_MAX).contains(&v))
}

fn generate_seconds(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    Ok(ctx.now().as_second().to_string())
}

fn generate_millis(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    Ok(ctx.now().as_millisecond().to_string())
}

fn generate_micros(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    Ok(ctx.now().as_microsecond().to_string())
}

fn generate_nanos(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    Ok(ctx.now().as_nanosecond().to_string())
}

fn decode_seconds(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let value: i64 = s.parse().map_err(|_| DecodeError::corrupt("not a decimal"))?;
    Ok(unit_properties("seconds", render::unix_s(value)))
}

fn decode_millis(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let value: i64 = s.parse().map_err(|_| DecodeError::corrupt("not a decimal"))?;
    Ok(unit_properties("milliseconds", render::unix_ms(value)))
}

fn decode_micros(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let value: i64 = s.parse().map_err(|_| DecodeError::corrupt("not a decimal"))?;
    Ok(unit_properties("microseconds", render::unix_us(value)))
}

fn decode_nanos(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let value: i128 = s.parse().map_err(|_| DecodeError::corrupt("not a decimal"))?;
    Ok(unit_properties("nanoseconds", render::unix_ns(value)))
}

fn unit_properties(unit: &str, rendered: String) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("unit", unit);
    props.insert("timestamp", rendered);
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::FixedClock;

    #[test]
    fn digit_count_selects_the_unit() {
        assert!(matches_seconds("1700000000"));
        assert!(!matches_seconds("170000000"));
        assert!(matches_millis("1700000000000"));
        assert!(matches_micros("1700000000000000"));
        assert!(!matches_millis("1700000000"));
    }

    #[test]
    fn decoded_units_agree_on_the_instant() {
        let now = Timestamp::UNIX_EPOCH;
        for (decode, input) in [
            (decode_seconds as crate::descriptor::DecodeFn, "1700000000"),
            (decode_millis, "1700000000000"),
            (decode_micros, "1700000000000000"),
        ] {
            let props = decode(input, now).unwrap();
            assert_eq!(props.get("timestamp"), Some("2023-11-14T22:13:20Z"));
        }
    }

    #[test]
    fn nanos_window_bounds() {
        assert!(matches_nanos("3141592653589793238"));
        assert!(matches_nanos("1000000000000000000"));
        // Below the 2001 floor.
        assert!(!matches_nanos("0999999999999999999"));
        // Above the 2100 ceiling.
        assert!(!matches_nanos("4102444800000000001"));
    }

    #[test]
    fn generation_reads_the_injected_clock() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        let clock = FixedClock::new("2023-11-14T22:13:20Z".parse().unwrap());
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        assert_eq!(
            generate_seconds(&FormatParams::default(), &mut ctx).unwrap(),
            "1700000000"
        );
        assert_eq!(
            generate_millis(&FormatParams::default(), &mut ctx).unwrap(),
            "1700000000000"
        );
        assert_eq!(
            generate_nanos(&FormatParams::default(), &mut ctx).unwrap(),
            "1700000000000000000"
        );
    }
}
