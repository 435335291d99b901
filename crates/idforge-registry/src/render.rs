use jiff::Timestamp;

// Decoded timestamps that fall outside jiff's representable range are
// rendered as a raw count instead of failing the whole decode.

pub(crate) fn unix_s(seconds: i64) -> String {
    Timestamp::from_second(seconds)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| format!("{seconds} s (out of range)"))
}

pub(crate) fn unix_ms(millis: i64) -> String {
    Timestamp::from_millisecond(millis)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| format!("{millis} ms (out of range)"))
}

pub(crate) fn unix_us(micros: i64) -> String {
    Timestamp::from_microsecond(micros)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| format!("{micros} us (out of range)"))
}

pub(crate) fn unix_ns(nanos: i128) -> String {
    Timestamp::from_nanosecond(nanos)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| format!("{nanos} ns (out of range)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_iso_8601_utc() {
        assert_eq!(unix_s(1_700_000_000), "2023-11-14T22:13:20Z");
        assert_eq!(unix_ms(1_469_922_850_259), "2016-07-30T23:54:10.259Z");
    }

    #[test]
    fn out_of_range_falls_back_to_raw_count() {
        let rendered = unix_ms(i64::MAX);
        assert!(rendered.contains("out of range"));
    }
}
