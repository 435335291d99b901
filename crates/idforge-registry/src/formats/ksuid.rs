use crate::base62;
use crate::descriptor::{FormatDescriptor, GenContext};
use crate::render;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::RngCore;

/// KSUID counts seconds from 2014-05-13T16:53:20Z, gaining roughly a
/// century of headroom over a Unix u32 timestamp.
const KSUID_EPOCH_S: i64 = 1_400_000_000;

pub(crate) const KSUID: FormatDescriptor = FormatDescriptor {
    id: FormatId::Ksuid,
    display_name: "KSUID",
    description: "K-sortable: 32-bit second timestamp plus 128-bit payload, base62",
    category: Category::TimeSortable,
    tags: &["time-based", "sortable", "random"],
    example: "0ujtsYcgvSTl8PAuAdqWYSMnLOv",
    generate: generate,
    matches: matches,
    decode: decode,
};

fn matches(s: &str) -> bool {
    s.len() == base62::ENCODED_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn generate(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let seconds = ctx.now().as_second();
    let raw = (seconds - KSUID_EPOCH_S).clamp(0, i64::from(u32::MAX)) as u32;
    let mut body = [0u8; 20];
    body[..4].copy_from_slice(&raw.to_be_bytes());
    ctx.rng.fill_bytes(&mut body[4..]);
    Ok(base62::encode_fixed(&body))
}

fn decode(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let body = base62::decode_fixed(s)?;
    let raw = u32::from_be_bytes([body[0], body[1], body[2], body[3]]);
    let mut props = PropertyMap::new();
    props.insert("timestamp", render::unix_s(i64::from(raw) + KSUID_EPOCH_S));
    props.insert("payload", hex::encode(&body[4..]));
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::{Clock, FixedClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn recognizes_27_char_base62() {
        assert!(matches("0ujtsYcgvSTl8PAuAdqWYSMnLOv"));
        assert!(!matches("0ujtsYcgvSTl8PAuAdqWYSMnLO"));
        assert!(!matches("0ujtsYcgvSTl8PAuAdqWYSMnLO!"));
    }

    #[test]
    fn example_decodes_to_the_documented_fields() {
        let props = decode("0ujtsYcgvSTl8PAuAdqWYSMnLOv", Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(props.get("timestamp"), Some("2017-10-10T04:00:47Z"));
        assert_eq!(
            props.get("payload"),
            Some("b5a1cd34b5f99d1154fb6853345c9735")
        );
    }

    #[test]
    fn round_trips_the_injected_second() {
        let clock = FixedClock::new("2024-01-15T10:30:00Z".parse().unwrap());
        let mut rng = StdRng::seed_from_u64(9);
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        let id = generate(&FormatParams::default(), &mut ctx).unwrap();
        assert!(matches(&id));
        let props = decode(&id, clock.now()).unwrap();
        assert_eq!(props.get("timestamp"), Some("2024-01-15T10:30:00Z"));
    }

    #[test]
    fn overflowing_payload_reports_corrupt() {
        let err = decode(&"z".repeat(27), Timestamp::UNIX_EPOCH).unwrap_err();
        assert!(matches!(err, DecodeError::Corrupt(_)));
    }
}
