use crate::descriptor::{FormatDescriptor, GenContext};
use crate::render;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::RngCore;
use ulid::Ulid;

/// Crockford base32: no I, L, O, U.
const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const ULID_LEN: usize = 26;

pub(crate) const ULID: FormatDescriptor = FormatDescriptor {
    id: FormatId::Ulid,
    display_name: "ULID",
    description: "Lexicographically sortable: 48-bit millisecond timestamp plus 80 random bits",
    category: Category::TimeSortable,
    tags: &["time-based", "sortable", "random"],
    example: "01ARZ3NDEKTSV4RRFFQ69G5FAV",
    generate: generate,
    matches: matches,
    decode: decode,
};

fn is_crockford(b: u8) -> bool {
    CROCKFORD.contains(&b.to_ascii_uppercase())
}

fn matches(s: &str) -> bool {
    let bytes = s.as_bytes();
    // A leading character above '7' would overflow the 48-bit timestamp.
    bytes.len() == ULID_LEN
        && bytes.iter().copied().all(is_crockford)
        && matches!(bytes[0].to_ascii_uppercase(), b'0'..=b'7')
}

fn generate(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let millis = ctx.now().as_millisecond().max(0) as u64;
    let mut entropy = [0u8; 16];
    ctx.rng.fill_bytes(&mut entropy);
    // from_parts keeps the low 80 bits of the random half.
    Ok(Ulid::from_parts(millis, u128::from_le_bytes(entropy)).to_string())
}

fn decode(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    // Crockford is case-insensitive; canonicalize before parsing.
    let canonical = s.to_ascii_uppercase();
    let ulid = Ulid::from_string(&canonical)
        .map_err(|_| DecodeError::corrupt("not a valid Crockford base32 payload"))?;
    let mut props = PropertyMap::new();
    props.insert("timestamp", render::unix_ms(ulid.timestamp_ms() as i64));
    props.insert("randomness", format!("{:020x}", ulid.random()));
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::{Clock, FixedClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn recognizes_the_canonical_shape() {
        assert!(matches("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert!(matches("01arz3ndektsv4rrffq69g5fav"));
        // 'U' is outside the Crockford alphabet.
        assert!(!matches("01ARZ3NDEKTSV4RRFFQ69G5FAU"));
        // Leading '8' overflows the timestamp field.
        assert!(!matches("81ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert!(!matches("01ARZ3NDEKTSV4RRFFQ69G5FA"));
    }

    #[test]
    fn example_decodes_to_the_documented_instant() {
        let props = decode("01ARZ3NDEKTSV4RRFFQ69G5FAV", Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(props.get("timestamp"), Some("2016-07-30T23:54:10.259Z"));
        assert_eq!(props.get("randomness"), Some("d6764c61efb99302bd5b"));
    }

    #[test]
    fn round_trips_the_injected_millisecond() {
        let clock = FixedClock::new("2024-01-15T10:30:00.123Z".parse().unwrap());
        let mut rng = StdRng::seed_from_u64(42);
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        let id = generate(&FormatParams::default(), &mut ctx).unwrap();
        assert!(matches(&id));
        let props = decode(&id, clock.now()).unwrap();
        assert_eq!(props.get("timestamp"), Some("2024-01-15T10:30:00.123Z"));
    }
}
