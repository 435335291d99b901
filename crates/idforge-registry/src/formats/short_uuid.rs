use crate::descriptor::{FormatDescriptor, GenContext};
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::RngCore;
use uuid::{Builder, Uuid};

/// Flickr base58: lowercase-first, no 0, I, O, or l.
const FLICKR_CHARS: &str = "123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// 16 bytes always fit in 22 base58 digits; short encodings are left-padded
/// with the zero digit '1'.
const PADDED_LEN: usize = 22;

pub(crate) const SHORT_UUID: FormatDescriptor = FormatDescriptor {
    id: FormatId::ShortUuid,
    display_name: "Short UUID",
    description: "UUID compressed to Flickr base58",
    category: Category::Random,
    tags: &["random", "compact"],
    example: "q85NENPQPB3mFKnYnZetXK",
    generate: generate,
    matches: matches,
    decode: decode,
};

fn matches(s: &str) -> bool {
    (21..=PADDED_LEN).contains(&s.len()) && s.chars().all(|c| FLICKR_CHARS.contains(c))
}

fn generate(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let mut bytes = [0u8; 16];
    ctx.rng.fill_bytes(&mut bytes);
    let id = Builder::from_random_bytes(bytes).into_uuid();
    let mut code = bs58::encode(id.as_bytes())
        .with_alphabet(bs58::Alphabet::FLICKR)
        .into_string();
    while code.len() < PADDED_LEN {
        code.insert(0, '1');
    }
    Ok(code)
}

fn decode(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let bytes = bs58::decode(s)
        .with_alphabet(bs58::Alphabet::FLICKR)
        .into_vec()
        .map_err(|_| DecodeError::Inconclusive)?;
    if bytes.len() > 16 {
        // Right alphabet, wrong magnitude; let looser formats claim it.
        return Err(DecodeError::Inconclusive);
    }
    let mut buf = [0u8; 16];
    buf[16 - bytes.len()..].copy_from_slice(&bytes);
    let id = Uuid::from_bytes(buf);
    let mut props = PropertyMap::new();
    props.insert("uuid", id.to_string());
    props.insert("version", id.get_version_num().to_string());
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::FixedClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn recognizes_flickr_base58_only() {
        assert!(matches("q85NENPQPB3mFKnYnZetXK"));
        // '0', 'I', 'O', 'l' are outside the alphabet.
        assert!(!matches("q85NENPQPB3mFKnYnZetX0"));
        assert!(!matches("q85NENPQPB3mFKnYnZetXKx1"));
    }

    #[test]
    fn example_expands_to_the_documented_uuid() {
        let props = decode("q85NENPQPB3mFKnYnZetXK", Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(
            props.get("uuid"),
            Some("c3587ec5-0976-497f-8374-61e0c2ea3da5")
        );
        assert_eq!(props.get("version"), Some("4"));
    }

    #[test]
    fn generated_codes_expand_back_to_a_v4_uuid() {
        let clock = FixedClock::new("2026-01-15T00:00:00Z".parse().unwrap());
        let mut rng = StdRng::seed_from_u64(12);
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 0,
        };
        let code = generate(&FormatParams::default(), &mut ctx).unwrap();
        assert_eq!(code.len(), PADDED_LEN);
        assert!(matches(&code));
        let props = decode(&code, Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(props.get("version"), Some("4"));
    }
}
