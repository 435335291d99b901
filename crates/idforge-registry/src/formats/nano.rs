use crate::descriptor::{FormatDescriptor, GenContext};
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::Rng;
use std::collections::BTreeSet;

const URL_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

const DEFAULT_LENGTH: usize = 21;
const MAX_LENGTH: usize = 255;

pub(crate) const NANO_ID: FormatDescriptor = FormatDescriptor {
    id: FormatId::NanoId,
    display_name: "Nano ID",
    description: "Compact random identifier over the URL-safe alphabet",
    category: Category::Random,
    tags: &["random"],
    example: "V1StGXR8_Z5jdHi6B-myT",
    generate: generate_standard,
    matches: matches_standard,
    decode: decode_standard,
};

pub(crate) const NANO_ID_CUSTOM: FormatDescriptor = FormatDescriptor {
    id: FormatId::NanoIdCustom,
    display_name: "Nano ID (custom alphabet)",
    description: "Nano ID over a caller-supplied alphabet and length",
    category: Category::Random,
    tags: &["random", "parameterized"],
    // Generation-only: a custom alphabet is not recoverable from the
    // string, so the recognizer always declines.
    example: "0110100110010110",
    generate: generate_custom,
    matches: matches_custom,
    decode: decode_custom,
};

fn matches_standard(s: &str) -> bool {
    // Lowercase words joined by dashes are indistinguishable from slugs
    // and prose; demanding one uppercase, digit, or underscore character
    // keeps those out while rejecting a vanishing fraction of real IDs.
    (10..=25).contains(&s.len())
        && s.bytes().all(|b| URL_ALPHABET.contains(&b))
        && s.bytes()
            .any(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

fn matches_custom(_s: &str) -> bool {
    false
}

fn draw<R: rand::RngCore + ?Sized>(rng: &mut R, alphabet: &[char], length: usize) -> String {
    let mut out = String::with_capacity(length);
    for _ in 0..length {
        out.push(alphabet[rng.random_range(0..alphabet.len())]);
    }
    out
}

fn generate_standard(params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let length = params.length.unwrap_or(DEFAULT_LENGTH);
    if length == 0 || length > MAX_LENGTH {
        return Err(GenError::invalid_params(
            FormatId::NanoId,
            format!("length must be 1..={MAX_LENGTH}, got {length}"),
        ));
    }
    let alphabet: Vec<char> = URL_ALPHABET.iter().map(|&b| b as char).collect();
    Ok(draw(&mut *ctx.rng, &alphabet, length))
}

fn generate_custom(params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let alphabet = params.alphabet.as_deref().ok_or_else(|| {
        GenError::invalid_params(FormatId::NanoIdCustom, "alphabet is required")
    })?;
    let chars: Vec<char> = alphabet.chars().collect();
    let distinct: BTreeSet<char> = chars.iter().copied().collect();
    if distinct.len() < 2 {
        return Err(GenError::invalid_params(
            FormatId::NanoIdCustom,
            "alphabet must contain at least two distinct characters",
        ));
    }
    let length = params.length.ok_or_else(|| {
        GenError::invalid_params(FormatId::NanoIdCustom, "length is required")
    })?;
    if length == 0 || length > MAX_LENGTH {
        return Err(GenError::invalid_params(
            FormatId::NanoIdCustom,
            format!("length must be 1..={MAX_LENGTH}, got {length}"),
        ));
    }
    Ok(draw(&mut *ctx.rng, &chars, length))
}

fn decode_standard(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let mut props = PropertyMap::new();
    props.insert("length", s.len().to_string());
    props.insert("alphabet", "URL-safe (A-Za-z0-9_-)");
    Ok(props)
}

fn decode_custom(_s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    Err(DecodeError::Inconclusive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::FixedClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_ctx<'a>(clock: &'a FixedClock, rng: &'a mut StdRng) -> GenContext<'a> {
        GenContext {
            clock,
            rng,
            batch_index: 0,
        }
    }

    fn fixed() -> FixedClock {
        FixedClock::new("2026-01-15T00:00:00Z".parse().unwrap())
    }

    #[test]
    fn standard_default_is_21_url_safe_chars() {
        let clock = fixed();
        let mut rng = StdRng::seed_from_u64(5);
        let id = generate_standard(&FormatParams::default(), &mut test_ctx(&clock, &mut rng))
            .unwrap();
        assert_eq!(id.len(), 21);
        assert!(matches_standard(&id));
    }

    #[test]
    fn zero_length_is_invalid_params() {
        let clock = fixed();
        let mut rng = StdRng::seed_from_u64(5);
        let params = FormatParams::builder().length(0).build();
        let err = generate_standard(&params, &mut test_ctx(&clock, &mut rng)).unwrap_err();
        assert!(matches!(err, GenError::InvalidParams { .. }));
    }

    #[test]
    fn custom_requires_two_distinct_alphabet_chars() {
        let clock = fixed();
        let mut rng = StdRng::seed_from_u64(5);
        let params = FormatParams::builder().alphabet("aaaa").length(8).build();
        let err = generate_custom(&params, &mut test_ctx(&clock, &mut rng)).unwrap_err();
        assert!(matches!(err, GenError::InvalidParams { .. }));
    }

    #[test]
    fn custom_draws_only_from_the_given_alphabet() {
        let clock = fixed();
        let mut rng = StdRng::seed_from_u64(5);
        let params = FormatParams::builder().alphabet("01").length(32).build();
        let id = generate_custom(&params, &mut test_ctx(&clock, &mut rng)).unwrap();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn standard_recognizer_bounds() {
        assert!(matches_standard("V1StGXR8_Z5jdHi6B-myT"));
        assert!(matches_standard("0123456789"));
        // Slug-shaped input is not claimed.
        assert!(!matches_standard("not-an-id-at-all"));
        assert!(!matches_standard("too-short"));
        assert!(!matches_standard("contains spaces here"));
    }

    #[test]
    fn custom_recognizer_always_declines() {
        assert!(!matches_custom("V1StGXR8_Z5jdHi6B-myT"));
        assert!(!matches_custom("0110100110010110"));
    }
}
