use crate::descriptor::{FormatDescriptor, GenContext};
use crate::formats::is_ascii_hex;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::Rng;

const MIN_LENGTH: usize = 32;
const MAX_LENGTH: usize = 64;
const DEFAULT_LENGTH: usize = 64;
const HEX: &[u8; 16] = b"0123456789abcdef";

pub(crate) const HEX_HASH: FormatDescriptor = FormatDescriptor {
    id: FormatId::HexHash,
    display_name: "Hex hash",
    description: "Digest-shaped hex string, 32-64 characters",
    category: Category::Hash,
    tags: &["random"],
    example: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    generate: generate,
    matches: matches,
    decode: decode,
};

fn matches(s: &str) -> bool {
    (MIN_LENGTH..=MAX_LENGTH).contains(&s.len()) && is_ascii_hex(s)
}

fn generate(params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let length = params.hash_length.unwrap_or(DEFAULT_LENGTH);
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(GenError::invalid_params(
            FormatId::HexHash,
            format!("hash length must be {MIN_LENGTH}..={MAX_LENGTH}, got {length}"),
        ));
    }
    let mut out = String::with_capacity(length);
    for _ in 0..length {
        out.push(HEX[ctx.rng.random_range(0..16)] as char);
    }
    Ok(out)
}

fn decode(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let mut props = PropertyMap::new();
    props.insert("length", s.len().to_string());
    props.insert("bits", (s.len() * 4).to_string());
    if let Some(candidates) = digest_candidates(s.len()) {
        props.insert("candidates", candidates);
    }
    Ok(props)
}

fn digest_candidates(length: usize) -> Option<&'static str> {
    match length {
        32 => Some("MD5"),
        40 => Some("SHA-1"),
        56 => Some("SHA-224"),
        64 => Some("SHA-256, BLAKE2s"),
        _ => None,
    }
}
