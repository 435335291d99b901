use crate::descriptor::{FormatDescriptor, GenContext};
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::Rng;

const LENGTH: usize = 24;
const BASE36: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub(crate) const CUID2: FormatDescriptor = FormatDescriptor {
    id: FormatId::Cuid2,
    display_name: "CUID2",
    description: "Collision-resistant opaque identifier; lowercase letter followed by base36",
    category: Category::Random,
    tags: &["random", "opaque"],
    example: "tz4a98xxat96iws9zmbrgj3a",
    generate: generate,
    matches: matches,
    decode: decode,
};

fn matches(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == LENGTH
        && bytes[0].is_ascii_lowercase()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn generate(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let mut out = String::with_capacity(LENGTH);
    // First character is always a letter so the ID survives contexts that
    // reject leading digits (HTML ids, variable names).
    out.push((b'a' + ctx.rng.random_range(0..26u8)) as char);
    for _ in 1..LENGTH {
        out.push(BASE36[ctx.rng.random_range(0..BASE36.len())] as char);
    }
    Ok(out)
}

fn decode(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let mut props = PropertyMap::new();
    props.insert("length", s.len().to_string());
    props.insert("note", "opaque; no embedded fields");
    Ok(props)
}
