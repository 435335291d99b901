use crate::descriptor::{FormatDescriptor, GenContext};
use crate::render;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::RngCore;
use uuid::{Builder, Context, Timestamp as UuidTimestamp, Uuid};

/// Offset between the Gregorian UUID epoch (1582-10-15) and the Unix
/// epoch, in 100 ns ticks.
const GREGORIAN_OFFSET_TICKS: i64 = 0x01B2_1DD2_1381_4000;

const NIL_STR: &str = "00000000-0000-0000-0000-000000000000";
const MAX_STR: &str = "ffffffff-ffff-ffff-ffff-ffffffffffff";

pub(crate) const NIL: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidNil,
    display_name: "Nil UUID",
    description: "The all-zero UUID defined by RFC 9562",
    category: Category::Uuid,
    tags: &["fixed"],
    example: NIL_STR,
    generate: generate_nil,
    matches: matches_nil,
    decode: decode_nil,
};

pub(crate) const MAX: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidMax,
    display_name: "Max UUID",
    description: "The all-one UUID defined by RFC 9562",
    category: Category::Uuid,
    tags: &["fixed"],
    example: MAX_STR,
    generate: generate_max,
    matches: matches_max,
    decode: decode_max,
};

pub(crate) const V1: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidV1,
    display_name: "UUID v1",
    description: "Gregorian time-based UUID with clock sequence and node",
    category: Category::Uuid,
    tags: &["time-based"],
    example: "c232ab00-9414-11ec-b3c8-9f6bdeced846",
    generate: generate_v1,
    matches: matches_v1,
    decode: decode_v1,
};

pub(crate) const V4: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidV4,
    display_name: "UUID v4",
    description: "Random UUID; 122 bits of entropy",
    category: Category::Uuid,
    tags: &["random"],
    example: "2ca4b2ce-6c13-40d4-bccf-37d222820f6f",
    generate: generate_v4,
    matches: matches_v4,
    decode: decode_v4,
};

pub(crate) const V5: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidV5,
    display_name: "UUID v5",
    description: "Name-based UUID derived from a namespace and a name",
    category: Category::Uuid,
    tags: &["deterministic", "name-based"],
    example: "886313e1-3b8a-5372-9b90-0c9aee199e5d",
    generate: generate_v5,
    matches: matches_v5,
    decode: decode_v5,
};

pub(crate) const V6: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidV6,
    display_name: "UUID v6",
    description: "Field-reordered v1 that sorts by creation time",
    category: Category::Uuid,
    tags: &["time-based", "sortable"],
    example: "1ec9414c-232a-6b00-b3c8-9f6bdeced846",
    generate: generate_v6,
    matches: matches_v6,
    decode: decode_v6,
};

pub(crate) const V7: FormatDescriptor = FormatDescriptor {
    id: FormatId::UuidV7,
    display_name: "UUID v7",
    description: "Unix-millisecond time-ordered UUID",
    category: Category::Uuid,
    tags: &["time-based", "sortable"],
    example: "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
    generate: generate_v7,
    matches: matches_v7,
    decode: decode_v7,
};

/// 8-4-4-4-12 hex groups, dashes at the canonical offsets.
fn is_canonical(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// The version nibble is the first hex digit of the third group.
fn has_version(s: &str, version: u8) -> bool {
    is_canonical(s) && s.as_bytes()[14].to_ascii_lowercase() == version
}

fn matches_nil(s: &str) -> bool {
    s.eq_ignore_ascii_case(NIL_STR)
}

fn matches_max(s: &str) -> bool {
    s.eq_ignore_ascii_case(MAX_STR)
}

fn matches_v1(s: &str) -> bool {
    has_version(s, b'1')
}

fn matches_v4(s: &str) -> bool {
    has_version(s, b'4')
}

fn matches_v5(s: &str) -> bool {
    has_version(s, b'5')
}

fn matches_v6(s: &str) -> bool {
    has_version(s, b'6')
}

fn matches_v7(s: &str) -> bool {
    has_version(s, b'7')
}

fn generate_nil(_params: &FormatParams, _ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    Ok(Uuid::nil().to_string())
}

fn generate_max(_params: &FormatParams, _ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    Ok(Uuid::max().to_string())
}

fn generate_v1(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let (ts, node) = gregorian_fields(ctx);
    Ok(Uuid::new_v1(ts, &node).to_string())
}

fn generate_v6(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let (ts, node) = gregorian_fields(ctx);
    Ok(Uuid::new_v6(ts, &node).to_string())
}

fn gregorian_fields(ctx: &mut GenContext<'_>) -> (UuidTimestamp, [u8; 6]) {
    let now = ctx.now();
    let seconds = now.as_second().max(0) as u64;
    let subsec = now.subsec_nanosecond().max(0) as u32;
    // A random node id; the multicast bit marks it as not a real MAC.
    let mut node = [0u8; 6];
    ctx.rng.fill_bytes(&mut node);
    node[0] |= 0x01;
    let clock_seq = (ctx.rng.next_u32() & 0x3FFF) as u16;
    let ts = UuidTimestamp::from_unix(Context::new(clock_seq), seconds, subsec);
    (ts, node)
}

fn generate_v4(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let mut bytes = [0u8; 16];
    ctx.rng.fill_bytes(&mut bytes);
    Ok(Builder::from_random_bytes(bytes).into_uuid().to_string())
}

fn generate_v5(params: &FormatParams, _ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let namespace = params.namespace.as_deref().ok_or_else(|| {
        GenError::invalid_params(FormatId::UuidV5, "namespace is required for the name-based format")
    })?;
    let namespace = Uuid::try_parse(namespace).map_err(|_| {
        GenError::invalid_params(
            FormatId::UuidV5,
            format!("namespace is not a valid UUID: '{namespace}'"),
        )
    })?;
    let name = params.name.as_deref().ok_or_else(|| {
        GenError::invalid_params(FormatId::UuidV5, "name is required for the name-based format")
    })?;
    Ok(Uuid::new_v5(&namespace, name.as_bytes()).to_string())
}

fn generate_v7(_params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let millis = ctx.now().as_millisecond().max(0) as u64;
    let mut tail = [0u8; 10];
    ctx.rng.fill_bytes(&mut tail);
    Ok(Builder::from_unix_timestamp_millis(millis, &tail)
        .into_uuid()
        .to_string())
}

struct Groups {
    time_low: u64,
    time_mid: u64,
    time_hi_and_version: u64,
    clock_seq: u64,
    node: String,
}

fn split_groups(s: &str) -> Result<Groups, DecodeError> {
    let mut parts = s.split('-');
    let mut next_hex = |bits: u32| -> Result<u64, DecodeError> {
        let part = parts
            .next()
            .ok_or_else(|| DecodeError::corrupt("missing UUID group"))?;
        let value = u64::from_str_radix(part, 16)
            .map_err(|_| DecodeError::corrupt(format!("'{part}' is not a hex group")))?;
        debug_assert!(value < (1 << bits));
        Ok(value)
    };
    let time_low = next_hex(32)?;
    let time_mid = next_hex(16)?;
    let time_hi_and_version = next_hex(16)?;
    let clock_seq = next_hex(16)?;
    let node = next_hex(48)?;
    Ok(Groups {
        time_low,
        time_mid,
        time_hi_and_version,
        clock_seq,
        node: format!("{node:012x}"),
    })
}

/// Variant classification from the top bits of the clock-seq octet.
fn variant_label(clock_seq: u64) -> &'static str {
    match clock_seq >> 12 {
        0x0..=0x7 => "NCS (reserved)",
        0x8..=0xB => "RFC 9562",
        0xC..=0xD => "Microsoft (reserved)",
        _ => "reserved (future)",
    }
}

fn base_properties(version: &str, groups: &Groups) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("version", version);
    props.insert("variant", variant_label(groups.clock_seq));
    props
}

/// Converts a 60-bit Gregorian tick count to Unix milliseconds.
fn gregorian_ticks_to_unix_ms(ticks: u64) -> i64 {
    (ticks as i64 - GREGORIAN_OFFSET_TICKS) / 10_000
}

fn decode_nil(_s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let mut props = PropertyMap::new();
    props.insert("version", "0");
    props.insert("note", "nil UUID; all 128 bits zero");
    Ok(props)
}

fn decode_max(_s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let mut props = PropertyMap::new();
    props.insert("version", "15");
    props.insert("note", "max UUID; all 128 bits one");
    Ok(props)
}

fn decode_v1(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let groups = split_groups(s)?;
    let ticks = ((groups.time_hi_and_version & 0x0FFF) << 48)
        | (groups.time_mid << 32)
        | groups.time_low;
    let mut props = base_properties("1", &groups);
    props.insert("timestamp", render::unix_ms(gregorian_ticks_to_unix_ms(ticks)));
    props.insert("clockSequence", (groups.clock_seq & 0x3FFF).to_string());
    props.insert("node", groups.node);
    Ok(props)
}

fn decode_v4(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let groups = split_groups(s)?;
    Ok(base_properties("4", &groups))
}

fn decode_v5(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let groups = split_groups(s)?;
    let mut props = base_properties("5", &groups);
    props.insert("note", "SHA-1 digest of namespace and name; inputs not recoverable");
    Ok(props)
}

fn decode_v6(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let groups = split_groups(s)?;
    let ticks = (groups.time_low << 28)
        | (groups.time_mid << 12)
        | (groups.time_hi_and_version & 0x0FFF);
    let mut props = base_properties("6", &groups);
    props.insert("timestamp", render::unix_ms(gregorian_ticks_to_unix_ms(ticks)));
    props.insert("clockSequence", (groups.clock_seq & 0x3FFF).to_string());
    props.insert("node", groups.node);
    Ok(props)
}

fn decode_v7(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let groups = split_groups(s)?;
    // First 48 bits are a big-endian Unix millisecond timestamp.
    let millis = ((groups.time_low << 16) | groups.time_mid) as i64;
    let mut props = base_properties("7", &groups);
    props.insert("timestamp", render::unix_ms(millis));
    Ok(props)
}
