use crate::descriptor::{FormatDescriptor, GenContext};
use crate::formats::is_ascii_hex;
use crate::render;
use idforge_core::{Category, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::RngCore;

const COUNTER_MASK: u64 = (1 << 24) - 1;

pub(crate) const OBJECT_ID: FormatDescriptor = FormatDescriptor {
    id: FormatId::ObjectId,
    display_name: "ObjectId",
    description: "MongoDB 12-byte ID: second timestamp, machine, process, counter",
    category: Category::TimeSortable,
    tags: &["time-based", "sortable"],
    example: "507f1f77bcf86cd799439011",
    generate: generate,
    matches: matches,
    decode: decode,
};

fn matches(s: &str) -> bool {
    s.len() == 24 && is_ascii_hex(s)
}

fn generate(params: &FormatParams, ctx: &mut GenContext<'_>) -> Result<String, GenError> {
    let seconds = ctx.now().as_second().clamp(0, i64::from(u32::MAX)) as u32;
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());
    // Historical machine + process fields; random bytes in modern drivers.
    ctx.rng.fill_bytes(&mut bytes[4..9]);
    let base = params
        .sequence
        .unwrap_or_else(|| u64::from(ctx.rng.next_u32()));
    let counter = ((base + ctx.batch_index as u64) & COUNTER_MASK) as u32;
    bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
    Ok(hex::encode(bytes))
}

fn decode(s: &str, _now: Timestamp) -> Result<PropertyMap, DecodeError> {
    let bytes = hex::decode(s).map_err(|_| DecodeError::corrupt("not a hex string"))?;
    let seconds = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let machine = u32::from_be_bytes([0, bytes[4], bytes[5], bytes[6]]);
    let process = u16::from_be_bytes([bytes[7], bytes[8]]);
    let counter = u32::from_be_bytes([0, bytes[9], bytes[10], bytes[11]]);
    let mut props = PropertyMap::new();
    props.insert("timestamp", render::unix_s(i64::from(seconds)));
    props.insert("machineId", machine.to_string());
    props.insert("processId", process.to_string());
    props.insert("counter", counter.to_string());
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idforge_core::{Clock, FixedClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn recognizes_24_hex_chars_only() {
        assert!(matches("507f1f77bcf86cd799439011"));
        assert!(!matches("507f1f77bcf86cd79943901"));
        assert!(!matches("507f1f77bcf86cd79943901g"));
    }

    #[test]
    fn example_decodes_to_the_historical_layout() {
        let props = decode("507f1f77bcf86cd799439011", Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(props.get("timestamp"), Some("2012-10-17T21:13:27Z"));
        assert_eq!(props.get("machineId"), Some("12384364"));
        assert_eq!(props.get("processId"), Some("55193"));
        assert_eq!(props.get("counter"), Some("4427793"));
    }

    #[test]
    fn round_trips_second_and_counter() {
        let clock = FixedClock::new("2024-01-15T10:30:00Z".parse().unwrap());
        let mut rng = StdRng::seed_from_u64(4);
        let params = FormatParams::builder().sequence(99).build();
        let mut ctx = GenContext {
            clock: &clock,
            rng: &mut rng,
            batch_index: 2,
        };
        let id = generate(&params, &mut ctx).unwrap();
        assert!(matches(&id));
        let props = decode(&id, clock.now()).unwrap();
        assert_eq!(props.get("timestamp"), Some("2024-01-15T10:30:00Z"));
        assert_eq!(props.get("counter"), Some("101"));
    }
}
