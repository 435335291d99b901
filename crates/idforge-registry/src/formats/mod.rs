//! One module per format family; each exposes `const` descriptors wired
//! into the registry table.

pub(crate) mod cuid2;
pub(crate) mod flake;
pub(crate) mod hex_hash;
pub(crate) mod ksuid;
pub(crate) mod nano;
pub(crate) mod object_id;
pub(crate) mod short_uuid;
pub(crate) mod sqids;
pub(crate) mod timestamp;
pub(crate) mod ulid;
pub(crate) mod uuid;

pub(crate) fn is_ascii_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

pub(crate) fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
