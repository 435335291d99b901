use crate::format::FormatId;
use typed_builder::TypedBuilder;

/// Lower bound applied to [`GenerationRequest::count`].
pub const MIN_COUNT: usize = 1;
/// Upper bound applied to [`GenerationRequest::count`]; keeps a single UI
/// call from producing unbounded batches.
pub const MAX_COUNT: usize = 100;

/// Optional per-format generation knobs.
///
/// Each format reads only the fields it documents; unrelated fields are
/// ignored. All fields default to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct FormatParams {
    /// Namespace UUID for name-based UUIDv5. Required for that format.
    #[builder(default, setter(strip_option, into))]
    pub namespace: Option<String>,
    /// Name input for name-based UUIDv5. Required for that format.
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    /// Alphabet for the custom Nano ID variant; must contain at least two
    /// distinct characters.
    #[builder(default, setter(strip_option, into))]
    pub alphabet: Option<String>,
    /// Output length for Nano ID variants.
    #[builder(default, setter(strip_option))]
    pub length: Option<usize>,
    /// Machine/node field for the flake formats.
    #[builder(default, setter(strip_option))]
    pub machine_id: Option<u64>,
    /// Starting sequence/counter for the flake formats and ObjectId; the
    /// batch index is added on top so identifiers within one batch differ.
    #[builder(default, setter(strip_option))]
    pub sequence: Option<u64>,
    /// Numbers encoded into a Sqids identifier.
    #[builder(default, setter(strip_option))]
    pub numbers: Option<Vec<u64>>,
    /// Hex-character length for the hex hash format, `32..=64`.
    #[builder(default, setter(strip_option))]
    pub hash_length: Option<usize>,
}

/// One generation call: which format, how many, and with which knobs.
#[derive(Debug, Clone, TypedBuilder)]
pub struct GenerationRequest {
    pub format: FormatId,
    /// Requested batch size. Out-of-range values are clamped to
    /// `MIN_COUNT..=MAX_COUNT` at the engine boundary, not rejected.
    #[builder(default = 1)]
    pub count: usize,
    #[builder(default)]
    pub params: FormatParams,
}

impl GenerationRequest {
    /// The batch size the engine will actually produce.
    pub fn clamped_count(&self) -> usize {
        self.count.clamp(MIN_COUNT, MAX_COUNT)
    }
}
