use idforge_core::{Category, Clock, DecodeError, FormatId, FormatParams, GenError, PropertyMap};
use jiff::Timestamp;
use rand::RngCore;

/// Capabilities handed to a generator function for one identifier.
///
/// The clock and rng are supplied by the caller of the engine, never read
/// from ambient state. `batch_index` is the zero-based position within the
/// current batch; counter-bearing formats add it to their sequence field so
/// identifiers generated in the same clock tick stay distinct.
pub struct GenContext<'a> {
    pub clock: &'a dyn Clock,
    pub rng: &'a mut dyn RngCore,
    pub batch_index: usize,
}

impl GenContext<'_> {
    /// Reads the injected clock. Time-based formats call this once per
    /// identifier.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

pub type GenerateFn = fn(&FormatParams, &mut GenContext<'_>) -> Result<String, GenError>;

/// Cheap structural recognizer; must be a pure function of the input only.
pub type MatchesFn = fn(&str) -> bool;

/// Field decoder, only called after `matches` succeeded. The [`Timestamp`]
/// argument is the classification instant; it exists solely for
/// plausibility-window checks and is ignored by every other decoder, so a
/// decode stays a pure function of `(input, now)`.
pub type DecodeFn = fn(&str, Timestamp) -> Result<PropertyMap, DecodeError>;

/// The bundle of generate/match/decode logic for one identifier format.
///
/// Immutable; one per [`FormatId`]. `example` is a literal sample used for
/// UI hints and the classifier exclusivity tests, never by the logic
/// itself.
pub struct FormatDescriptor {
    pub id: FormatId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub tags: &'static [&'static str],
    pub example: &'static str,
    pub generate: GenerateFn,
    pub matches: MatchesFn,
    pub decode: DecodeFn,
}
