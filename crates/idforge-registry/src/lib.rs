//! Format registry for the idforge identifier engine.
//!
//! One [`FormatDescriptor`] per supported format, each bundling a generator
//! function, a recognizer predicate, and a decoder. The registry is a
//! process-wide immutable table; classification walks it in a fixed
//! priority order.

mod base62;
mod descriptor;
mod formats;
mod registry;
mod render;

pub use descriptor::{DecodeFn, FormatDescriptor, GenContext, GenerateFn, MatchesFn};
pub use registry::{get, iter_by_priority};
