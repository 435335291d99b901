//! Public entry points of the idforge identifier engine.
//!
//! This crate is the surface consumed by the presentation layer: batch
//! generation, classification, and the format listing for selector UIs.
//! Core types are re-exported from `idforge_core`.

mod classifier;
mod generator;
mod summary;

pub use classifier::{classify, classify_with};
pub use generator::{generate_many, generate_many_with};
pub use summary::{list_formats, FormatSummary};

pub use idforge_core::{
    Category, ClassificationResult, Clock, DecodeError, FixedClock, FormatId, FormatParams,
    GenError, GenerationRequest, PropertyMap, SystemClock, MAX_COUNT, MIN_COUNT,
};
