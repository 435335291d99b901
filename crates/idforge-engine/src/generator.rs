use idforge_core::{Clock, GenError, GenerationRequest, SystemClock};
use idforge_registry::GenContext;
use rand::RngCore;

/// Produces a batch of identifiers with caller-supplied clock and
/// randomness. Time-based formats read the clock once per identifier;
/// failures abort the whole batch.
pub fn generate_many_with(
    request: &GenerationRequest,
    clock: &dyn Clock,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>, GenError> {
    let count = request.clamped_count();
    if count != request.count {
        tracing::debug!(requested = request.count, clamped = count, "batch size clamped");
    }
    let descriptor = idforge_registry::get(request.format);
    let mut batch = Vec::with_capacity(count);
    for batch_index in 0..count {
        let mut ctx = GenContext {
            clock,
            rng: &mut *rng,
            batch_index,
        };
        batch.push((descriptor.generate)(&request.params, &mut ctx)?);
    }
    tracing::trace!(format = %request.format, count, "generated batch");
    Ok(batch)
}

/// Produces a batch of identifiers with the system clock and thread rng.
pub fn generate_many(request: &GenerationRequest) -> Result<Vec<String>, GenError> {
    generate_many_with(request, &SystemClock, &mut rand::rng())
}
