use idforge_core::{ClassificationResult, Clock, DecodeError, PropertyMap, SystemClock};

/// Determines which format an input string is (if any) and decodes its
/// embedded fields. Never fails: uncertainty is expressed as
/// `detected_format = None` or an inline `error` property.
///
/// The clock exists solely for the flake plausibility windows; the result
/// is a pure function of `(input, clock.now())`.
pub fn classify_with(input: &str, clock: &dyn Clock) -> ClassificationResult {
    // Surrounding whitespace only; case and internal characters are
    // significant to the recognizers.
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ClassificationResult::unknown(trimmed);
    }
    let now = clock.now();
    for descriptor in idforge_registry::iter_by_priority() {
        if !(descriptor.matches)(trimmed) {
            continue;
        }
        match (descriptor.decode)(trimmed, now) {
            Ok(properties) => {
                tracing::debug!(format = %descriptor.id, "classified input");
                return ClassificationResult::detected(trimmed, descriptor.id, properties);
            }
            // The surface shape matched but the payload belongs to another
            // format; keep scanning lower-priority descriptors.
            Err(DecodeError::Inconclusive) => continue,
            Err(err) => {
                // Syntactically this kind of ID, semantically broken:
                // report the format with the failure inline.
                tracing::debug!(format = %descriptor.id, error = %err, "decode failed");
                let mut properties = PropertyMap::new();
                properties.insert("error", err.to_string());
                return ClassificationResult::detected(trimmed, descriptor.id, properties);
            }
        }
    }
    tracing::debug!("no format matched");
    ClassificationResult::unknown(trimmed)
}

/// [`classify_with`] against the system clock.
pub fn classify(input: &str) -> ClassificationResult {
    classify_with(input, &SystemClock)
}
