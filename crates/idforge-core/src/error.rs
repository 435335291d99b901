use crate::format::FormatId;
use thiserror::Error;

/// Errors returned by identifier generation.
///
/// Generation errors abort the whole batch; a partial batch is never
/// returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenError {
    /// Caller-supplied parameters are structurally invalid for the chosen
    /// format. Never silently substituted with defaults that would change
    /// the requested format's semantics.
    #[error("invalid parameters for {format}: {reason}")]
    InvalidParams { format: FormatId, reason: String },
    /// The format exists in the enum but has no generator wired. Guard
    /// against partial registries; unreachable in a complete build.
    #[error("no generator wired for {format}")]
    Unsupported { format: FormatId },
}

impl GenError {
    pub fn invalid_params(format: FormatId, reason: impl Into<String>) -> Self {
        GenError::InvalidParams {
            format,
            reason: reason.into(),
        }
    }
}

/// Errors returned by per-format decoders after the surface recognizer
/// already accepted the input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload fails a structural decode despite passing the surface
    /// check. Reported inline in `properties["error"]` with the detected
    /// format retained.
    #[error("corrupt payload: {0}")]
    Corrupt(String),
    /// The payload proves the input belongs to another format (e.g. a
    /// decoded timestamp outside the plausibility window). The classifier
    /// continues its priority scan instead of reporting this format.
    #[error("payload does not fit this format's layout")]
    Inconclusive,
}

impl DecodeError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        DecodeError::Corrupt(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_error_names_the_format() {
        let err = GenError::invalid_params(FormatId::UuidV5, "namespace is required");
        assert_eq!(
            err.to_string(),
            "invalid parameters for uuid-v5: namespace is required"
        );
    }

    #[test]
    fn corrupt_error_carries_the_reason() {
        let err = DecodeError::corrupt("value exceeds 160 bits");
        assert_eq!(err.to_string(), "corrupt payload: value exceeds 160 bits");
    }
}
