use crate::format::FormatId;
use crate::property::PropertyMap;
use serde::Serialize;

/// Outcome of classifying one input string.
///
/// `detected_format = None` means no registry entry matched; this is a
/// normal, common outcome for arbitrary input, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// The input as classified, after surrounding whitespace was trimmed.
    pub input: String,
    pub detected_format: Option<FormatId>,
    pub properties: PropertyMap,
}

impl ClassificationResult {
    /// The "nothing matched" outcome.
    pub fn unknown(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            detected_format: None,
            properties: PropertyMap::new(),
        }
    }

    pub fn detected(
        input: impl Into<String>,
        format: FormatId,
        properties: PropertyMap,
    ) -> Self {
        Self {
            input: input.into(),
            detected_format: Some(format),
            properties,
        }
    }
}
