use idforge_core::{Category, FormatId};
use serde::Serialize;

/// Descriptive listing entry for one format; feeds the UI selector.
#[derive(Debug, Clone, Serialize)]
pub struct FormatSummary {
    pub id: FormatId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub example: &'static str,
    pub tags: &'static [&'static str],
}

/// All supported formats in enum declaration order, which groups related
/// formats together for display.
pub fn list_formats() -> Vec<FormatSummary> {
    FormatId::ALL
        .iter()
        .map(|&id| {
            let descriptor = idforge_registry::get(id);
            FormatSummary {
                id: descriptor.id,
                display_name: descriptor.display_name,
                description: descriptor.description,
                category: descriptor.category,
                example: descriptor.example,
                tags: descriptor.tags,
            }
        })
        .collect()
}
