//! Companion metadata CSV pipeline contract
//!
//! Bulk import/export of structured metadata fields from tabular files is a
//! flat transform handled by an external collaborator; only its row schema
//! and batch-shaped contract live here. One row per `(entity_id, langcode)`
//! pair with a fixed column set.

use crate::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Fixed column schema: the header row of every metadata file.
pub const META_HEADER: [&str; 5] = ["entity_id", "langcode", "title", "description", "keywords"];

/// One metadata row for a `(entity, language)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFieldRow {
    pub entity_id: EntityId,
    pub langcode: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
}

impl MetaFieldRow {
    /// Parse one data line. Returns None for a line that does not carry
    /// exactly the fixed column count; bad rows are failure entries for the
    /// importer, never aborts.
    pub fn parse(line: &str) -> Option<Self> {
        let columns: Vec<&str> = line.split(',').collect();
        if columns.len() != META_HEADER.len() {
            return None;
        }
        Some(Self {
            entity_id: EntityId::new(columns[0].trim()),
            langcode: columns[1].trim().to_string(),
            title: columns[2].trim().to_string(),
            description: columns[3].trim().to_string(),
            keywords: columns[4].trim().to_string(),
        })
    }

    /// Render the row back into one data line.
    pub fn render(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.entity_id, self.langcode, self.title, self.description, self.keywords
        )
    }
}

/// Batch-shaped contract for the metadata import/export collaborator
///
/// Mirrors the sitemap batch: one operation per row, failures accumulate
/// without aborting, and a single finishing step reports the aggregate
/// outcome message.
pub trait MetaFieldPipeline {
    /// Apply one imported row to its entity translation. A row-level
    /// problem is reported as the returned message, not an abort.
    fn apply(&mut self, row: &MetaFieldRow) -> Result<(), String>;

    /// Export one row per entity for the given language.
    fn export(&self, langcode: &str) -> Vec<MetaFieldRow>;

    /// Finishing step, invoked exactly once after all rows; returns the
    /// operator-facing aggregate message.
    fn finish(&mut self, overall_success: bool) -> String;
}
