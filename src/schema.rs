//! Field schema access and traversal classification
//!
//! The schema accessor answers "which user-configured fields does this
//! `(entity_type, bundle)` pair carry" as a pure lookup. Classification maps
//! each declared field type to a traversal action as a closed enum so the
//! compiler enforces exhaustive handling of new field kinds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared field types the pipeline recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Image,
    EntityReference,
    EntityReferenceRevisions,
    BlockField,
    /// Any other declared type (text, metatag, ...); never traversed.
    Other,
}

/// Schema metadata for one field of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new<S: Into<String>>(name: S, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Traversal action for one field
///
/// `file` entities are not classified here: they are an entity-type terminal
/// handled by the traversal engine before any field is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Recurse into every entity referenced by the field value
    FollowReference,
    /// Resolve embedded block references, then recurse into their entities
    FollowBlock,
    /// Skip the field
    Ignore,
}

/// Classify a declared field type into its traversal action.
pub fn classify(field_type: FieldType) -> FieldAction {
    match field_type {
        FieldType::Image | FieldType::EntityReference | FieldType::EntityReferenceRevisions => {
            FieldAction::FollowReference
        }
        FieldType::BlockField => FieldAction::FollowBlock,
        FieldType::Other => FieldAction::Ignore,
    }
}

/// Access to user-configured field descriptors per `(entity_type, bundle)`
///
/// An unknown bundle yields an empty slice; traversal treats "no fields" as
/// a normal leaf condition, not a failure.
pub trait SchemaAccessor {
    fn fields_of(&self, entity_type: &str, bundle: &str) -> &[FieldDescriptor];
}

/// In-memory schema accessor backed by a plain map
#[derive(Debug, Clone, Default)]
pub struct SchemaMap {
    fields: HashMap<(String, String), Vec<FieldDescriptor>>,
}

impl SchemaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the configured fields for one `(entity_type, bundle)` pair,
    /// in declaration order.
    pub fn insert<S: Into<String>>(
        &mut self,
        entity_type: S,
        bundle: S,
        descriptors: Vec<FieldDescriptor>,
    ) {
        self.fields
            .insert((entity_type.into(), bundle.into()), descriptors);
    }
}

impl SchemaAccessor for SchemaMap {
    fn fields_of(&self, entity_type: &str, bundle: &str) -> &[FieldDescriptor] {
        self.fields
            .get(&(entity_type.to_string(), bundle.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
