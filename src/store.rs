//! Entity storage
//!
//! The traversal engine sees storage through the `EntityStore` trait:
//! entity-by-id lookup for reference fields and block-by-uuid lookup for
//! embedded block resolution. `InMemoryStore` is the concrete backend used
//! by the CLI, populated from a JSON snapshot of entities plus field schema.

use crate::entity::{Entity, EntityId};
use crate::error::PipelineError;
use crate::schema::{FieldDescriptor, SchemaMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Synchronous entity lookup used by the traversal engine
pub trait EntityStore {
    /// Entity by id, None for dangling references.
    fn by_id(&self, id: &EntityId) -> Option<&Entity>;

    /// Block entity by its stable UUID, None when no stored block matches.
    fn block_by_uuid(&self, uuid: &str) -> Option<&Entity>;
}

/// In-memory entity store
///
/// Preserves insertion order for root enumeration so batch runs are
/// deterministic for a given snapshot.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entities: HashMap<EntityId, Entity>,
    blocks_by_uuid: HashMap<String, EntityId>,
    order: Vec<EntityId>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, indexing blocks by UUID. Re-inserting an id
    /// replaces the previous entity.
    pub fn insert(&mut self, entity: Entity) {
        let id = entity.id().clone();
        if let Entity::Block { uuid, .. } = &entity {
            self.blocks_by_uuid.insert(uuid.clone(), id.clone());
        }
        if self.entities.insert(id.clone(), entity).is_none() {
            self.order.push(id);
        }
    }

    /// Ids of content entities whose bundle is in the selected set, in
    /// insertion order. These are the batch roots.
    pub fn roots_in_bundles(&self, bundles: &[String]) -> Vec<EntityId> {
        self.order
            .iter()
            .filter(|id| {
                matches!(
                    self.entities.get(id),
                    Some(Entity::Content { bundle, .. }) if bundles.iter().any(|b| b == bundle)
                )
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityStore for InMemoryStore {
    fn by_id(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    fn block_by_uuid(&self, uuid: &str) -> Option<&Entity> {
        self.blocks_by_uuid
            .get(uuid)
            .and_then(|id| self.entities.get(id))
    }
}

/// Configured fields for one `(entity_type, bundle)` pair in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub entity_type: String,
    pub bundle: String,
    pub fields: Vec<FieldDescriptor>,
}

/// JSON snapshot of materialized entities and their field schema
///
/// This is the host-exported document the CLI operates on in place of a
/// live content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub schema: Vec<SchemaEntry>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::SnapshotError(format!("Failed to read snapshot {:?}: {}", path, e))
        })?;
        serde_json::from_str(&data).map_err(|e| {
            PipelineError::SnapshotError(format!("Failed to parse snapshot {:?}: {}", path, e))
        })
    }

    /// Split the snapshot into its store and schema halves.
    pub fn into_parts(self) -> (InMemoryStore, SchemaMap) {
        let mut store = InMemoryStore::new();
        for entity in self.entities {
            store.insert(entity);
        }

        let mut schema = SchemaMap::new();
        for entry in self.schema {
            schema.insert(entry.entity_type, entry.bundle, entry.fields);
        }

        (store, schema)
    }
}
