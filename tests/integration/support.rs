//! Shared fixtures for integration tests

use imagemap::entity::{BlockRef, Entity, EntityId, FieldPayload, FieldValue};
use imagemap::schema::{FieldDescriptor, FieldType, SchemaMap};
use imagemap::store::InMemoryStore;

pub fn file(id: &str, url: &str) -> Entity {
    Entity::File {
        id: EntityId::new(id),
        url: url.to_string(),
    }
}

pub fn article(id: &str, fields: Vec<FieldValue>) -> Entity {
    Entity::Content {
        id: EntityId::new(id),
        bundle: "article".to_string(),
        canonical_url: format!("https://example.com/{}", id),
        fields,
    }
}

pub fn ref_field(name: &str, ids: &[&str]) -> FieldValue {
    FieldValue::new(
        name,
        FieldPayload::References(ids.iter().copied().map(EntityId::new).collect()),
    )
}

pub fn block_field(name: &str, plugin_ids: &[&str]) -> FieldValue {
    FieldValue::new(
        name,
        FieldPayload::Blocks(plugin_ids.iter().copied().map(BlockRef::new).collect()),
    )
}

/// Schema for an article bundle with one image field and one block field,
/// plus a basic block bundle with one image field.
pub fn site_schema() -> SchemaMap {
    let mut schema = SchemaMap::new();
    schema.insert(
        "content",
        "article",
        vec![
            FieldDescriptor::new("field_image", FieldType::Image),
            FieldDescriptor::new("field_blocks", FieldType::BlockField),
        ],
    );
    schema.insert(
        "block",
        "basic",
        vec![FieldDescriptor::new("field_media", FieldType::Image)],
    );
    schema
}

pub fn block(id: &str, uuid: &str, fields: Vec<FieldValue>) -> Entity {
    Entity::Block {
        id: EntityId::new(id),
        uuid: uuid.to_string(),
        bundle: "basic".to_string(),
        fields,
    }
}

pub fn store_with(entities: Vec<Entity>) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for entity in entities {
        store.insert(entity);
    }
    store
}
