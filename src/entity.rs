//! Content entity model
//!
//! Entities are read-only inputs to the pipeline: the traversal never
//! creates or mutates them. The three entity kinds (file, content, embedded
//! block) are a closed sum type so call sites dispatch by match instead of
//! comparing type-tag strings.

use serde::{Deserialize, Serialize};

/// Plugin identifier prefix for block references that carry a backing entity.
pub const BLOCK_CONTENT_PREFIX: &str = "block_content:";

/// An absolute URL naming one discoverable image/media asset.
pub type MediaLocation = String;

/// Opaque entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to an embedded reusable block, as stored in a `block_field`
/// value. The plugin id encodes a plugin category and, for content blocks,
/// a UUID: `block_content:<uuid>`. Configuration-defined blocks carry other
/// categories and no backing entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub plugin_id: String,
}

impl BlockRef {
    pub fn new<S: Into<String>>(plugin_id: S) -> Self {
        Self {
            plugin_id: plugin_id.into(),
        }
    }

    /// UUID of the backing content block, or None for configuration-defined
    /// blocks (which have no entity to traverse).
    pub fn content_uuid(&self) -> Option<&str> {
        self.plugin_id.strip_prefix(BLOCK_CONTENT_PREFIX)
    }
}

/// Payload of one field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPayload {
    /// Entity references (image, entity_reference, entity_reference_revisions)
    References(Vec<EntityId>),
    /// Embedded block references (block_field)
    Blocks(Vec<BlockRef>),
    /// Scalar data the traversal never follows
    Text(String),
}

/// A named field value on an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub payload: FieldPayload,
}

impl FieldValue {
    pub fn new<S: Into<String>>(name: S, payload: FieldPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// A typed content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    /// A stored media file. Traversal terminal: resolves to its own URL.
    File { id: EntityId, url: String },
    /// An authored content item with a canonical URL. The only kind that can
    /// be enqueued as a batch root.
    Content {
        id: EntityId,
        bundle: String,
        canonical_url: String,
        #[serde(default)]
        fields: Vec<FieldValue>,
    },
    /// A reusable embedded block, addressable by UUID.
    Block {
        id: EntityId,
        uuid: String,
        bundle: String,
        #[serde(default)]
        fields: Vec<FieldValue>,
    },
}

impl Entity {
    pub fn id(&self) -> &EntityId {
        match self {
            Entity::File { id, .. } | Entity::Content { id, .. } | Entity::Block { id, .. } => id,
        }
    }

    /// Stable type tag, used for schema lookup and visited-set keys.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Entity::File { .. } => "file",
            Entity::Content { .. } => "content",
            Entity::Block { .. } => "block",
        }
    }

    pub fn bundle(&self) -> Option<&str> {
        match self {
            Entity::File { .. } => None,
            Entity::Content { bundle, .. } | Entity::Block { bundle, .. } => Some(bundle),
        }
    }

    /// Canonical URL, defined for content entities only.
    pub fn canonical_url(&self) -> Option<&str> {
        match self {
            Entity::Content { canonical_url, .. } => Some(canonical_url),
            _ => None,
        }
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        match self {
            Entity::File { .. } => None,
            Entity::Content { fields, .. } | Entity::Block { fields, .. } => {
                fields.iter().find(|f| f.name == name)
            }
        }
    }
}
