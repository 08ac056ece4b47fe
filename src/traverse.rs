//! Graph traversal engine
//!
//! Recursively resolves every media location reachable from one entity:
//! file entities terminate the recursion with their own URL, reference
//! fields recurse into each referenced entity, block fields resolve the
//! backing block entity by UUID and re-enter the traversal. Output order is
//! field declaration order, then reference order, then nested traversal
//! order.
//!
//! A visited set keyed by `(entity_type, id)` is threaded through each
//! top-level call: the second encounter of a node contributes an empty
//! sequence, which makes reference cycles terminate. Media locations are
//! otherwise not deduplicated.

use crate::entity::{BlockRef, Entity, EntityId, FieldPayload, MediaLocation};
use crate::schema::{classify, FieldAction, SchemaAccessor};
use crate::store::EntityStore;
use std::collections::HashSet;
use tracing::debug;

/// Resolves reachable media locations for entities
///
/// Collaborators are injected; the resolver holds no state between calls.
pub struct MediaResolver<'a> {
    schema: &'a dyn SchemaAccessor,
    store: &'a dyn EntityStore,
}

impl<'a> MediaResolver<'a> {
    pub fn new(schema: &'a dyn SchemaAccessor, store: &'a dyn EntityStore) -> Self {
        Self { schema, store }
    }

    /// Resolve all media locations reachable from `entity`.
    ///
    /// Dangling references and unresolvable blocks contribute nothing; they
    /// are data-quality conditions, not traversal failures.
    pub fn resolve_media(&self, entity: &Entity) -> Vec<MediaLocation> {
        let mut visited = HashSet::new();
        self.resolve_inner(entity, &mut visited)
    }

    fn resolve_inner(
        &self,
        entity: &Entity,
        visited: &mut HashSet<(&'static str, EntityId)>,
    ) -> Vec<MediaLocation> {
        if !visited.insert((entity.type_tag(), entity.id().clone())) {
            debug!(id = %entity.id(), "Already visited, skipping");
            return Vec::new();
        }

        // Terminal case: a file resolves to its own URL, fields are never
        // inspected.
        if let Entity::File { url, .. } = entity {
            return vec![url.clone()];
        }

        let bundle = match entity.bundle() {
            Some(bundle) => bundle,
            None => return Vec::new(),
        };

        let fields = self.schema.fields_of(entity.type_tag(), bundle);
        if fields.is_empty() {
            return Vec::new();
        }

        let mut locations = Vec::new();
        for descriptor in fields {
            match classify(descriptor.field_type) {
                FieldAction::FollowReference => {
                    if let Some(value) = entity.field(&descriptor.name) {
                        if let FieldPayload::References(ids) = &value.payload {
                            for id in ids {
                                match self.store.by_id(id) {
                                    Some(referenced) => {
                                        locations.extend(self.resolve_inner(referenced, visited));
                                    }
                                    None => {
                                        debug!(id = %id, field = %descriptor.name, "Dangling reference, skipping");
                                    }
                                }
                            }
                        }
                    }
                }
                FieldAction::FollowBlock => {
                    if let Some(value) = entity.field(&descriptor.name) {
                        if let FieldPayload::Blocks(refs) = &value.payload {
                            locations.extend(self.resolve_blocks(refs, visited));
                        }
                    }
                }
                FieldAction::Ignore => {}
            }
        }

        locations
    }

    /// Resolve embedded block references into media locations.
    ///
    /// Only content blocks carry a backing entity; configuration-defined
    /// blocks and blocks with no stored entity contribute nothing.
    fn resolve_blocks(
        &self,
        refs: &[BlockRef],
        visited: &mut HashSet<(&'static str, EntityId)>,
    ) -> Vec<MediaLocation> {
        let mut locations = Vec::new();
        for block_ref in refs {
            let uuid = match block_ref.content_uuid() {
                Some(uuid) => uuid,
                None => continue,
            };
            match self.store.block_by_uuid(uuid) {
                Some(block) => locations.extend(self.resolve_inner(block, visited)),
                None => {
                    debug!(uuid = %uuid, "Block reference without stored entity, skipping");
                }
            }
        }
        locations
    }
}
