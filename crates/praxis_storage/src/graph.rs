//! Read-only query surface over the entity graph.

use praxis_foundation::{EntityId, Vector4};
use praxis_taxonomy::{NodeId, Taxonomy};
use praxis_value::ValueInstance;

use crate::kind::{ChangeChannel, EntityKind, OwnerKind, Relation};
use crate::relationship::{RelationshipInstance, RelationshipRole};
use crate::world::Attribute;

/// Everything the engine needs to know about entities.
///
/// Unknown entities answer with empty collections and `None`; no query
/// fails. "Added" and "removed" queries cover the changes since the
/// previous simulation step.
pub trait EntityGraph {
    /// Returns true if `entity` is alive.
    fn exists(&self, entity: EntityId) -> bool;

    /// The entity's kind.
    fn kind(&self, entity: EntityId) -> Option<EntityKind>;

    /// The entity's category in the taxonomy.
    fn category(&self, entity: EntityId) -> Option<NodeId>;

    /// Position of a spatial entity.
    fn position(&self, entity: EntityId) -> Option<Vector4>;

    /// The entity's attributes, in insertion order.
    fn attributes(&self, entity: EntityId) -> &[Attribute];

    /// Amount of matter, in base units; zero for other kinds.
    fn quantity(&self, entity: EntityId) -> f64;

    /// Members of one of the entity's owned collections.
    fn related(&self, entity: EntityId, relation: Relation) -> &[EntityId];

    /// Single-step inverse lookup.
    fn owner(&self, entity: EntityId, owner: OwnerKind) -> Option<EntityId>;

    /// Relationships the entity takes part in with the given role.
    fn relationships(&self, entity: EntityId, role: RelationshipRole) -> Vec<RelationshipInstance>;

    /// All entities in the same world as `entity`, including itself.
    fn instances_in_world_of(&self, entity: EntityId) -> Vec<EntityId>;

    /// Members added to one of the entity's collections since the previous step.
    fn added(&self, entity: EntityId, channel: ChangeChannel) -> &[EntityId];

    /// Members removed from one of the entity's collections since the previous step.
    fn removed(&self, entity: EntityId, channel: ChangeChannel) -> &[EntityId];

    /// Relationships involving the entity created since the previous step.
    fn added_relationships(&self, entity: EntityId) -> &[RelationshipInstance];

    /// Relationships involving the entity removed since the previous step.
    fn removed_relationships(&self, entity: EntityId) -> &[RelationshipInstance];

    /// Finds an attribute by category.
    ///
    /// An exact match wins; otherwise the first attribute whose category is
    /// a kind of `attribute`.
    fn attribute(
        &self,
        entity: EntityId,
        attribute: NodeId,
        taxonomy: &Taxonomy,
    ) -> Option<&ValueInstance> {
        let attributes = self.attributes(entity);
        attributes
            .iter()
            .find(|a| a.node == attribute)
            .or_else(|| {
                attributes
                    .iter()
                    .find(|a| taxonomy.is_node_of(a.node, attribute))
            })
            .map(|a| &a.value)
    }

    /// Returns true if the entity's category is a kind of `category`.
    fn is_of(&self, entity: EntityId, category: NodeId, taxonomy: &Taxonomy) -> bool {
        self.category(entity)
            .is_some_and(|own| taxonomy.is_node_of(own, category))
    }
}
