//! Containment walks shared by variables, references, ranges and requirements.

use praxis_foundation::EntityId;
use praxis_storage::{EntityGraph, Relation};
use praxis_taxonomy::{NodeId, Taxonomy};

/// The entity itself if it is a space, otherwise its spaces.
pub(crate) fn spaces_of(graph: &dyn EntityGraph, entity: EntityId) -> Vec<EntityId> {
    if graph.kind(entity).is_some_and(|k| k.is_space()) {
        vec![entity]
    } else {
        graph.related(entity, Relation::Spaces).to_vec()
    }
}

/// Members of `relation`, reaching through spaces for space-owned collections.
///
/// Items and space matter live in spaces; asking a physical object for them
/// collects them from each of its spaces.
pub(crate) fn members(graph: &dyn EntityGraph, entity: EntityId, relation: Relation) -> Vec<EntityId> {
    match relation {
        Relation::SpaceItems | Relation::SpaceMatter => spaces_of(graph, entity)
            .into_iter()
            .flat_map(|space| graph.related(space, relation).iter().copied())
            .collect(),
        _ => graph.related(entity, relation).to_vec(),
    }
}

/// Matter held directly or in the entity's spaces.
pub(crate) fn matter_of(graph: &dyn EntityGraph, entity: EntityId) -> Vec<EntityId> {
    let mut matter = graph.related(entity, Relation::Matter).to_vec();
    matter.extend(members(graph, entity, Relation::SpaceMatter));
    matter
}

/// Returns true if `entity` is of `category`, or if no category is given.
pub(crate) fn matches(
    graph: &dyn EntityGraph,
    taxonomy: &Taxonomy,
    entity: EntityId,
    category: Option<NodeId>,
) -> bool {
    category.is_none_or(|c| graph.is_of(entity, c, taxonomy))
}

/// Appends `entity` unless already present.
pub(crate) fn push_unique(out: &mut Vec<EntityId>, entity: EntityId) {
    if !out.contains(&entity) {
        out.push(entity);
    }
}
