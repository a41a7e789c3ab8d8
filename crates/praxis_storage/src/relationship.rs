//! Typed relationship instances with bidirectional indices.
//!
//! A relationship is a directed edge `source -> target` whose type is a
//! taxonomy node, so relationship queries can match by is-a. Forward and
//! reverse indices keep both directions in insertion order.

use std::collections::{BTreeMap, HashMap};

use praxis_foundation::EntityId;
use praxis_taxonomy::NodeId;

/// Identity of a relationship instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipId(pub u64);

/// A directed, typed edge between two entities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationshipInstance {
    /// Instance identity.
    pub id: RelationshipId,
    /// Relationship type.
    pub kind: NodeId,
    /// Entity the relationship goes from.
    pub source: EntityId,
    /// Entity the relationship goes to.
    pub target: EntityId,
}

impl RelationshipInstance {
    /// The endpoint opposite to the one playing `role`.
    #[must_use]
    pub fn other(&self, role: RelationshipRole) -> EntityId {
        match role {
            RelationshipRole::Source => self.target,
            RelationshipRole::Target => self.source,
        }
    }

    /// The endpoint playing `role`.
    #[must_use]
    pub fn endpoint(&self, role: RelationshipRole) -> EntityId {
        match role {
            RelationshipRole::Source => self.source,
            RelationshipRole::Target => self.target,
        }
    }
}

/// Which end of a relationship an entity is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipRole {
    /// The entity the relationship goes from.
    Source,
    /// The entity the relationship goes to.
    Target,
}

/// Stores relationship instances.
///
/// - Forward: source -> relationships it is the source of
/// - Reverse: target -> relationships it is the target of
#[derive(Clone, Debug, Default)]
pub struct RelationshipStore {
    instances: BTreeMap<RelationshipId, RelationshipInstance>,
    forward: HashMap<EntityId, Vec<RelationshipId>>,
    reverse: HashMap<EntityId, Vec<RelationshipId>>,
    next: u64,
}

impl RelationshipStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge. Linking an existing `(kind, source, target)` edge is a
    /// no-op and returns the existing instance with `false`.
    pub fn link(
        &mut self,
        kind: NodeId,
        source: EntityId,
        target: EntityId,
    ) -> (RelationshipInstance, bool) {
        if let Some(existing) = self
            .as_source(source)
            .find(|r| r.kind == kind && r.target == target)
        {
            return (*existing, false);
        }
        let instance = RelationshipInstance {
            id: RelationshipId(self.next),
            kind,
            source,
            target,
        };
        self.next += 1;
        self.instances.insert(instance.id, instance);
        self.forward.entry(source).or_default().push(instance.id);
        self.reverse.entry(target).or_default().push(instance.id);
        (instance, true)
    }

    /// Removes an edge, returning it if it existed.
    pub fn unlink(&mut self, id: RelationshipId) -> Option<RelationshipInstance> {
        let instance = self.instances.remove(&id)?;
        if let Some(ids) = self.forward.get_mut(&instance.source) {
            ids.retain(|other| *other != id);
        }
        if let Some(ids) = self.reverse.get_mut(&instance.target) {
            ids.retain(|other| *other != id);
        }
        Some(instance)
    }

    /// Removes every edge touching `entity`, returning them.
    pub fn remove_entity(&mut self, entity: EntityId) -> Vec<RelationshipInstance> {
        let ids: Vec<RelationshipId> = self
            .forward
            .remove(&entity)
            .into_iter()
            .chain(self.reverse.remove(&entity))
            .flatten()
            .collect();
        ids.into_iter().filter_map(|id| self.unlink(id)).collect()
    }

    /// Looks up an instance.
    #[must_use]
    pub fn get(&self, id: RelationshipId) -> Option<&RelationshipInstance> {
        self.instances.get(&id)
    }

    /// Edges where `entity` is the source, oldest first.
    pub fn as_source(&self, entity: EntityId) -> impl Iterator<Item = &RelationshipInstance> {
        self.indexed(&self.forward, entity)
    }

    /// Edges where `entity` is the target, oldest first.
    pub fn as_target(&self, entity: EntityId) -> impl Iterator<Item = &RelationshipInstance> {
        self.indexed(&self.reverse, entity)
    }

    fn indexed<'a>(
        &'a self,
        index: &'a HashMap<EntityId, Vec<RelationshipId>>,
        entity: EntityId,
    ) -> impl Iterator<Item = &'a RelationshipInstance> {
        index
            .get(&entity)
            .into_iter()
            .flatten()
            .filter_map(|id| self.instances.get(id))
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if there are no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
