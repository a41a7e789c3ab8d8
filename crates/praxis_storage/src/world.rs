//! World state with immutable snapshots.
//!
//! The `World` owns every entity record, the owned collections between
//! them, the typed relationships, and the log of changes since the previous
//! step. Cloning is cheap (persistent maps and `Arc`-shared stores), and
//! every mutation returns a new `World`, leaving the original untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use im::OrdMap;
use praxis_foundation::{EntityId, Error, ErrorKind, Result, Vector4};
use praxis_taxonomy::NodeId;
use praxis_value::{ValueChange, ValueInstance, VariableScope};
use tracing::{debug, trace};

use crate::entity::EntityStore;
use crate::graph::EntityGraph;
use crate::kind::{ChangeChannel, EntityKind, OwnerKind, Relation};
use crate::relationship::{RelationshipId, RelationshipInstance, RelationshipRole, RelationshipStore};

/// A named value held by an entity.
#[derive(Clone, Debug)]
pub struct Attribute {
    /// Attribute category.
    pub node: NodeId,
    /// Current value.
    pub value: ValueInstance,
}

/// Everything needed to spawn an entity.
#[derive(Clone, Debug)]
pub struct EntityDecl {
    /// Entity kind.
    pub kind: EntityKind,
    /// Taxonomy category.
    pub category: NodeId,
    /// Starting position (ignored for non-spatial kinds).
    pub position: Vector4,
    /// Matter quantity in base units (ignored for non-matter kinds).
    pub quantity: f64,
    /// Starting attributes.
    pub attributes: Vec<Attribute>,
}

impl EntityDecl {
    /// Declares an entity at the origin with no attributes.
    #[must_use]
    pub fn new(kind: EntityKind, category: NodeId) -> Self {
        Self {
            kind,
            category,
            position: Vector4::ZERO,
            quantity: 0.0,
            attributes: Vec::new(),
        }
    }

    /// Sets the position.
    #[must_use]
    pub fn at(mut self, position: Vector4) -> Self {
        self.position = position;
        self
    }

    /// Sets the matter quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, node: NodeId, value: ValueInstance) -> Self {
        self.attributes.push(Attribute { node, value });
        self
    }
}

#[derive(Clone, Debug)]
struct EntityRecord {
    kind: EntityKind,
    category: NodeId,
    position: Vector4,
    quantity: f64,
    attributes: Vec<Attribute>,
    related: BTreeMap<Relation, Vec<EntityId>>,
    owners: BTreeMap<OwnerKind, EntityId>,
}

impl From<EntityDecl> for EntityRecord {
    fn from(decl: EntityDecl) -> Self {
        Self {
            kind: decl.kind,
            category: decl.category,
            position: decl.position,
            quantity: decl.quantity,
            attributes: decl.attributes,
            related: BTreeMap::new(),
            owners: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ChangeLog {
    added: Vec<EntityId>,
    removed: Vec<EntityId>,
}

#[derive(Clone, Debug, Default)]
struct RelationshipLog {
    added: Vec<RelationshipInstance>,
    removed: Vec<RelationshipInstance>,
}

#[derive(Copy, Clone)]
enum Change {
    Added,
    Removed,
}

/// Immutable snapshot of the entity graph.
///
/// Clone is O(1) due to structural sharing.
/// All mutation methods return a new `World` instance.
#[derive(Clone, Debug, Default)]
pub struct World {
    entities: Arc<EntityStore>,
    records: OrdMap<EntityId, EntityRecord>,
    relationships: Arc<RelationshipStore>,
    changes: OrdMap<(EntityId, ChangeChannel), ChangeLog>,
    relationship_changes: OrdMap<EntityId, RelationshipLog>,
    step: u64,
    /// Snapshot at the end of the previous step.
    previous: Option<Arc<World>>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step number.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// The snapshot taken when the current step began, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&World> {
        self.previous.as_deref()
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates live entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.records.keys().copied()
    }

    /// Looks up a relationship instance.
    #[must_use]
    pub fn relationship(&self, id: RelationshipId) -> Option<&RelationshipInstance> {
        self.relationships.get(id)
    }

    // --- Entity Operations ---

    /// Spawns an entity.
    ///
    /// Returns a new World and the spawned entity ID.
    #[must_use]
    pub fn spawn(&self, decl: EntityDecl) -> (World, EntityId) {
        let mut world = self.clone();
        let id = Arc::make_mut(&mut world.entities).spawn();
        debug!(entity = %id, kind = %decl.kind, "spawned entity");
        world.records.insert(id, decl.into());
        (world, id)
    }

    /// Destroys an entity.
    ///
    /// The entity leaves every collection it belonged to (logged as a
    /// removal on each owner), its members lose their inverse link to it, and
    /// every relationship touching it is removed.
    ///
    /// # Errors
    ///
    /// Fails if the entity does not exist or the reference is stale.
    pub fn destroy(&self, entity: EntityId) -> Result<World> {
        self.entities.validate(entity)?;
        let mut world = self.clone();

        let holders: Vec<(EntityId, Relation)> = self
            .records
            .iter()
            .flat_map(|(holder, record)| {
                record
                    .related
                    .iter()
                    .filter(|(_, members)| members.contains(&entity))
                    .map(move |(relation, _)| (*holder, *relation))
            })
            .collect();
        for (holder, relation) in holders {
            world.unlink_member(holder, relation, entity);
        }

        let record = world
            .records
            .remove(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))?;
        for (relation, members) in &record.related {
            let Some(kind) = relation.owner_kind() else {
                continue;
            };
            for member in members {
                if let Some(member_record) = world.records.get_mut(member) {
                    if member_record.owners.get(&kind) == Some(&entity) {
                        member_record.owners.remove(&kind);
                    }
                }
            }
        }

        let removed = Arc::make_mut(&mut world.relationships).remove_entity(entity);
        for relationship in removed {
            world.log_relationship(relationship, Change::Removed);
        }

        Arc::make_mut(&mut world.entities).destroy(entity)?;
        debug!(entity = %entity, "destroyed entity");
        Ok(world)
    }

    /// Checks if an entity exists.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.exists(entity)
    }

    // --- Collections ---

    /// Adds `member` to one of `owner`'s collections.
    ///
    /// Members with an inverse link (items, parts, spaces, ...) have a single
    /// owner per link; attaching them elsewhere detaches them first. Attaching
    /// an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if either entity is missing, or if the relation does not accept
    /// the two kinds (e.g. a space item that is not a physical object).
    pub fn attach(&self, owner: EntityId, relation: Relation, member: EntityId) -> Result<World> {
        let owner_kind = self.live_record(owner)?.kind;
        let member_kind = self.live_record(member)?.kind;
        if owner == member || !relation.accepts(owner_kind, member_kind) {
            return Err(Error::new(ErrorKind::InvalidRelation(format!(
                "{member} ({member_kind}) cannot be in the {relation:?} of {owner} ({owner_kind})"
            ))));
        }
        if self.related(owner, relation).contains(&member) {
            return Ok(self.clone());
        }

        let mut world = self.clone();
        if let Some(kind) = relation.owner_kind() {
            if let Some(current) = self.owner(member, kind) {
                world.unlink_member(current, relation, member);
            }
            world.record_mut(member)?.owners.insert(kind, owner);
        }
        world
            .record_mut(owner)?
            .related
            .entry(relation)
            .or_default()
            .push(member);
        if let Some(channel) = relation.channel() {
            world.log(owner, channel, member, Change::Added);
        }
        trace!(%owner, ?relation, %member, "attached");
        Ok(world)
    }

    /// Removes `member` from one of `owner`'s collections.
    ///
    /// Detaching a non-member is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if either entity is missing.
    pub fn detach(&self, owner: EntityId, relation: Relation, member: EntityId) -> Result<World> {
        self.entities.validate(owner)?;
        self.entities.validate(member)?;
        if !self.related(owner, relation).contains(&member) {
            return Ok(self.clone());
        }
        let mut world = self.clone();
        world.unlink_member(owner, relation, member);
        trace!(%owner, ?relation, %member, "detached");
        Ok(world)
    }

    fn unlink_member(&mut self, owner: EntityId, relation: Relation, member: EntityId) {
        if let Some(members) = self
            .records
            .get_mut(&owner)
            .and_then(|record| record.related.get_mut(&relation))
        {
            members.retain(|m| *m != member);
        }
        if let Some(kind) = relation.owner_kind() {
            if let Some(record) = self.records.get_mut(&member) {
                if record.owners.get(&kind) == Some(&owner) {
                    record.owners.remove(&kind);
                }
            }
        }
        if let Some(channel) = relation.channel() {
            self.log(owner, channel, member, Change::Removed);
        }
    }

    // --- Relationships ---

    /// Creates a typed relationship `source -> target`.
    ///
    /// Creating an existing `(kind, source, target)` relationship returns the
    /// existing instance and logs nothing.
    ///
    /// # Errors
    ///
    /// Fails if either entity is missing.
    pub fn relate(
        &self,
        kind: NodeId,
        source: EntityId,
        target: EntityId,
    ) -> Result<(World, RelationshipInstance)> {
        self.entities.validate(source)?;
        self.entities.validate(target)?;
        let mut world = self.clone();
        let (instance, created) = Arc::make_mut(&mut world.relationships).link(kind, source, target);
        if created {
            world.log_relationship(instance, Change::Added);
        }
        Ok((world, instance))
    }

    /// Removes a relationship.
    ///
    /// # Errors
    ///
    /// Fails if no relationship has that id.
    pub fn unrelate(&self, id: RelationshipId) -> Result<World> {
        let mut world = self.clone();
        let instance = Arc::make_mut(&mut world.relationships)
            .unlink(id)
            .ok_or_else(|| Error::new(ErrorKind::Internal(format!("unknown relationship {id:?}"))))?;
        world.log_relationship(instance, Change::Removed);
        Ok(world)
    }

    // --- State ---

    /// Moves a spatial entity.
    ///
    /// # Errors
    ///
    /// Fails if the entity is missing or not spatial.
    pub fn set_position(&self, entity: EntityId, position: Vector4) -> Result<World> {
        if !self.live_record(entity)?.kind.is_spatial() {
            return Err(Error::missing_capability(entity, "spatial"));
        }
        let mut world = self.clone();
        world.record_mut(entity)?.position = position;
        Ok(world)
    }

    /// Sets the amount of a matter entity.
    ///
    /// # Errors
    ///
    /// Fails if the entity is missing or not matter.
    pub fn set_quantity(&self, entity: EntityId, quantity: f64) -> Result<World> {
        if !self.live_record(entity)?.kind.is_matter() {
            return Err(Error::missing_capability(entity, "matter"));
        }
        let mut world = self.clone();
        world.record_mut(entity)?.quantity = quantity;
        Ok(world)
    }

    /// Sets an attribute, replacing any attribute of exactly that category.
    ///
    /// # Errors
    ///
    /// Fails if the entity is missing.
    pub fn set_attribute(&self, entity: EntityId, node: NodeId, value: ValueInstance) -> Result<World> {
        self.live_record(entity)?;
        let mut world = self.clone();
        let attributes = &mut world.record_mut(entity)?.attributes;
        match attributes.iter_mut().find(|a| a.node == node) {
            Some(existing) => existing.value = value,
            None => attributes.push(Attribute { node, value }),
        }
        Ok(world)
    }

    /// Applies a change to an attribute of exactly that category.
    ///
    /// Returns whether the change applied; a missing attribute or a change
    /// of the wrong kind leaves the world as it was.
    ///
    /// # Errors
    ///
    /// Fails if the entity is missing.
    pub fn apply_change(
        &self,
        entity: EntityId,
        node: NodeId,
        change: &ValueChange,
        scope: &dyn VariableScope,
    ) -> Result<(World, bool)> {
        self.live_record(entity)?;
        let mut world = self.clone();
        let applied = world
            .record_mut(entity)?
            .attributes
            .iter_mut()
            .find(|a| a.node == node)
            .is_some_and(|a| change.apply(&mut a.value, scope));
        Ok(if applied { (world, true) } else { (self.clone(), false) })
    }

    // --- Step Operations ---

    /// Advances to the next step.
    ///
    /// The change log is cleared and the current state becomes the previous
    /// snapshot. Only one previous snapshot is retained.
    #[must_use]
    pub fn advance_step(&self) -> World {
        World {
            changes: OrdMap::new(),
            relationship_changes: OrdMap::new(),
            step: self.step + 1,
            previous: Some(Arc::new(World {
                previous: None,
                ..self.clone()
            })),
            ..self.clone()
        }
    }

    // --- Internals ---

    fn live_record(&self, entity: EntityId) -> Result<&EntityRecord> {
        self.entities.validate(entity)?;
        self.records
            .get(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    fn record_mut(&mut self, entity: EntityId) -> Result<&mut EntityRecord> {
        self.records
            .get_mut(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    fn log(&mut self, owner: EntityId, channel: ChangeChannel, member: EntityId, change: Change) {
        let log = self
            .changes
            .entry((owner, channel))
            .or_insert_with(ChangeLog::default);
        match change {
            Change::Added => log.added.push(member),
            Change::Removed => log.removed.push(member),
        }
    }

    fn log_relationship(&mut self, instance: RelationshipInstance, change: Change) {
        let mut endpoints = vec![instance.source];
        if instance.target != instance.source {
            endpoints.push(instance.target);
        }
        for entity in endpoints {
            let log = self
                .relationship_changes
                .entry(entity)
                .or_insert_with(RelationshipLog::default);
            match change {
                Change::Added => log.added.push(instance),
                Change::Removed => log.removed.push(instance),
            }
        }
    }
}

impl EntityGraph for World {
    fn exists(&self, entity: EntityId) -> bool {
        self.entities.exists(entity)
    }

    fn kind(&self, entity: EntityId) -> Option<EntityKind> {
        self.records.get(&entity).map(|r| r.kind)
    }

    fn category(&self, entity: EntityId) -> Option<NodeId> {
        self.records.get(&entity).map(|r| r.category)
    }

    fn position(&self, entity: EntityId) -> Option<Vector4> {
        self.records
            .get(&entity)
            .filter(|r| r.kind.is_spatial())
            .map(|r| r.position)
    }

    fn attributes(&self, entity: EntityId) -> &[Attribute] {
        self.records.get(&entity).map_or(&[], |r| &r.attributes)
    }

    fn quantity(&self, entity: EntityId) -> f64 {
        self.records
            .get(&entity)
            .filter(|r| r.kind.is_matter())
            .map_or(0.0, |r| r.quantity)
    }

    fn related(&self, entity: EntityId, relation: Relation) -> &[EntityId] {
        self.records
            .get(&entity)
            .and_then(|r| r.related.get(&relation))
            .map_or(&[], Vec::as_slice)
    }

    fn owner(&self, entity: EntityId, owner: OwnerKind) -> Option<EntityId> {
        self.records
            .get(&entity)
            .and_then(|r| r.owners.get(&owner))
            .copied()
    }

    fn relationships(&self, entity: EntityId, role: RelationshipRole) -> Vec<RelationshipInstance> {
        match role {
            RelationshipRole::Source => self.relationships.as_source(entity).copied().collect(),
            RelationshipRole::Target => self.relationships.as_target(entity).copied().collect(),
        }
    }

    fn instances_in_world_of(&self, entity: EntityId) -> Vec<EntityId> {
        if self.exists(entity) {
            self.entities().collect()
        } else {
            Vec::new()
        }
    }

    fn added(&self, entity: EntityId, channel: ChangeChannel) -> &[EntityId] {
        self.changes
            .get(&(entity, channel))
            .map_or(&[], |log| &log.added)
    }

    fn removed(&self, entity: EntityId, channel: ChangeChannel) -> &[EntityId] {
        self.changes
            .get(&(entity, channel))
            .map_or(&[], |log| &log.removed)
    }

    fn added_relationships(&self, entity: EntityId) -> &[RelationshipInstance] {
        self.relationship_changes
            .get(&entity)
            .map_or(&[], |log| &log.added)
    }

    fn removed_relationships(&self, entity: EntityId) -> &[RelationshipInstance] {
        self.relationship_changes
            .get(&entity)
            .map_or(&[], |log| &log.removed)
    }
}
