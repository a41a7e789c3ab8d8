//! Ranges: what is reachable around the entities of an event.

use praxis_foundation::EntityId;
use praxis_storage::{EntityGraph, OwnerKind, Relation, RelationshipRole};
use praxis_taxonomy::NodeId;
use praxis_value::NumericalValueBase;

use crate::context::{EvaluationContext, Role};
use crate::requirement::EntityRequirements;
use crate::traverse;

/// Inclusion flags around one entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RangeScope {
    /// Connected objects.
    pub connections: bool,
    /// Parts.
    pub parts: bool,
    /// The whole this entity is a part of.
    pub whole: bool,
    /// Items in the entity's spaces.
    pub space_items: bool,
    /// Matter in the entity's spaces.
    pub space_tangible_matter: bool,
    /// Matter the entity holds.
    pub matter: bool,
    /// Covers.
    pub covers: bool,
    /// The object this entity covers.
    pub covered_object: bool,
    /// Layers applied to the entity.
    pub layers: bool,
    /// Sources of relationships of this type targeting the entity.
    pub relationship_sources: Option<NodeId>,
    /// Targets of relationships of this type from the entity.
    pub relationship_targets: Option<NodeId>,
}

impl RangeScope {
    /// Returns true if nothing is included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Appends everything the flags reach from `entity`.
    pub fn expand(&self, ctx: &EvaluationContext<'_>, entity: EntityId, out: &mut Vec<EntityId>) {
        let graph = ctx.graph();
        let mut include = |enabled: bool, found: Vec<EntityId>| {
            if enabled {
                for e in found {
                    traverse::push_unique(out, e);
                }
            }
        };
        include(self.connections, graph.related(entity, Relation::Connections).to_vec());
        include(self.parts, graph.related(entity, Relation::Parts).to_vec());
        include(self.whole, owner(graph, entity, OwnerKind::WholeOfPart));
        include(self.space_items, traverse::members(graph, entity, Relation::SpaceItems));
        include(
            self.space_tangible_matter,
            traverse::members(graph, entity, Relation::SpaceMatter),
        );
        include(self.matter, graph.related(entity, Relation::Matter).to_vec());
        include(self.covers, graph.related(entity, Relation::Covers).to_vec());
        include(
            self.covered_object,
            owner(graph, entity, OwnerKind::CoveredObjectOfCover),
        );
        include(self.layers, graph.related(entity, Relation::Layers).to_vec());
        if let Some(kind) = self.relationship_sources {
            include(true, related_by(ctx, entity, kind, RelationshipRole::Target));
        }
        if let Some(kind) = self.relationship_targets {
            include(true, related_by(ctx, entity, kind, RelationshipRole::Source));
        }
    }
}

fn owner(graph: &dyn EntityGraph, entity: EntityId, kind: OwnerKind) -> Vec<EntityId> {
    graph.owner(entity, kind).into_iter().collect()
}

fn related_by(ctx: &EvaluationContext<'_>, entity: EntityId, kind: NodeId, role: RelationshipRole) -> Vec<EntityId> {
    ctx.graph()
        .relationships(entity, role)
        .into_iter()
        .filter(|r| ctx.taxonomy().is_node_of(r.kind, kind))
        .map(|r| r.other(role))
        .collect()
}

/// A scope that applies to any bound entity meeting its requirements.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecificTargetScope {
    /// Which bound entities the scope applies to.
    pub requirements: EntityRequirements,
    /// What they reach.
    pub scope: RangeScope,
}

/// Everything reachable around an event's actor, target and artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeBase {
    /// Scope around the actor.
    pub actor: RangeScope,
    /// Scope around the target.
    pub target: RangeScope,
    /// Scope around the artifact.
    pub artifact: RangeScope,
    /// Scopes for bound entities meeting extra requirements.
    pub specific_targets: Vec<SpecificTargetScope>,
    /// Maximum distance of spatial entities from the origin.
    pub radius: Option<NumericalValueBase>,
    /// Role whose position is the radius origin.
    pub radius_origin: Role,
    /// Maximum number of reachable entities.
    pub maximum_targets: Option<usize>,
}

impl Default for RangeBase {
    fn default() -> Self {
        Self {
            actor: RangeScope::default(),
            target: RangeScope::default(),
            artifact: RangeScope::default(),
            specific_targets: Vec::new(),
            radius: None,
            radius_origin: Role::Actor,
            maximum_targets: None,
        }
    }
}

impl RangeBase {
    /// Returns true if the range reaches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actor.is_empty()
            && self.target.is_empty()
            && self.artifact.is_empty()
            && self.specific_targets.iter().all(|s| s.scope.is_empty())
    }

    /// The scope for `role`.
    #[must_use]
    pub fn scope_for(&self, role: Role) -> &RangeScope {
        match role {
            Role::Actor => &self.actor,
            Role::Target => &self.target,
            Role::Artifact => &self.artifact,
        }
    }

    /// Entities reachable from the bound roles.
    ///
    /// Results are deduplicated in discovery order. With a radius, spatial
    /// entities outside it are dropped; entities without a position are kept.
    #[must_use]
    pub fn reachable(&self, ctx: &EvaluationContext<'_>) -> Vec<EntityId> {
        let mut out = Vec::new();
        for role in Role::ALL {
            if let Some(entity) = ctx.entity(role) {
                self.scope_for(role).expand(ctx, entity, &mut out);
            }
        }
        for specific in &self.specific_targets {
            for role in Role::ALL {
                if let Some(entity) = ctx.entity(role) {
                    if specific.requirements.is_satisfied(ctx, entity) {
                        specific.scope.expand(ctx, entity, &mut out);
                    }
                }
            }
        }

        if let Some(radius) = &self.radius {
            let graph = ctx.graph();
            match ctx.entity(self.radius_origin).and_then(|e| graph.position(e)) {
                Some(origin) => {
                    let limit = radius.value(ctx);
                    out.retain(|&e| {
                        graph
                            .position(e)
                            .is_none_or(|p| origin.distance_xyz(p) <= limit)
                    });
                }
                None => out.retain(|&e| graph.position(e).is_none()),
            }
        }

        if let Some(max) = self.maximum_targets {
            out.truncate(max);
        }
        out
    }
}
