//! Event requirements: the full precondition of an event.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. actor, target and artifact requirements
//! 2. reference requirements
//! 3. extension conditions
//! 4. collision
//! 5. relationships, per role pair
//! 6. distances, per role pair
//! 7. add/remove requirements on the actor (automatic events only)
//! 8. structural checks
//!
//! The result is then inverted if the event should not be satisfied.
//! Unconfigured checks pass; a configured check whose role is unbound fails.

use std::sync::Arc;

use praxis_foundation::EntityId;
use praxis_storage::{OwnerKind, Relation, RelationshipRole};
use praxis_taxonomy::NodeId;
use praxis_value::NumericalValueRange;
use tracing::{debug, warn};

use crate::context::{EvaluationContext, Role};
use crate::definitions::ReferenceId;
use crate::requirement::add_remove::AddRemoveRequirementsBase;
use crate::requirement::entity::EntityRequirements;
use crate::traverse;

/// Two distinct roles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RolePair {
    /// Actor and target.
    ActorTarget,
    /// Actor and artifact.
    ActorArtifact,
    /// Target and artifact.
    TargetArtifact,
}

impl RolePair {
    /// All pairs, in evaluation order.
    pub const ALL: [Self; 3] = [Self::ActorTarget, Self::ActorArtifact, Self::TargetArtifact];

    /// The two roles.
    #[must_use]
    pub const fn roles(self) -> (Role, Role) {
        match self {
            Self::ActorTarget => (Role::Actor, Role::Target),
            Self::ActorArtifact => (Role::Actor, Role::Artifact),
            Self::TargetArtifact => (Role::Target, Role::Artifact),
        }
    }

    /// The role paired with `role`, if `role` belongs to the pair.
    #[must_use]
    pub fn other(self, role: Role) -> Option<Role> {
        let (a, b) = self.roles();
        if role == a {
            Some(b)
        } else if role == b {
            Some(a)
        } else {
            None
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::ActorTarget => 0,
            Self::ActorArtifact => 1,
            Self::TargetArtifact => 2,
        }
    }

    fn entities(self, ctx: &EvaluationContext<'_>) -> Option<(EntityId, EntityId)> {
        let (a, b) = self.roles();
        Some((ctx.entity(a)?, ctx.entity(b)?))
    }
}

/// Requirements every entity of a reference must meet.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceRequirement {
    /// The registered reference.
    pub reference: ReferenceId,
    /// Requirements on each of its entities.
    pub requirements: EntityRequirements,
}

/// A registered extension condition applied to one role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionRequirement {
    /// Registry name of the condition.
    pub name: Arc<str>,
    /// Role whose entity is tested.
    pub role: Role,
}

/// A relationship that must exist between the two roles of a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RelationshipRequirement {
    /// Relationship type (is-a match).
    pub kind: NodeId,
    /// Role that must be the relationship's source.
    pub source: Role,
}

impl RelationshipRequirement {
    fn is_satisfied(&self, ctx: &EvaluationContext<'_>, pair: RolePair) -> bool {
        let Some(target) = pair.other(self.source) else {
            return false;
        };
        let (Some(source), Some(target)) = (ctx.entity(self.source), ctx.entity(target)) else {
            return false;
        };
        ctx.graph()
            .relationships(source, RelationshipRole::Source)
            .iter()
            .any(|r| r.target == target && ctx.taxonomy().is_node_of(r.kind, self.kind))
    }
}

/// A structural test on bound entities.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StructuralCheck {
    /// Whether `member` belongs to `holder`'s collection.
    HasAs {
        /// Role owning the collection.
        holder: Role,
        /// The collection.
        relation: Relation,
        /// Role of the expected member.
        member: Role,
        /// Required outcome.
        expected: bool,
    },
    /// Whether the entity is used in some capacity (it has that owner).
    UsedAs {
        /// Role tested.
        role: Role,
        /// Capacity, as the inverse lookup it implies.
        usage: OwnerKind,
        /// Required outcome.
        expected: bool,
    },
}

impl StructuralCheck {
    fn is_satisfied(&self, ctx: &EvaluationContext<'_>) -> bool {
        let graph = ctx.graph();
        match *self {
            Self::HasAs {
                holder,
                relation,
                member,
                expected,
            } => match (ctx.entity(holder), ctx.entity(member)) {
                (Some(h), Some(m)) => traverse::members(graph, h, relation).contains(&m) == expected,
                _ => false,
            },
            Self::UsedAs { role, usage, expected } => ctx
                .entity(role)
                .is_some_and(|e| graph.owner(e, usage).is_some() == expected),
        }
    }
}

/// The check that decided an evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailedCheck {
    /// Requirements on a role.
    Role(Role),
    /// Requirements on a reference's entities.
    Reference(ReferenceId),
    /// An extension condition.
    Extension(Arc<str>),
    /// The collision test.
    Collision,
    /// A relationship requirement.
    Relationship(RolePair),
    /// A distance requirement.
    Spatial(RolePair),
    /// The add/remove table.
    AddRemove,
    /// A structural check, by position.
    Structural(usize),
}

/// Result of evaluating event requirements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequirementOutcome {
    /// Final answer, negation applied.
    pub satisfied: bool,
    /// First failing check, before negation.
    pub failed: Option<FailedCheck>,
}

/// Requirements for an event to fire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventRequirementsBase {
    /// Name used in logs.
    pub name: Arc<str>,
    /// Requirements on the actor.
    pub actor: Option<EntityRequirements>,
    /// Requirements on the target.
    pub target: Option<EntityRequirements>,
    /// Requirements on the artifact.
    pub artifact: Option<EntityRequirements>,
    /// Requirements on referenced entities.
    pub references: Vec<ReferenceRequirement>,
    /// Extension conditions.
    pub extensions: Vec<ExtensionRequirement>,
    /// Pair that must be colliding.
    pub collision: Option<RolePair>,
    /// Relationship requirements, indexed by role pair.
    pub relationships: [Option<RelationshipRequirement>; 3],
    /// Distance ranges, indexed by role pair.
    pub spatial: [Option<NumericalValueRange>; 3],
    /// Changes the actor must have seen.
    pub add_remove: Option<AddRemoveRequirementsBase>,
    /// Whether the event fires on its own rather than being chosen.
    pub automatic: bool,
    /// Structural checks, in order.
    pub structural: Vec<StructuralCheck>,
    /// Inverts the result.
    pub should_not_be_satisfied: bool,
}

impl EventRequirementsBase {
    /// Creates requirements that are always satisfied.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the actor requirements.
    #[must_use]
    pub fn with_actor(mut self, requirements: EntityRequirements) -> Self {
        self.actor = Some(requirements);
        self
    }

    /// Builder method to set the target requirements.
    #[must_use]
    pub fn with_target(mut self, requirements: EntityRequirements) -> Self {
        self.target = Some(requirements);
        self
    }

    /// Builder method to set the artifact requirements.
    #[must_use]
    pub fn with_artifact(mut self, requirements: EntityRequirements) -> Self {
        self.artifact = Some(requirements);
        self
    }

    /// Builder method to require something of every entity of a reference.
    #[must_use]
    pub fn with_reference(mut self, reference: &str, requirements: EntityRequirements) -> Self {
        self.references.push(ReferenceRequirement {
            reference: ReferenceId::new(reference),
            requirements,
        });
        self
    }

    /// Builder method to apply a registered extension condition.
    #[must_use]
    pub fn with_extension(mut self, name: &str, role: Role) -> Self {
        self.extensions.push(ExtensionRequirement {
            name: name.into(),
            role,
        });
        self
    }

    /// Builder method to require a collision.
    #[must_use]
    pub fn with_collision(mut self, pair: RolePair) -> Self {
        self.collision = Some(pair);
        self
    }

    /// Builder method to require a relationship between a pair.
    #[must_use]
    pub fn with_relationship(mut self, pair: RolePair, kind: NodeId, source: Role) -> Self {
        self.relationships[pair.index()] = Some(RelationshipRequirement { kind, source });
        self
    }

    /// Builder method to require a distance between a pair.
    #[must_use]
    pub fn with_spatial(mut self, pair: RolePair, distance: NumericalValueRange) -> Self {
        self.spatial[pair.index()] = Some(distance);
        self
    }

    /// Builder method to require changes on the actor.
    #[must_use]
    pub fn with_add_remove(mut self, table: AddRemoveRequirementsBase) -> Self {
        self.add_remove = Some(table);
        self
    }

    /// Builder method to mark the event automatic.
    #[must_use]
    pub fn automatic(mut self) -> Self {
        self.automatic = true;
        self
    }

    /// Builder method to add a structural check.
    #[must_use]
    pub fn with_structural(mut self, check: StructuralCheck) -> Self {
        self.structural.push(check);
        self
    }

    /// Builder method to invert the result.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.should_not_be_satisfied = true;
        self
    }

    /// Returns true if the event may fire.
    #[must_use]
    pub fn is_satisfied(&self, ctx: &EvaluationContext<'_>) -> bool {
        self.check(ctx).satisfied
    }

    /// Evaluates the requirements, reporting the deciding check.
    #[must_use]
    pub fn check(&self, ctx: &EvaluationContext<'_>) -> RequirementOutcome {
        let failed = self.first_failure(ctx);
        let satisfied = failed.is_none() != self.should_not_be_satisfied;
        if !satisfied && ctx.config().trace_failures {
            debug!(
                event = %self.name,
                failed = ?failed,
                negated = self.should_not_be_satisfied,
                "event requirements not satisfied"
            );
        }
        RequirementOutcome { satisfied, failed }
    }

    fn role_requirements(&self, role: Role) -> Option<&EntityRequirements> {
        match role {
            Role::Actor => self.actor.as_ref(),
            Role::Target => self.target.as_ref(),
            Role::Artifact => self.artifact.as_ref(),
        }
    }

    fn first_failure(&self, ctx: &EvaluationContext<'_>) -> Option<FailedCheck> {
        let graph = ctx.graph();

        for role in Role::ALL {
            if let Some(requirements) = self.role_requirements(role) {
                if !ctx.entity(role).is_some_and(|e| requirements.is_satisfied(ctx, e)) {
                    return Some(FailedCheck::Role(role));
                }
            }
        }

        for req in &self.references {
            let entities = ctx.reference_entities(&req.reference);
            if !entities.into_iter().all(|e| req.requirements.is_satisfied(ctx, e)) {
                return Some(FailedCheck::Reference(req.reference.clone()));
            }
        }

        for req in &self.extensions {
            let Some(condition) = ctx.definitions().extension(&req.name) else {
                warn!(extension = %req.name, "unknown extension condition");
                continue;
            };
            if !ctx
                .entity(req.role)
                .is_some_and(|e| condition.is_satisfied(ctx, req.role, e))
            {
                return Some(FailedCheck::Extension(Arc::clone(&req.name)));
            }
        }

        if let (Some(pair), Some(collider)) = (self.collision, ctx.collider()) {
            if !pair.entities(ctx).is_some_and(|(a, b)| collider.collide(a, b)) {
                return Some(FailedCheck::Collision);
            }
        }

        for pair in RolePair::ALL {
            if let Some(req) = &self.relationships[pair.index()] {
                if !req.is_satisfied(ctx, pair) {
                    return Some(FailedCheck::Relationship(pair));
                }
            }
        }

        for pair in RolePair::ALL {
            if let Some(range) = &self.spatial[pair.index()] {
                let in_range = pair
                    .entities(ctx)
                    .and_then(|(a, b)| Some(graph.position(a)?.distance_squared_xyz(graph.position(b)?)))
                    .is_some_and(|d2| range.is_in_range_squared(d2, ctx));
                if !in_range {
                    return Some(FailedCheck::Spatial(pair));
                }
            }
        }

        if let Some(table) = self.add_remove.as_ref().filter(|_| self.automatic) {
            if !ctx.entity(Role::Actor).is_some_and(|a| table.is_satisfied(ctx, a)) {
                return Some(FailedCheck::AddRemove);
            }
        }

        self.structural
            .iter()
            .position(|check| !check.is_satisfied(ctx))
            .map(FailedCheck::Structural)
    }
}
