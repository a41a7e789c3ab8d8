//! Requirements on what changed since the previous simulation step.

use std::collections::HashSet;

use praxis_foundation::EntityId;
use praxis_storage::{ChangeChannel, EntityGraph, RelationshipInstance};
use praxis_taxonomy::NodeId;
use praxis_value::{DualEqualitySign, NumericalValueRange};

use crate::context::EvaluationContext;
use crate::requirement::entity::EntityRequirements;
use crate::traverse;

/// Whether a change added or removed members.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChangeDirection {
    /// Members added since the previous step.
    Added,
    /// Members removed since the previous step.
    Removed,
}

/// Which changes count toward a requirement.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ChangeFilter {
    /// Every change.
    #[default]
    Any,
    /// Changed entities meeting the requirements.
    Entity(EntityRequirements),
    /// Changed relationships whose type is a kind of this node.
    RelationshipType(NodeId),
}

/// One row of the add/remove table.
#[derive(Clone, Debug, PartialEq)]
pub struct AddRemoveRequirement {
    /// Collection watched.
    pub channel: ChangeChannel,
    /// Additions or removals.
    pub direction: ChangeDirection,
    /// How many matching changes are needed; one when absent.
    pub quantity: Option<NumericalValueRange>,
    /// Which changes count.
    pub condition: ChangeFilter,
}

impl AddRemoveRequirement {
    /// Requires one matching change.
    #[must_use]
    pub fn new(channel: ChangeChannel, direction: ChangeDirection) -> Self {
        Self {
            channel,
            direction,
            quantity: None,
            condition: ChangeFilter::Any,
        }
    }

    /// Builder method to set the required number of changes.
    #[must_use]
    pub fn with_quantity(mut self, quantity: NumericalValueRange) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Builder method to filter the changes.
    #[must_use]
    pub fn with_condition(mut self, condition: ChangeFilter) -> Self {
        self.condition = condition;
        self
    }

    /// Number of matching changes needed.
    ///
    /// The lowest count the quantity range admits; one when there is no
    /// range or the range has no lower bound.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn required_quantity(&self, ctx: &EvaluationContext<'_>) -> i64 {
        let Some(range) = &self.quantity else {
            return 1;
        };
        let low = range.min(ctx);
        match range.sign {
            DualEqualitySign::Greater | DualEqualitySign::NotEqual => low.floor() as i64 + 1,
            DualEqualitySign::Equal | DualEqualitySign::GreaterOrEqual | DualEqualitySign::Between => {
                low.ceil() as i64
            }
            DualEqualitySign::Less | DualEqualitySign::LessOrEqual | DualEqualitySign::NotBetween => 1,
        }
    }

    /// Returns true if enough matching changes happened on `entity`.
    #[must_use]
    pub fn is_satisfied(&self, ctx: &EvaluationContext<'_>, entity: EntityId) -> bool {
        let mut remaining = self.required_quantity(ctx);
        if remaining <= 0 {
            return true;
        }
        let graph = ctx.graph();

        if self.channel == ChangeChannel::Relationships {
            for relationship in self.changed_relationships(graph, entity) {
                if self.relationship_counts(ctx, relationship) {
                    remaining -= 1;
                    if remaining <= 0 {
                        return true;
                    }
                }
            }
            return false;
        }

        let mut seen = HashSet::new();
        for holder in self.holders(graph, entity) {
            for &changed in self.changed(graph, holder) {
                if seen.insert(changed) && self.entity_counts(ctx, changed) {
                    remaining -= 1;
                    if remaining <= 0 {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// The entity, plus its spaces for space-held collections.
    fn holders(&self, graph: &dyn EntityGraph, entity: EntityId) -> Vec<EntityId> {
        let mut holders = vec![entity];
        if matches!(self.channel, ChangeChannel::SpaceItems | ChangeChannel::TangibleMatter) {
            for space in traverse::spaces_of(graph, entity) {
                traverse::push_unique(&mut holders, space);
            }
        }
        holders
    }

    fn changed<'g>(&self, graph: &'g dyn EntityGraph, holder: EntityId) -> &'g [EntityId] {
        match self.direction {
            ChangeDirection::Added => graph.added(holder, self.channel),
            ChangeDirection::Removed => graph.removed(holder, self.channel),
        }
    }

    fn changed_relationships<'g>(
        &self,
        graph: &'g dyn EntityGraph,
        entity: EntityId,
    ) -> &'g [RelationshipInstance] {
        match self.direction {
            ChangeDirection::Added => graph.added_relationships(entity),
            ChangeDirection::Removed => graph.removed_relationships(entity),
        }
    }

    fn entity_counts(&self, ctx: &EvaluationContext<'_>, changed: EntityId) -> bool {
        match &self.condition {
            ChangeFilter::Any => true,
            ChangeFilter::Entity(requirements) => requirements.is_satisfied(ctx, changed),
            ChangeFilter::RelationshipType(_) => false,
        }
    }

    fn relationship_counts(&self, ctx: &EvaluationContext<'_>, relationship: &RelationshipInstance) -> bool {
        match &self.condition {
            ChangeFilter::Any => true,
            ChangeFilter::RelationshipType(kind) => ctx.taxonomy().is_node_of(relationship.kind, *kind),
            ChangeFilter::Entity(requirements) => {
                requirements.is_satisfied(ctx, relationship.source)
                    || requirements.is_satisfied(ctx, relationship.target)
            }
        }
    }
}

/// Table of add/remove requirements, one row per channel and direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddRemoveRequirementsBase {
    requirements: Vec<AddRemoveRequirement>,
}

impl AddRemoveRequirementsBase {
    /// Creates an empty table, which is always satisfied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a row, replacing any row for the same channel
    /// and direction.
    #[must_use]
    pub fn with(mut self, requirement: AddRemoveRequirement) -> Self {
        if let Some(row) = self
            .requirements
            .iter_mut()
            .find(|r| r.channel == requirement.channel && r.direction == requirement.direction)
        {
            *row = requirement;
        } else {
            self.requirements.push(requirement);
        }
        self
    }

    /// The rows, in evaluation order.
    #[must_use]
    pub fn requirements(&self) -> &[AddRemoveRequirement] {
        &self.requirements
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Returns true if every row is satisfied for `entity`.
    #[must_use]
    pub fn is_satisfied(&self, ctx: &EvaluationContext<'_>, entity: EntityId) -> bool {
        self.requirements.iter().all(|r| r.is_satisfied(ctx, entity))
    }
}
