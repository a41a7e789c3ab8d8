//! Requirements on a single entity.

use praxis_foundation::EntityId;
use praxis_storage::{EntityKind, Relation};
use praxis_taxonomy::NodeId;
use praxis_value::{NumericalValueRange, ValueCondition};

use crate::context::EvaluationContext;
use crate::traverse;

/// Restricts the kind of a required entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KindFilter {
    /// Tangible or intangible objects.
    PhysicalObject,
    /// Tangible objects.
    Tangible,
    /// Spaces.
    Space,
    /// Substances, compounds and mixtures.
    Matter,
    /// Compounds and mixtures.
    Composite,
    /// Abstract entities.
    Abstract,
    /// Physical objects and spaces.
    Spatial,
    /// One specific kind.
    Exactly(EntityKind),
}

impl KindFilter {
    /// Returns true if `kind` passes the filter.
    #[must_use]
    pub fn accepts(self, kind: EntityKind) -> bool {
        match self {
            Self::PhysicalObject => kind.is_physical_object(),
            Self::Tangible => kind.is_tangible(),
            Self::Space => kind.is_space(),
            Self::Matter => kind.is_matter(),
            Self::Composite => kind.is_composite(),
            Self::Abstract => kind.is_abstract(),
            Self::Spatial => kind.is_spatial(),
            Self::Exactly(k) => kind == k,
        }
    }
}

/// A condition on one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRequirement {
    /// Attribute category (is-a match).
    pub attribute: NodeId,
    /// Condition on its current value.
    pub condition: ValueCondition,
}

/// A count of members of one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentRequirement {
    /// Collection to count.
    pub relation: Relation,
    /// Only members of this category.
    pub category: Option<NodeId>,
    /// Allowed number of members.
    pub quantity: NumericalValueRange,
}

/// Requirements an entity must meet.
///
/// Every part is optional; an empty requirement accepts any living entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityRequirements {
    /// Category the entity must be a kind of.
    pub category: Option<NodeId>,
    /// Categories the entity must not be a kind of.
    pub excluded_categories: Vec<NodeId>,
    /// Kind restriction.
    pub kind: Option<KindFilter>,
    /// Attribute conditions.
    pub attributes: Vec<AttributeRequirement>,
    /// Allowed matter quantity.
    pub quantity: Option<NumericalValueRange>,
    /// Collection counts.
    pub contents: Vec<ContentRequirement>,
    /// Inverts the result.
    pub should_not_be_satisfied: bool,
}

impl EntityRequirements {
    /// Creates a requirement any living entity meets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to require a category.
    #[must_use]
    pub fn of_category(mut self, category: NodeId) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder method to exclude a category.
    #[must_use]
    pub fn excluding(mut self, category: NodeId) -> Self {
        self.excluded_categories.push(category);
        self
    }

    /// Builder method to restrict the kind.
    #[must_use]
    pub fn of_kind(mut self, kind: KindFilter) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Builder method to add an attribute condition.
    #[must_use]
    pub fn with_attribute(mut self, attribute: NodeId, condition: ValueCondition) -> Self {
        self.attributes.push(AttributeRequirement { attribute, condition });
        self
    }

    /// Builder method to require a matter quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: NumericalValueRange) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Builder method to require a member count.
    #[must_use]
    pub fn with_content(
        mut self,
        relation: Relation,
        category: Option<NodeId>,
        quantity: NumericalValueRange,
    ) -> Self {
        self.contents.push(ContentRequirement {
            relation,
            category,
            quantity,
        });
        self
    }

    /// Builder method to invert the result.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.should_not_be_satisfied = true;
        self
    }

    /// Returns true if `entity` meets the requirements.
    ///
    /// A dead or stale entity never does, even when negated.
    #[must_use]
    pub fn is_satisfied(&self, ctx: &EvaluationContext<'_>, entity: EntityId) -> bool {
        let Some(kind) = ctx.graph().kind(entity) else {
            return false;
        };
        self.check(ctx, entity, kind) != self.should_not_be_satisfied
    }

    #[allow(clippy::cast_precision_loss)]
    fn check(&self, ctx: &EvaluationContext<'_>, entity: EntityId, kind: EntityKind) -> bool {
        let graph = ctx.graph();
        let taxonomy = ctx.taxonomy();

        if !traverse::matches(graph, taxonomy, entity, self.category) {
            return false;
        }
        if self
            .excluded_categories
            .iter()
            .any(|&c| graph.is_of(entity, c, taxonomy))
        {
            return false;
        }
        if self.kind.is_some_and(|filter| !filter.accepts(kind)) {
            return false;
        }

        let attributes_hold = self.attributes.iter().all(|req| {
            graph
                .attribute(entity, req.attribute, taxonomy)
                .is_some_and(|value| req.condition.is_satisfied(value, ctx))
        });
        if !attributes_hold {
            return false;
        }

        if let Some(range) = &self.quantity {
            if !range.is_in_range(graph.quantity(entity), ctx) {
                return false;
            }
        }

        self.contents.iter().all(|req| {
            let count = traverse::members(graph, entity, req.relation)
                .into_iter()
                .filter(|&m| traverse::matches(graph, taxonomy, m, req.category))
                .count();
            req.quantity.is_in_range(count as f64, ctx)
        })
    }
}
