//! Variable definitions and their resolution against a binding.
//!
//! A variable answers with a [`Primitive`] of whatever kind the caller asks
//! for. Missing entities, missing attributes and non-spatial distance
//! endpoints all resolve to the requested kind's zero value.

use std::collections::HashSet;
use std::sync::Arc;

use praxis_foundation::{EntityId, Primitive, PrimitiveKind, Vector4};
use praxis_storage::{EntityGraph, Relation};
use praxis_taxonomy::NodeId;
use praxis_value::VariableId;

use crate::context::{EvaluationContext, Subject};
use crate::definitions::ReferenceId;
use crate::traverse;

/// Where a variable reads its entities from.
pub type VariableSource = Subject;

/// Collections a count variable can tally.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountRelation {
    /// The entity's spaces.
    Spaces,
    /// Items held in the entity's spaces.
    SpaceItems,
    /// Parts.
    Parts,
    /// Covers.
    Covers,
    /// Connections.
    Connections,
    /// Layers.
    Layers,
    /// All of the above.
    Everything,
}

impl CountRelation {
    const EVERYTHING: [Relation; 6] = [
        Relation::Spaces,
        Relation::SpaceItems,
        Relation::Parts,
        Relation::Covers,
        Relation::Connections,
        Relation::Layers,
    ];

    fn relations(self) -> &'static [Relation] {
        match self {
            Self::Spaces => &[Relation::Spaces],
            Self::SpaceItems => &[Relation::SpaceItems],
            Self::Parts => &[Relation::Parts],
            Self::Covers => &[Relation::Covers],
            Self::Connections => &[Relation::Connections],
            Self::Layers => &[Relation::Layers],
            Self::Everything => &Self::EVERYTHING,
        }
    }
}

/// The far end of a distance variable; the near end is always the actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistanceTarget {
    /// The bound target.
    Target,
    /// The bound artifact.
    Artifact,
    /// The first spatial entity of a reference.
    Reference(ReferenceId),
}

/// How a variable computes its value.
#[derive(Clone, Debug, PartialEq)]
pub enum VariableKind {
    /// Current value of an attribute. A reference source reads its first entity.
    Attribute {
        /// Entity to read.
        source: VariableSource,
        /// Attribute category (is-a match).
        attribute: NodeId,
    },
    /// Number of members of a collection, summed over the source entities.
    Count {
        /// Entities to count from.
        source: VariableSource,
        /// Collection to count.
        relation: CountRelation,
        /// Only members of this category.
        category: Option<NodeId>,
    },
    /// Total quantity of matter of a category, including nested substances.
    Quantity {
        /// Entities holding the matter.
        source: VariableSource,
        /// Only matter of this category.
        category: Option<NodeId>,
    },
    /// An attribute summed over the whole containment tree.
    Sum {
        /// Roots of the fold.
        source: VariableSource,
        /// Attribute category (is-a match).
        attribute: NodeId,
    },
    /// Distance from the actor.
    Distance(DistanceTarget),
    /// A constant.
    Fixed(Primitive),
    /// A value supplied from outside the simulation.
    RequiresManualInput(Arc<str>),
}

/// A named variable definition.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableBase {
    /// Registry id.
    pub id: VariableId,
    /// How the value is computed.
    pub kind: VariableKind,
}

/// Relations the sum fold descends through.
const CONTAINMENT: [Relation; 5] = [
    Relation::Spaces,
    Relation::SpaceItems,
    Relation::Parts,
    Relation::Covers,
    Relation::Layers,
];

impl VariableBase {
    /// Creates a variable definition.
    #[must_use]
    pub fn new(name: &str, kind: VariableKind) -> Self {
        Self {
            id: VariableId::new(name),
            kind,
        }
    }

    /// Resolves the variable as a value of `kind`.
    #[must_use]
    pub fn resolve(&self, ctx: &EvaluationContext<'_>, kind: PrimitiveKind) -> Primitive {
        let graph = ctx.graph();
        let value = match &self.kind {
            VariableKind::Attribute { source, attribute } => ctx
                .subject_entities(source)
                .first()
                .and_then(|&entity| graph.attribute(entity, *attribute, ctx.taxonomy()))
                .map(|instance| instance.primitive(ctx)),
            VariableKind::Count {
                source,
                relation,
                category,
            } => Some(Primitive::Number(count(ctx, source, *relation, *category))),
            VariableKind::Quantity { source, category } => {
                Some(Primitive::Number(quantity(ctx, source, *category)))
            }
            VariableKind::Sum { source, attribute } => {
                Some(Primitive::Number(sum(ctx, source, *attribute)))
            }
            VariableKind::Distance(to) => distance(ctx, to).map(Primitive::Number),
            VariableKind::Fixed(value) => Some(value.clone()),
            VariableKind::RequiresManualInput(name) => return ctx.manual_input(name, kind),
        };
        value.map_or_else(|| Primitive::default_for(kind), |v| v.coerce(kind))
    }
}

#[allow(clippy::cast_precision_loss)]
fn count(
    ctx: &EvaluationContext<'_>,
    source: &VariableSource,
    relation: CountRelation,
    category: Option<NodeId>,
) -> f64 {
    let graph = ctx.graph();
    let total: usize = ctx
        .subject_entities(source)
        .into_iter()
        .map(|entity| {
            relation
                .relations()
                .iter()
                .flat_map(|&r| traverse::members(graph, entity, r))
                .filter(|&m| traverse::matches(graph, ctx.taxonomy(), m, category))
                .count()
        })
        .sum();
    total as f64
}

fn quantity(ctx: &EvaluationContext<'_>, source: &VariableSource, category: Option<NodeId>) -> f64 {
    let graph = ctx.graph();
    let mut visited = HashSet::new();
    let mut total = 0.0;
    for entity in ctx.subject_entities(source) {
        let mut stack = if graph.kind(entity).is_some_and(|k| k.is_matter()) {
            vec![entity]
        } else {
            traverse::matter_of(graph, entity)
        };
        while let Some(matter) = stack.pop() {
            if !visited.insert(matter) {
                continue;
            }
            if traverse::matches(graph, ctx.taxonomy(), matter, category) {
                total += graph.quantity(matter);
            } else {
                stack.extend(graph.related(matter, Relation::Substances).iter().rev());
            }
        }
    }
    total
}

fn sum(ctx: &EvaluationContext<'_>, source: &VariableSource, attribute: NodeId) -> f64 {
    let graph = ctx.graph();
    let mut visited = HashSet::new();
    let mut total = 0.0;
    for root in ctx.subject_entities(source) {
        let mut stack = vec![root];
        while let Some(entity) = stack.pop() {
            if !visited.insert(entity) {
                continue;
            }
            if let Some(value) = graph.attribute(entity, attribute, ctx.taxonomy()) {
                total += value.primitive(ctx).as_number();
            }
            for relation in CONTAINMENT.iter().rev() {
                stack.extend(graph.related(entity, *relation).iter().rev());
            }
        }
    }
    total
}

fn distance(ctx: &EvaluationContext<'_>, to: &DistanceTarget) -> Option<f64> {
    let graph = ctx.graph();
    let from = spatial_position(graph, ctx.binding().actor?)?;
    let to = match to {
        DistanceTarget::Target => spatial_position(graph, ctx.binding().target?),
        DistanceTarget::Artifact => spatial_position(graph, ctx.binding().artifact?),
        DistanceTarget::Reference(id) => ctx
            .reference_entities(id)
            .into_iter()
            .find_map(|entity| spatial_position(graph, entity)),
    }?;
    Some(from.distance_xyz(to))
}

fn spatial_position(graph: &dyn EntityGraph, entity: EntityId) -> Option<Vector4> {
    graph
        .kind(entity)
        .filter(|k| k.is_spatial())
        .and_then(|_| graph.position(entity))
}
