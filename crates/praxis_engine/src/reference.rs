//! Reference definitions: declarative queries from a subject to entities.
//!
//! Results keep discovery order. Duplicates are kept, except that a union
//! does not add entities of its second operand already present.

use praxis_foundation::EntityId;
use praxis_storage::{OwnerKind, Relation, RelationshipRole};
use praxis_taxonomy::NodeId;
use praxis_value::NumericalValueRange;
use rand::Rng;
use tracing::trace;

use crate::config::FarthestSelection;
use crate::context::{EvaluationContext, Subject};
use crate::definitions::ReferenceId;
use crate::traverse;

/// How a spatial reference picks among its candidates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionType {
    /// Every candidate.
    #[default]
    All,
    /// The closest candidates, nearest first.
    Nearest,
    /// The most distant candidates, farthest first.
    Farthest,
    /// Candidates drawn at random without replacement.
    Random,
}

/// How a set reference combines its operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetOperator {
    /// Left, then right entities not already present.
    Union,
    /// Left entities also in right.
    Intersection,
    /// Left entities not in right.
    Complement,
    /// Left entities not in right, then right entities not in left.
    SymmetricDifference,
}

/// What a reference collects from each subject entity.
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceKind {
    /// Physical objects in the subject's world within a distance range.
    Spatial {
        /// Allowed distance from the subject.
        distance: NumericalValueRange,
        /// Selection among the candidates in range.
        selection: SelectionType,
        /// Number of entities to select.
        amount: usize,
        /// Only candidates of this category.
        category: Option<NodeId>,
    },
    /// The subject's spaces.
    Space {
        /// Only spaces of this category.
        category: Option<NodeId>,
    },
    /// Entities at the other end of the subject's relationships.
    Relationship {
        /// Relationship type (is-a match).
        kind: NodeId,
        /// Role the subject plays; both when absent.
        role: Option<RelationshipRole>,
    },
    /// The subject's parts.
    Part {
        /// Only parts of this category.
        category: Option<NodeId>,
    },
    /// The subject's covers.
    Cover {
        /// Only covers of this category.
        category: Option<NodeId>,
    },
    /// The subject's connections.
    Connection {
        /// Only connections of this category.
        category: Option<NodeId>,
    },
    /// Items held in the subject's spaces.
    Item {
        /// Only items of this category.
        category: Option<NodeId>,
    },
    /// The subject itself, if it holds matter of the category.
    Matter {
        /// Matter category.
        category: Option<NodeId>,
    },
    /// The subject's layers.
    Layer {
        /// Only layers of this category.
        category: Option<NodeId>,
    },
    /// The subject's owner.
    Owner(OwnerKind),
    /// A combination of two references; the outer subject is ignored.
    Set {
        /// First operand.
        left: Box<ReferenceBase>,
        /// Combination.
        operator: SetOperator,
        /// Second operand.
        right: Box<ReferenceBase>,
    },
}

/// A named reference definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceBase {
    /// Registry id.
    pub id: ReferenceId,
    /// Where the query starts.
    pub subject: Subject,
    /// What it collects.
    pub kind: ReferenceKind,
}

impl ReferenceBase {
    /// Creates a reference definition.
    #[must_use]
    pub fn new(name: &str, subject: Subject, kind: ReferenceKind) -> Self {
        Self {
            id: ReferenceId::new(name),
            subject,
            kind,
        }
    }

    /// Creates a set reference.
    #[must_use]
    pub fn set(name: &str, left: ReferenceBase, operator: SetOperator, right: ReferenceBase) -> Self {
        Self::new(
            name,
            Subject::Actor,
            ReferenceKind::Set {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
        )
    }

    /// Resolves the reference.
    #[must_use]
    pub fn entities(&self, ctx: &EvaluationContext<'_>) -> Vec<EntityId> {
        let entities = match &self.kind {
            ReferenceKind::Set {
                left,
                operator,
                right,
            } => {
                let left = ctx.nested(Vec::new(), || left.entities(ctx));
                let right = ctx.nested(Vec::new(), || right.entities(ctx));
                combine(left, *operator, &right)
            }
            kind => {
                let mut out = Vec::new();
                for subject in ctx.subject_entities(&self.subject) {
                    collect(ctx, kind, subject, &mut out);
                }
                out
            }
        };
        trace!(reference = %self.id, count = entities.len(), "resolved reference");
        entities
    }
}

fn collect(ctx: &EvaluationContext<'_>, kind: &ReferenceKind, subject: EntityId, out: &mut Vec<EntityId>) {
    let graph = ctx.graph();
    let taxonomy = ctx.taxonomy();
    match kind {
        ReferenceKind::Space { category } => members(ctx, subject, Relation::Spaces, *category, out),
        ReferenceKind::Part { category } => members(ctx, subject, Relation::Parts, *category, out),
        ReferenceKind::Cover { category } => members(ctx, subject, Relation::Covers, *category, out),
        ReferenceKind::Connection { category } => {
            members(ctx, subject, Relation::Connections, *category, out);
        }
        ReferenceKind::Item { category } => members(ctx, subject, Relation::SpaceItems, *category, out),
        ReferenceKind::Layer { category } => members(ctx, subject, Relation::Layers, *category, out),
        ReferenceKind::Matter { category } => {
            if traverse::matter_of(graph, subject)
                .into_iter()
                .any(|m| traverse::matches(graph, taxonomy, m, *category))
            {
                out.push(subject);
            }
        }
        ReferenceKind::Relationship { kind, role } => {
            for side in [RelationshipRole::Source, RelationshipRole::Target] {
                if role.is_some_and(|r| r != side) {
                    continue;
                }
                out.extend(
                    graph
                        .relationships(subject, side)
                        .into_iter()
                        .filter(|r| taxonomy.is_node_of(r.kind, *kind))
                        .map(|r| r.other(side)),
                );
            }
        }
        ReferenceKind::Owner(owner) => out.extend(graph.owner(subject, *owner)),
        ReferenceKind::Spatial {
            distance,
            selection,
            amount,
            category,
        } => out.extend(spatial(ctx, subject, distance, *selection, *amount, *category)),
        ReferenceKind::Set { .. } => {}
    }
}

fn members(
    ctx: &EvaluationContext<'_>,
    subject: EntityId,
    relation: Relation,
    category: Option<NodeId>,
    out: &mut Vec<EntityId>,
) {
    let graph = ctx.graph();
    out.extend(
        traverse::members(graph, subject, relation)
            .into_iter()
            .filter(|&m| traverse::matches(graph, ctx.taxonomy(), m, category)),
    );
}

fn spatial(
    ctx: &EvaluationContext<'_>,
    subject: EntityId,
    distance: &NumericalValueRange,
    selection: SelectionType,
    amount: usize,
    category: Option<NodeId>,
) -> Vec<EntityId> {
    let graph = ctx.graph();
    let Some(origin) = graph.position(subject) else {
        return Vec::new();
    };
    let mut candidates: Vec<(EntityId, f64)> = graph
        .instances_in_world_of(subject)
        .into_iter()
        .filter(|&e| e != subject)
        .filter(|&e| graph.kind(e).is_some_and(|k| k.is_physical_object()))
        .filter(|&e| traverse::matches(graph, ctx.taxonomy(), e, category))
        .filter_map(|e| graph.position(e).map(|p| (e, origin.distance_squared_xyz(p))))
        .filter(|&(_, d2)| distance.is_in_range_squared(d2, ctx))
        .collect();

    match selection {
        SelectionType::All => candidates.into_iter().map(|(e, _)| e).collect(),
        _ if candidates.len() <= amount => candidates.into_iter().map(|(e, _)| e).collect(),
        SelectionType::Nearest => {
            candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
            candidates.into_iter().take(amount).map(|(e, _)| e).collect()
        }
        SelectionType::Farthest => {
            candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
            match ctx.config().farthest_selection {
                FarthestSelection::MostDistant => candidates
                    .into_iter()
                    .rev()
                    .take(amount)
                    .map(|(e, _)| e)
                    .collect(),
                FarthestSelection::Legacy => (1..=amount)
                    .rev()
                    .map(|i| candidates[i].0)
                    .collect(),
            }
        }
        SelectionType::Random => ctx.with_rng(|rng| {
            let mut picked = Vec::with_capacity(amount);
            while picked.len() < amount {
                let index = rng.gen_range(0..candidates.len());
                picked.push(candidates.remove(index).0);
            }
            picked
        }),
    }
}

fn combine(left: Vec<EntityId>, operator: SetOperator, right: &[EntityId]) -> Vec<EntityId> {
    match operator {
        SetOperator::Union => {
            let mut out = left;
            for &e in right {
                traverse::push_unique(&mut out, e);
            }
            out
        }
        SetOperator::Intersection => left.into_iter().filter(|e| right.contains(e)).collect(),
        SetOperator::Complement => left.into_iter().filter(|e| !right.contains(e)).collect(),
        SetOperator::SymmetricDifference => {
            let mut out: Vec<EntityId> = left.iter().copied().filter(|e| !right.contains(e)).collect();
            out.extend(right.iter().copied().filter(|e| !left.contains(e)));
            out
        }
    }
}
