//! Integration tests for references

use praxis_engine::{
    Binding, Definitions, EngineConfig, EvaluationContext, ReferenceBase, ReferenceId,
    ReferenceKind, SelectionType, SetOperator, Subject,
};
use praxis_foundation::EntityId;
use praxis_storage::{OwnerKind, RelationshipRole};
use praxis_taxonomy::NodeId;
use praxis_value::{DualEqualitySign, NumericalValueRange};

use crate::{node, Tavern};

fn within(distance: f64) -> NumericalValueRange {
    NumericalValueRange::literal(DualEqualitySign::LessOrEqual, distance, None)
}

fn around(name: &str, distance: f64, selection: SelectionType, amount: usize, category: Option<NodeId>) -> ReferenceBase {
    ReferenceBase::new(
        name,
        Subject::Actor,
        ReferenceKind::Spatial {
            distance: within(distance),
            selection,
            amount,
            category,
        },
    )
}

fn sorted(mut entities: Vec<EntityId>) -> Vec<EntityId> {
    entities.sort();
    entities
}

// =============================================================================
// Spatial
// =============================================================================

#[test]
fn all_within_range() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));

    let close_by = around("close_by", 2.0, SelectionType::All, 0, None).entities(&ctx);
    assert_eq!(sorted(close_by), sorted(vec![t.table, t.mug]));
}

#[test]
fn nearest_and_farthest() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));

    let nearest = around("nearest", 10.0, SelectionType::Nearest, 2, None).entities(&ctx);
    assert_eq!(nearest, vec![t.table, t.mug]);

    let farthest = around("farthest", 10.0, SelectionType::Farthest, 2, None).entities(&ctx);
    assert_eq!(farthest, vec![t.chair, t.patron]);
}

#[test]
fn amount_larger_than_candidates_returns_everything() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));

    let furniture = around("furniture", 100.0, SelectionType::Nearest, 5, Some(node(&t.tax, "furniture"))).entities(&ctx);
    assert_eq!(sorted(furniture), sorted(vec![t.table, t.chair]));
}

#[test]
fn random_selection_is_seeded() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let pick = |seed| {
        let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep))
            .with_config(EngineConfig::deterministic(seed));
        around("any_two", 10.0, SelectionType::Random, 2, None).entities(&ctx)
    };

    let first = pick(11);
    assert_eq!(first.len(), 2);
    assert_ne!(first[0], first[1]);
    assert!(first.iter().all(|e| [t.patron, t.table, t.mug, t.chair].contains(e)));
    assert_eq!(pick(11), first);
}

#[test]
fn entities_without_a_position_see_nothing() {
    let t = Tavern::new();
    let defs = Definitions::new();
    // Matter is not spatial.
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.ale));
    assert!(around("nothing", 100.0, SelectionType::All, 0, None).entities(&ctx).is_empty());
}

// =============================================================================
// Structural
// =============================================================================

#[test]
fn items_and_owners() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let binding = Binding::actor(t.barkeep).with_target(t.table).with_artifact(t.mug);
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, binding);

    let items = ReferenceBase::new("on_table", Subject::Target, ReferenceKind::Item { category: None });
    assert_eq!(items.entities(&ctx), vec![t.mug]);

    let resting_on = ReferenceBase::new("resting_on", Subject::Artifact, ReferenceKind::Owner(OwnerKind::SpaceOfItem));
    assert_eq!(resting_on.entities(&ctx), vec![t.tabletop]);

    let spaces = ReferenceBase::new("surfaces", Subject::Target, ReferenceKind::Space { category: Some(node(&t.tax, "surface")) });
    assert_eq!(spaces.entities(&ctx), vec![t.tabletop]);

    let held = ReferenceBase::new("with_ale", Subject::Artifact, ReferenceKind::Matter { category: Some(node(&t.tax, "ale")) });
    assert_eq!(held.entities(&ctx), vec![t.mug]);
}

#[test]
fn relationships_by_role() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.patron));

    let served_by = ReferenceBase::new(
        "served_by",
        Subject::Actor,
        ReferenceKind::Relationship {
            kind: node(&t.tax, "serves"),
            role: Some(RelationshipRole::Target),
        },
    );
    assert_eq!(served_by.entities(&ctx), vec![t.barkeep]);

    let serving = ReferenceBase::new(
        "serving",
        Subject::Actor,
        ReferenceKind::Relationship {
            kind: node(&t.tax, "serves"),
            role: Some(RelationshipRole::Source),
        },
    );
    assert!(serving.entities(&ctx).is_empty());
}

// =============================================================================
// Sets and the Registry
// =============================================================================

#[test]
fn furniture_not_owned() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_reference(ReferenceBase::set(
        "spare_furniture",
        around("furniture", 100.0, SelectionType::All, 0, Some(node(&t.tax, "furniture"))),
        SetOperator::Complement,
        ReferenceBase::new(
            "owned",
            Subject::Actor,
            ReferenceKind::Relationship {
                kind: node(&t.tax, "owns"),
                role: Some(RelationshipRole::Source),
            },
        ),
    ))
    .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));
    assert_eq!(ctx.reference_entities(&ReferenceId::new("spare_furniture")), vec![t.chair]);
}

#[test]
fn set_identities() {
    let t = Tavern::new();
    let defs = Definitions::new();
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));
    let r = || around("r", 10.0, SelectionType::Nearest, 3, None);
    let base = r().entities(&ctx);

    let combine = |op| ReferenceBase::set("s", r(), op, r()).entities(&ctx);
    assert_eq!(combine(SetOperator::Union), base);
    assert_eq!(combine(SetOperator::Intersection), base);
    assert!(combine(SetOperator::Complement).is_empty());
    assert!(combine(SetOperator::SymmetricDifference).is_empty());
}

#[test]
fn references_can_start_from_other_references() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_reference(ReferenceBase::new(
        "owned",
        Subject::Actor,
        ReferenceKind::Relationship {
            kind: node(&t.tax, "owns"),
            role: Some(RelationshipRole::Source),
        },
    ))
    .unwrap();
    defs.register_reference(ReferenceBase::new(
        "on_owned",
        Subject::Reference(ReferenceId::new("owned")),
        ReferenceKind::Item { category: None },
    ))
    .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));
    assert_eq!(ctx.reference_entities(&ReferenceId::new("on_owned")), vec![t.mug]);
    assert!(ctx.reference_entities(&ReferenceId::new("unknown")).is_empty());
}
