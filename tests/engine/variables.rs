//! Integration tests for variables resolved through an evaluation context

use praxis_engine::{
    Binding, CountRelation, Definitions, DistanceTarget, EvaluationContext, ManualInputProvider,
    ReferenceBase, ReferenceId, ReferenceKind, Subject, VariableBase, VariableKind,
};
use praxis_foundation::{Primitive, PrimitiveKind};
use praxis_value::{VariableId, VariableScope};

use crate::{node, Tavern};

fn resolve(ctx: &EvaluationContext<'_>, name: &str) -> f64 {
    ctx.resolve(&VariableId::new(name), PrimitiveKind::Number).as_number()
}

fn close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

// =============================================================================
// Entity-backed Variables
// =============================================================================

#[test]
fn attribute_of_a_role() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new(
        "target_hunger",
        VariableKind::Attribute {
            source: Subject::Target,
            attribute: node(&t.tax, "hunger"),
        },
    ))
    .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep).with_target(t.patron));
    close(resolve(&ctx, "target_hunger"), 70.0);
}

#[test]
fn count_items_on_the_table() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new(
        "vessels",
        VariableKind::Count {
            source: Subject::Target,
            relation: CountRelation::SpaceItems,
            category: Some(node(&t.tax, "vessel")),
        },
    ))
    .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep).with_target(t.table));
    close(resolve(&ctx, "vessels"), 1.0);
}

#[test]
fn quantity_reaches_matter_in_spaces() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new(
        "liquid_left",
        VariableKind::Quantity {
            source: Subject::Artifact,
            category: Some(node(&t.tax, "liquid")),
        },
    ))
    .unwrap();

    let binding = Binding::actor(t.barkeep).with_artifact(t.mug);
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, binding);
    close(resolve(&ctx, "liquid_left"), 0.4);
}

#[test]
fn sum_folds_over_contents() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new(
        "load",
        VariableKind::Sum {
            source: Subject::Target,
            attribute: node(&t.tax, "weight"),
        },
    ))
    .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep).with_target(t.table));
    // Table plus the mug on its tabletop.
    close(resolve(&ctx, "load"), 20.5);
}

#[test]
fn distance_to_a_referenced_entity() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_reference(ReferenceBase::new(
        "customer",
        Subject::Actor,
        ReferenceKind::Relationship {
            kind: node(&t.tax, "serves"),
            role: None,
        },
    ))
    .unwrap();
    defs.register_variable(VariableBase::new(
        "to_customer",
        VariableKind::Distance(DistanceTarget::Reference(ReferenceId::new("customer"))),
    ))
    .unwrap();
    defs.register_variable(VariableBase::new("to_target", VariableKind::Distance(DistanceTarget::Target)))
        .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep).with_target(t.chair));
    close(resolve(&ctx, "to_customer"), 3.0);
    close(resolve(&ctx, "to_target"), 6.0);
}

#[test]
fn distance_without_a_target_is_zero() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new("to_target", VariableKind::Distance(DistanceTarget::Target)))
        .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));
    close(resolve(&ctx, "to_target"), 0.0);
}

// =============================================================================
// Constants and Manual Input
// =============================================================================

struct Till;

impl ManualInputProvider for Till {
    fn manual_input(&self, name: &str, kind: PrimitiveKind) -> Option<Primitive> {
        (name == "price").then(|| Primitive::Number(3.0).coerce(kind))
    }
}

#[test]
fn manual_input_prefers_supplied_values() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new("tip", VariableKind::RequiresManualInput("tip".into())))
        .unwrap();
    defs.register_variable(VariableBase::new("price", VariableKind::RequiresManualInput("price".into())))
        .unwrap();

    let till = Till;
    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep))
        .with_manual_input("tip", 2.0)
        .with_manual_input("price", 5.0)
        .with_manual_input_provider(&till);
    close(resolve(&ctx, "tip"), 2.0);
    close(resolve(&ctx, "price"), 5.0);

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep)).with_manual_input_provider(&till);
    close(resolve(&ctx, "price"), 3.0);
    close(resolve(&ctx, "tip"), 0.0);
}

#[test]
fn fixed_values_coerce_to_the_requested_kind() {
    let t = Tavern::new();
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new("open", VariableKind::Fixed(Primitive::Boolean(true))))
        .unwrap();

    let ctx = EvaluationContext::new(&t.world, &t.tax, &defs, Binding::actor(t.barkeep));
    assert_eq!(ctx.resolve(&VariableId::new("open"), PrimitiveKind::Boolean), Primitive::Boolean(true));
    close(resolve(&ctx, "open"), 1.0);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut defs = Definitions::new();
    defs.register_variable(VariableBase::new("open", VariableKind::Fixed(Primitive::Boolean(true))))
        .unwrap();
    let err = defs
        .register_variable(VariableBase::new("open", VariableKind::Fixed(Primitive::Boolean(false))))
        .unwrap_err();
    assert!(err.to_string().contains("open"));
}
