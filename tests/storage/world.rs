//! Integration tests for world snapshots and steps

use praxis_foundation::{ErrorKind, Primitive, Vector4};
use praxis_storage::{EntityDecl, EntityGraph, EntityKind, World};
use praxis_value::{NoVariables, StringValueBase, ValueBase, ValueInstance};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{household, node, spawn};

// =============================================================================
// Immutability
// =============================================================================

#[test]
fn mutations_leave_the_original_untouched() {
    let t = household();
    let (before, cup) = spawn(&World::new(), &t, EntityKind::TangibleObject, "cup");
    let after = before.set_position(cup, Vector4::position(3.0, 0.0, 0.0)).unwrap();

    assert_eq!(before.position(cup), Some(Vector4::ZERO));
    assert_eq!(after.position(cup), Some(Vector4::position(3.0, 0.0, 0.0)));
}

#[test]
fn spawn_does_not_affect_earlier_snapshots() {
    let t = household();
    let empty = World::new();
    let (one, _) = spawn(&empty, &t, EntityKind::TangibleObject, "cup");
    let (two, _) = spawn(&one, &t, EntityKind::TangibleObject, "cup");

    assert_eq!(empty.entity_count(), 0);
    assert_eq!(one.entity_count(), 1);
    assert_eq!(two.entity_count(), 2);
}

// =============================================================================
// Entity State
// =============================================================================

#[test]
fn capabilities_gate_state() {
    let t = household();
    let (world, water) = spawn(&World::new(), &t, EntityKind::Substance, "water");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");

    let err = world.set_position(water, Vector4::position(1.0, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingCapability { .. }));
    let err = world.set_quantity(cup, 2.0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingCapability { .. }));

    let world = world.set_quantity(water, 0.25).unwrap();
    assert!((world.quantity(water) - 0.25).abs() < f64::EPSILON);
    assert_eq!(world.position(water), None);
}

#[test]
fn attributes_are_replaced_per_category() {
    let t = household();
    let colour = node(&t, "colour");
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let red = ValueInstance::new(&ValueBase::String(StringValueBase::new("red")), &mut rng);
    let blue = ValueInstance::new(&ValueBase::String(StringValueBase::new("blue")), &mut rng);

    let (world, cup) = World::new().spawn(
        EntityDecl::new(EntityKind::TangibleObject, node(&t, "cup")).with_attribute(colour, red),
    );
    let world = world.set_attribute(cup, colour, blue).unwrap();

    assert_eq!(world.attributes(cup).len(), 1);
    let value = world.attribute(cup, colour, &t).unwrap();
    assert_eq!(value.primitive(&NoVariables), Primitive::from("blue"));
}

// =============================================================================
// Destroyed and Stale Entities
// =============================================================================

#[test]
fn destroyed_entities_answer_empty() {
    let t = household();
    let (world, cup) = spawn(&World::new(), &t, EntityKind::TangibleObject, "cup");
    let world = world.destroy(cup).unwrap();

    assert!(!world.exists(cup));
    assert_eq!(world.kind(cup), None);
    assert_eq!(world.position(cup), None);
    assert!(world.attributes(cup).is_empty());
    assert!(world.instances_in_world_of(cup).is_empty());
}

#[test]
fn stale_ids_are_rejected() {
    let t = household();
    let (world, old) = spawn(&World::new(), &t, EntityKind::TangibleObject, "cup");
    let world = world.destroy(old).unwrap();
    let (world, new) = spawn(&world, &t, EntityKind::TangibleObject, "cup");

    assert_eq!(old.index, new.index);
    assert!(!world.exists(old));
    let err = world.set_position(old, Vector4::ZERO).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
    assert!(matches!(world.destroy(old).unwrap_err().kind, ErrorKind::StaleEntity(_)));
}

// =============================================================================
// Steps
// =============================================================================

#[test]
fn advance_step_keeps_one_previous_snapshot() {
    let t = household();
    let (world, cup) = spawn(&World::new(), &t, EntityKind::TangibleObject, "cup");
    let world = world.advance_step();
    let moved = world.set_position(cup, Vector4::position(1.0, 1.0, 0.0)).unwrap();
    let next = moved.advance_step();

    assert_eq!(next.step(), 2);
    let previous = next.previous().unwrap();
    assert_eq!(previous.step(), 1);
    assert_eq!(previous.position(cup), Some(Vector4::position(1.0, 1.0, 0.0)));
    assert!(previous.previous().is_none());
}

#[test]
fn every_live_entity_shares_the_world() {
    let t = household();
    let (world, a) = spawn(&World::new(), &t, EntityKind::TangibleObject, "cup");
    let (world, b) = spawn(&world, &t, EntityKind::AbstractEntity, "person");

    let mut instances = world.instances_in_world_of(a);
    instances.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(instances, expected);
}
