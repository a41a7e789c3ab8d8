//! Integration tests for owned collections and their change log

use praxis_foundation::ErrorKind;
use praxis_storage::{ChangeChannel, EntityGraph, EntityKind, OwnerKind, Relation, World};

use crate::{household, spawn};

/// A table with a drawer space, plus a loose cup.
fn table_with_drawer() -> (World, [praxis_foundation::EntityId; 3]) {
    let t = household();
    let (world, table) = spawn(&World::new(), &t, EntityKind::TangibleObject, "table");
    let (world, drawer) = spawn(&world, &t, EntityKind::Space, "drawer");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");
    let world = world.attach(table, Relation::Spaces, drawer).unwrap();
    (world.advance_step(), [table, drawer, cup])
}

// =============================================================================
// Attach / Detach
// =============================================================================

#[test]
fn attach_links_both_directions() {
    let (world, [table, drawer, cup]) = table_with_drawer();
    let world = world.attach(drawer, Relation::SpaceItems, cup).unwrap();

    assert_eq!(world.related(drawer, Relation::SpaceItems), &[cup]);
    assert_eq!(world.owner(cup, OwnerKind::SpaceOfItem), Some(drawer));
    assert_eq!(world.owner(drawer, OwnerKind::PhysicalObjectOfSpace), Some(table));
}

#[test]
fn attach_is_idempotent() {
    let (world, [_, drawer, cup]) = table_with_drawer();
    let once = world.attach(drawer, Relation::SpaceItems, cup).unwrap();
    let twice = once.attach(drawer, Relation::SpaceItems, cup).unwrap();

    assert_eq!(twice.related(drawer, Relation::SpaceItems).len(), 1);
    assert_eq!(twice.added(drawer, ChangeChannel::SpaceItems).len(), 1);
}

#[test]
fn kinds_must_fit_the_relation() {
    let t = household();
    let (world, [table, _, cup]) = table_with_drawer();
    let (world, water) = spawn(&world, &t, EntityKind::Substance, "water");

    // Items belong in spaces, not directly in objects.
    let err = world.attach(table, Relation::SpaceItems, cup).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidRelation(_)));
    // Parts are physical objects.
    assert!(world.attach(table, Relation::Parts, water).is_err());
    // Nothing holds itself.
    assert!(world.attach(table, Relation::Parts, table).is_err());
}

#[test]
fn moving_an_item_logs_removal_and_addition() {
    let t = household();
    let (world, [_, drawer, cup]) = table_with_drawer();
    let (world, shelf) = spawn(&world, &t, EntityKind::Space, "drawer");
    let world = world.attach(drawer, Relation::SpaceItems, cup).unwrap().advance_step();

    let world = world.attach(shelf, Relation::SpaceItems, cup).unwrap();
    assert!(world.related(drawer, Relation::SpaceItems).is_empty());
    assert_eq!(world.removed(drawer, ChangeChannel::SpaceItems), &[cup]);
    assert_eq!(world.added(shelf, ChangeChannel::SpaceItems), &[cup]);
    assert_eq!(world.owner(cup, OwnerKind::SpaceOfItem), Some(shelf));
}

#[test]
fn detach_clears_the_inverse_link() {
    let (world, [_, drawer, cup]) = table_with_drawer();
    let world = world.attach(drawer, Relation::SpaceItems, cup).unwrap().advance_step();
    let world = world.detach(drawer, Relation::SpaceItems, cup).unwrap();

    assert_eq!(world.owner(cup, OwnerKind::SpaceOfItem), None);
    assert_eq!(world.removed(drawer, ChangeChannel::SpaceItems), &[cup]);
    assert!(world.added(drawer, ChangeChannel::SpaceItems).is_empty());
}

#[test]
fn matter_in_spaces_uses_the_tangible_matter_channel() {
    let t = household();
    let (world, [_, drawer, _]) = table_with_drawer();
    let (world, water) = spawn(&world, &t, EntityKind::Substance, "water");
    let world = world.attach(drawer, Relation::SpaceMatter, water).unwrap();

    assert_eq!(world.added(drawer, ChangeChannel::TangibleMatter), &[water]);
    assert_eq!(world.owner(water, OwnerKind::SpaceOfMatter), Some(drawer));
}

// =============================================================================
// Change Log Lifetime
// =============================================================================

#[test]
fn change_log_covers_a_single_step() {
    let (world, [_, drawer, cup]) = table_with_drawer();
    let world = world.attach(drawer, Relation::SpaceItems, cup).unwrap();
    assert_eq!(world.added(drawer, ChangeChannel::SpaceItems), &[cup]);

    let world = world.advance_step();
    assert!(world.added(drawer, ChangeChannel::SpaceItems).is_empty());
    assert_eq!(world.related(drawer, Relation::SpaceItems), &[cup]);
}

#[test]
fn destroying_a_member_logs_its_removal() {
    let (world, [_, drawer, cup]) = table_with_drawer();
    let world = world.attach(drawer, Relation::SpaceItems, cup).unwrap().advance_step();
    let world = world.destroy(cup).unwrap();

    assert!(world.related(drawer, Relation::SpaceItems).is_empty());
    assert_eq!(world.removed(drawer, ChangeChannel::SpaceItems), &[cup]);
}

#[test]
fn destroying_an_owner_frees_its_members() {
    let (world, [table, drawer, cup]) = table_with_drawer();
    let world = world.attach(drawer, Relation::SpaceItems, cup).unwrap();
    let world = world.destroy(drawer).unwrap();

    assert_eq!(world.owner(cup, OwnerKind::SpaceOfItem), None);
    assert!(world.related(table, Relation::Spaces).is_empty());
    assert!(world.exists(cup));
}
