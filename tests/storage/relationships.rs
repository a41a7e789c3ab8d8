//! Integration tests for typed relationships

use praxis_storage::{EntityGraph, EntityKind, RelationshipRole, World};

use crate::{household, node, spawn};

#[test]
fn relationships_are_visible_from_both_ends() {
    let t = household();
    let owns = node(&t, "owns");
    let (world, alice) = spawn(&World::new(), &t, EntityKind::AbstractEntity, "person");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");
    let (world, rel) = world.relate(owns, alice, cup).unwrap();

    assert_eq!(world.relationships(alice, RelationshipRole::Source), vec![rel]);
    assert_eq!(world.relationships(cup, RelationshipRole::Target), vec![rel]);
    assert!(world.relationships(alice, RelationshipRole::Target).is_empty());
    assert_eq!(rel.other(RelationshipRole::Source), cup);
    assert_eq!(world.relationship(rel.id), Some(&rel));
}

#[test]
fn relating_twice_returns_the_same_instance() {
    let t = household();
    let owns = node(&t, "owns");
    let (world, alice) = spawn(&World::new(), &t, EntityKind::AbstractEntity, "person");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");
    let world = world.advance_step();

    let (world, first) = world.relate(owns, alice, cup).unwrap();
    let (world, second) = world.relate(owns, alice, cup).unwrap();
    assert_eq!(first, second);
    assert_eq!(world.added_relationships(alice).len(), 1);
}

#[test]
fn distinct_kinds_are_distinct_relationships() {
    let t = household();
    let (world, alice) = spawn(&World::new(), &t, EntityKind::AbstractEntity, "person");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");
    let (world, owns) = world.relate(node(&t, "owns"), alice, cup).unwrap();
    let (world, likes) = world.relate(node(&t, "likes"), alice, cup).unwrap();

    assert_ne!(owns.id, likes.id);
    assert_eq!(world.relationships(alice, RelationshipRole::Source).len(), 2);
}

#[test]
fn unrelate_logs_the_removal_on_both_ends() {
    let t = household();
    let (world, alice) = spawn(&World::new(), &t, EntityKind::AbstractEntity, "person");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");
    let (world, rel) = world.relate(node(&t, "owns"), alice, cup).unwrap();
    let world = world.advance_step().unrelate(rel.id).unwrap();

    assert!(world.relationships(alice, RelationshipRole::Source).is_empty());
    assert_eq!(world.removed_relationships(alice), &[rel]);
    assert_eq!(world.removed_relationships(cup), &[rel]);
    assert!(world.unrelate(rel.id).is_err());
}

#[test]
fn destroying_an_endpoint_removes_its_relationships() {
    let t = household();
    let (world, alice) = spawn(&World::new(), &t, EntityKind::AbstractEntity, "person");
    let (world, cup) = spawn(&world, &t, EntityKind::TangibleObject, "cup");
    let (world, rel) = world.relate(node(&t, "owns"), alice, cup).unwrap();
    let world = world.advance_step().destroy(cup).unwrap();

    assert!(world.relationships(alice, RelationshipRole::Source).is_empty());
    assert_eq!(world.removed_relationships(alice), &[rel]);
}
