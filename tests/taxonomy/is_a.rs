//! Integration tests for is-a queries

use praxis_taxonomy::{NodeDecl, Taxonomy, TaxonomyBuilder};
use proptest::prelude::*;
use std::sync::Arc;

/// animal <- mammal <- dog; pet <- dog; pet <- goldfish <- fish <- animal
fn zoo() -> Taxonomy {
    TaxonomyBuilder::new()
        .with(NodeDecl::new("animal"))
        .unwrap()
        .with(NodeDecl::new("mammal").with_parent("animal"))
        .unwrap()
        .with(NodeDecl::new("pet"))
        .unwrap()
        .with(NodeDecl::new("dog").with_parent("mammal").with_parent("pet").with_alias("hound"))
        .unwrap()
        .with(NodeDecl::new("goldfish").with_parent("fish").with_parent("pet"))
        .unwrap()
        .with(NodeDecl::new("fish").with_parent("animal"))
        .unwrap()
        .build()
}

// =============================================================================
// Multi-Parent Is-A
// =============================================================================

#[test]
fn inherits_through_every_parent() {
    let t = zoo();
    let dog = t.find("dog").unwrap();
    assert!(t.is_node_of(dog, t.find("mammal").unwrap()));
    assert!(t.is_node_of(dog, t.find("animal").unwrap()));
    assert!(t.is_node_of(dog, t.find("pet").unwrap()));
    assert!(!t.is_node_of(dog, t.find("fish").unwrap()));
    assert!(!t.is_node_of(t.find("animal").unwrap(), dog));
}

#[test]
fn parents_may_be_declared_later() {
    let t = zoo();
    let goldfish = t.find("goldfish").unwrap();
    assert!(t.is_node_of(goldfish, t.find("animal").unwrap()));
}

#[test]
fn any_of_several() {
    let t = zoo();
    let fish = t.find("fish").unwrap();
    let others = [t.find("pet").unwrap(), t.find("animal").unwrap()];
    assert!(t.is_node_of_any(fish, &others));
    assert!(!t.is_node_of_any(fish, &others[..1]));
}

#[test]
fn aliases_resolve_to_the_same_node() {
    let t = zoo();
    let dog = t.find("dog").unwrap();
    assert_eq!(t.find("hound"), Some(dog));
    assert!(t.has_name(dog, "hound"));
    assert_eq!(t.name(dog).as_deref(), Some("dog"));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = TaxonomyBuilder::new()
        .with(NodeDecl::new("dog"))
        .unwrap()
        .with(NodeDecl::new("wolf").with_alias("dog"));
    assert!(err.is_err());
}

#[test]
fn unknown_parents_are_skipped() {
    let t = TaxonomyBuilder::new()
        .with(NodeDecl::new("orphan").with_parent("nobody"))
        .unwrap()
        .build();
    let orphan = t.find("orphan").unwrap();
    assert!(t.personal_parents(orphan).is_empty());
}

#[test]
fn node_definitions_are_shared() {
    let t = zoo();
    let dog = t.find("dog").unwrap();
    let first = t.node(dog).unwrap();
    let second = t.node(dog).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(t.children(t.find("pet").unwrap()).len(), 2);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn every_node_is_of_itself(index in 0usize..6) {
        let t = zoo();
        let node = t.ids().nth(index).unwrap();
        prop_assert!(t.is_node_of(node, node));
        prop_assert_eq!(t.depth_of(node, node), 0);
    }

    #[test]
    fn ancestors_are_exactly_the_is_a_targets(a in 0usize..6, b in 0usize..6) {
        let t = zoo();
        let a = t.ids().nth(a).unwrap();
        let b = t.ids().nth(b).unwrap();
        prop_assert_eq!(t.is_node_of(a, b), a == b || t.parents(a).contains(&b));
    }
}
