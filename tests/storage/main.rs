//! Integration tests for Layer 2: Storage
//!
//! Tests for world snapshots, owned collections, relationships, and the
//! per-step change log.

mod collections;
mod relationships;
mod world;

use praxis_foundation::EntityId;
use praxis_storage::{EntityDecl, EntityKind, World};
use praxis_taxonomy::{NodeDecl, NodeId, Taxonomy, TaxonomyBuilder};

/// A small household taxonomy shared by the storage tests.
pub fn household() -> Taxonomy {
    let mut builder = TaxonomyBuilder::new();
    for (name, parent) in [
        ("thing", None),
        ("furniture", Some("thing")),
        ("table", Some("furniture")),
        ("drawer", Some("thing")),
        ("cup", Some("thing")),
        ("water", Some("thing")),
        ("person", Some("thing")),
        ("owns", None),
        ("likes", None),
        ("colour", None),
    ] {
        let decl = match parent {
            Some(parent) => NodeDecl::new(name).with_parent(parent),
            None => NodeDecl::new(name),
        };
        builder = builder.with(decl).unwrap();
    }
    builder.build()
}

/// Looks up a node that must exist.
pub fn node(taxonomy: &Taxonomy, name: &str) -> NodeId {
    taxonomy.find(name).unwrap()
}

/// Spawns an entity of `kind` in `category`.
pub fn spawn(world: &World, taxonomy: &Taxonomy, kind: EntityKind, category: &str) -> (World, EntityId) {
    world.spawn(EntityDecl::new(kind, node(taxonomy, category)))
}
