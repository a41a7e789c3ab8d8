//! Entity graph storage for Praxis.
//!
//! This crate provides:
//! - [`EntityKind`] - Closed set of entity kinds with capability predicates
//! - [`Relation`] / [`OwnerKind`] - Owned collections and their inverse lookups
//! - [`EntityGraph`] - Read-only query surface consumed by the engine
//! - [`World`] - Immutable in-memory snapshot implementing [`EntityGraph`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod graph;
pub mod kind;
pub mod relationship;
pub mod world;

pub use entity::EntityStore;
pub use graph::EntityGraph;
pub use kind::{ChangeChannel, EntityKind, OwnerKind, Relation};
pub use relationship::{RelationshipId, RelationshipInstance, RelationshipRole, RelationshipStore};
pub use world::{Attribute, EntityDecl, World};
