//! Praxis - Runtime reasoning layer for semantic virtual worlds
//!
//! This crate re-exports all layers of the Praxis system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: praxis_engine     - Variables, references, ranges, requirement evaluation
//! Layer 2: praxis_storage    - Entity graph, relationships, change log
//! Layer 1: praxis_value      - Values, conditions, changes, numerical ranges
//!          praxis_taxonomy   - Multi-parent category taxonomy
//! Layer 0: praxis_foundation - Core types (EntityId, Primitive, units, Error)
//! ```

pub use praxis_engine as engine;
pub use praxis_foundation as foundation;
pub use praxis_storage as storage;
pub use praxis_taxonomy as taxonomy;
pub use praxis_value as value;
