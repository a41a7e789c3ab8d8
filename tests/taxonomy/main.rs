//! Integration tests for Layer 1: Taxonomy
//!
//! Tests for is-a queries, depth, aliases, and lazily built node definitions.

mod depth;
mod is_a;
