//! Multi-parent category taxonomy for Praxis.
//!
//! This crate provides:
//! - [`NodeDecl`] - Static declaration of a category and its personal parents
//! - [`TaxonomyBuilder`] - Resolves declarations into a [`Taxonomy`]
//! - [`Taxonomy`] - Is-a, depth and name queries over the category graph
//! - [`NodeBase`] - Lazily built node definition with cached parent/child sets

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod node;
pub mod taxonomy;

pub use node::{NodeBase, NodeDecl, NodeId};
pub use taxonomy::{Taxonomy, TaxonomyBuilder};
