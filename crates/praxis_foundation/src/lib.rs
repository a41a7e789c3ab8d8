//! Core identifiers, errors, units, and primitive values for Praxis.
//!
//! This crate provides:
//! - [`EntityId`] - Generational identifiers for simulated entities
//! - [`Primitive`] / [`PrimitiveKind`] - The primitive values variables resolve to
//! - [`Vector4`] - Four-component vectors used for positions and vector values
//! - [`UnitBase`] / [`Prefix`] - Units of measurement and base-unit normalization
//! - [`DefinitionCache`] - Memoizing template cache with single initialization
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod entity;
pub mod error;
pub mod primitive;
pub mod unit;
pub mod vector;

pub use cache::DefinitionCache;
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use primitive::{Primitive, PrimitiveKind};
pub use unit::{Conversion, Prefix, UnitBase};
pub use vector::Vector4;

/// Result type alias using the Praxis error type.
pub type Result<T> = std::result::Result<T, Error>;
