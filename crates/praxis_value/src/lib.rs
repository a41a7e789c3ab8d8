//! Typed values for Praxis.
//!
//! This crate provides:
//! - [`ValueBase`] - Immutable value definitions (boolean, numerical, string,
//!   vector, and arithmetic terms)
//! - [`ValueInstance`] - Mutable per-occurrence values with clamped bounds
//!   and unit conversion
//! - [`ValueCondition`] - Comparisons against a definition
//! - [`ValueChange`] - Set/increase/multiply style mutations
//! - [`NumericalValueRange`] - Single and dual sign ranges with sampling
//! - [`VariableScope`] - Resolution of variable-backed definitions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod change;
pub mod condition;
pub mod definition;
pub mod instance;
pub mod range;
pub mod scope;
pub mod sign;

pub use change::{BooleanChangeKind, ChangeKind, StringChangeKind, ValueChange};
pub use condition::ValueCondition;
pub use definition::{
    BooleanValueBase, NumericalValueBase, StringValueBase, TermFunction, TermOperand,
    TermOperator, TermValueBase, ValueBase, VectorValueBase,
};
pub use instance::{
    BooleanValueInstance, NumericalValueInstance, StringValueInstance, TermValueInstance,
    ValueInstance, VectorValueInstance,
};
pub use range::NumericalValueRange;
pub use scope::{NoVariables, ValueConfig, VariableId, VariableScope};
pub use sign::{DualEqualitySign, EqualitySign};
