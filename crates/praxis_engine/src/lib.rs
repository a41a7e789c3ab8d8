//! Event requirement evaluation for Praxis.
//!
//! This crate provides:
//! - [`VariableBase`] - Variables resolved against the current binding
//! - [`ReferenceBase`] - Declarative queries expanding a subject into entities
//! - [`RangeBase`] - Inclusion flags describing what is reachable around a subject
//! - [`EntityRequirements`], [`AddRemoveRequirementsBase`], [`EventRequirementsBase`] -
//!   The requirement evaluators
//! - [`EvaluationContext`] - Binding, collaborators and configuration for one evaluation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod context;
pub mod definitions;
pub mod range;
pub mod reference;
pub mod requirement;
mod traverse;
pub mod variable;

pub use config::{EngineConfig, FarthestSelection};
pub use context::{Binding, Collider, EvaluationContext, ManualInputProvider, Role, Subject};
pub use definitions::{Definitions, ExtensionCondition, ReferenceId};
pub use range::{RangeBase, RangeScope, SpecificTargetScope};
pub use reference::{ReferenceBase, ReferenceKind, SelectionType, SetOperator};
pub use requirement::{
    AddRemoveRequirement, AddRemoveRequirementsBase, AttributeRequirement, ChangeDirection,
    ChangeFilter, ContentRequirement, EntityRequirements, EventRequirementsBase,
    ExtensionRequirement, FailedCheck, KindFilter, ReferenceRequirement,
    RelationshipRequirement, RequirementOutcome, RolePair, StructuralCheck,
};
pub use variable::{CountRelation, DistanceTarget, VariableBase, VariableKind, VariableSource};
