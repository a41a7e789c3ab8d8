//! Requirement evaluation.
//!
//! Evaluation is read-only and never fails: absent parts pass, and anything
//! that cannot be resolved counts as not satisfied.

mod add_remove;
mod entity;
mod event;

pub use add_remove::{AddRemoveRequirement, AddRemoveRequirementsBase, ChangeDirection, ChangeFilter};
pub use entity::{AttributeRequirement, ContentRequirement, EntityRequirements, KindFilter};
pub use event::{
    EventRequirementsBase, ExtensionRequirement, FailedCheck, ReferenceRequirement,
    RelationshipRequirement, RequirementOutcome, RolePair, StructuralCheck,
};
