//! Registered variable, reference and extension definitions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use praxis_foundation::{EntityId, Error, Result};
use praxis_value::VariableId;

use crate::context::{EvaluationContext, Role};
use crate::reference::ReferenceBase;
use crate::variable::VariableBase;

/// Name of a registered reference.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(Arc<str>);

impl ReferenceId {
    /// Creates a reference identifier.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    /// The reference's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceId({})", self.0)
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReferenceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// An externally provided requirement on a bound entity.
///
/// Plugins register these by name; event requirements refer to them through
/// [`ExtensionRequirement`](crate::requirement::ExtensionRequirement).
pub trait ExtensionCondition: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// Returns true if `entity`, bound to `role`, meets the condition.
    fn is_satisfied(&self, ctx: &EvaluationContext<'_>, role: Role, entity: EntityId) -> bool;
}

/// Registry of shared definitions used during evaluation.
///
/// Definitions are immutable once registered and can be read from several
/// evaluations at once.
#[derive(Default)]
pub struct Definitions {
    variables: HashMap<VariableId, Arc<VariableBase>>,
    references: HashMap<ReferenceId, Arc<ReferenceBase>>,
    extensions: HashMap<Arc<str>, Arc<dyn ExtensionCondition>>,
}

impl Definitions {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable with the same id exists.
    pub fn register_variable(&mut self, variable: VariableBase) -> Result<()> {
        if self.variables.contains_key(&variable.id) {
            return Err(Error::duplicate_definition("variable", variable.id.as_str()));
        }
        self.variables.insert(variable.id.clone(), Arc::new(variable));
        Ok(())
    }

    /// Registers a reference.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference with the same id exists.
    pub fn register_reference(&mut self, reference: ReferenceBase) -> Result<()> {
        if self.references.contains_key(&reference.id) {
            return Err(Error::duplicate_definition("reference", reference.id.as_str()));
        }
        self.references.insert(reference.id.clone(), Arc::new(reference));
        Ok(())
    }

    /// Registers an extension condition under its own name.
    ///
    /// # Errors
    ///
    /// Returns an error if an extension with the same name exists.
    pub fn register_extension(&mut self, extension: Arc<dyn ExtensionCondition>) -> Result<()> {
        let name: Arc<str> = extension.name().into();
        if self.extensions.contains_key(&name) {
            return Err(Error::duplicate_definition("extension", &*name));
        }
        self.extensions.insert(name, extension);
        Ok(())
    }

    /// Looks up a variable.
    #[must_use]
    pub fn variable(&self, id: &VariableId) -> Option<&Arc<VariableBase>> {
        self.variables.get(id)
    }

    /// Looks up a reference.
    #[must_use]
    pub fn reference(&self, id: &ReferenceId) -> Option<&Arc<ReferenceBase>> {
        self.references.get(id)
    }

    /// Looks up an extension condition.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&Arc<dyn ExtensionCondition>> {
        self.extensions.get(name)
    }
}

impl fmt::Debug for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definitions")
            .field("variables", &self.variables.len())
            .field("references", &self.references.len())
            .field("extensions", &self.extensions.len())
            .finish()
    }
}
