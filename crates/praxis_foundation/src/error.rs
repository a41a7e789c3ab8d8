//! Error types for the Praxis system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Evaluation never fails: missing definitions, unbound variables and
//! unreachable categories degrade to defaults. Errors are reserved for
//! programmer mistakes (ill-typed arithmetic, duplicate registrations) and
//! mutations against entities that no longer exist.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;
use crate::primitive::PrimitiveKind;

/// The main error type for Praxis operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates an invalid operands error for value arithmetic.
    #[must_use]
    pub fn invalid_operands(operation: &'static str, left: &'static str, right: &'static str) -> Self {
        Self::new(ErrorKind::InvalidOperands {
            operation,
            left,
            right,
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: PrimitiveKind, actual: PrimitiveKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a missing capability error.
    #[must_use]
    pub fn missing_capability(entity: EntityId, capability: &'static str) -> Self {
        Self::new(ErrorKind::MissingCapability { entity, capability })
    }

    /// Creates a duplicate definition error.
    #[must_use]
    pub fn duplicate_definition(what: &'static str, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDefinition {
            what,
            name: name.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// Arithmetic was attempted on operands that cannot be combined.
    #[error("invalid operands for {operation}: {left} and {right}")]
    InvalidOperands {
        /// The attempted operation.
        operation: &'static str,
        /// Variant of the left operand.
        left: &'static str,
        /// Variant of the right operand.
        right: &'static str,
    },

    /// A primitive of the wrong kind was supplied.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected kind.
        expected: PrimitiveKind,
        /// The kind encountered.
        actual: PrimitiveKind,
    },

    /// A definition with the same name was already registered.
    #[error("duplicate {what} definition: {name}")]
    DuplicateDefinition {
        /// What kind of definition collided.
        what: &'static str,
        /// The colliding name.
        name: String,
    },

    /// Division by zero in value arithmetic.
    #[error("division by zero")]
    DivisionByZero,

    /// The entity's kind lacks a capability the operation needs.
    #[error("{entity:?} is not {capability}")]
    MissingCapability {
        /// The entity involved.
        entity: EntityId,
        /// Description of the capability (e.g. "spatial").
        capability: &'static str,
    },

    /// An entity cannot take part in the requested relation.
    #[error("invalid relation: {0}")]
    InvalidRelation(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Definition or template name involved.
    pub definition: Option<String>,
    /// Chain of evaluation frames, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the definition name.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(definition) = &self.definition {
            write!(f, "in {definition}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
