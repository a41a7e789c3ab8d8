//! Variable resolution and value tunables.

use std::fmt;
use std::sync::Arc;

use praxis_foundation::{Primitive, PrimitiveKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of a variable definition a value can be bound to.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableId(Arc<str>);

impl VariableId {
    /// Creates a variable identifier.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    /// The variable's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariableId({})", self.0)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariableId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Tunables for value evaluation and random sampling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueConfig {
    /// Width of the sampling interval for open-ended ranges.
    ///
    /// A `> v` range with positive `v` samples up to `v * multiplier`;
    /// otherwise up to `v + multiplier`.
    pub sampling_multiplier: f64,
    /// Result of a term whose operands are missing or whose result is not finite.
    pub default_term_value: f64,
}

impl ValueConfig {
    /// The default tunables.
    pub const DEFAULT: Self = Self {
        sampling_multiplier: 2.0,
        default_term_value: 0.0,
    };

    /// Sets the sampling multiplier.
    #[must_use]
    pub fn with_sampling_multiplier(mut self, multiplier: f64) -> Self {
        self.sampling_multiplier = multiplier;
        self
    }

    /// Sets the fallback term value.
    #[must_use]
    pub fn with_default_term_value(mut self, value: f64) -> Self {
        self.default_term_value = value;
        self
    }
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static DEFAULT_CONFIG: ValueConfig = ValueConfig::DEFAULT;

/// Something that can resolve variables while values are being evaluated.
///
/// The evaluation context of the engine is the main implementor; values that
/// are not bound to a variable never consult it.
pub trait VariableScope {
    /// Resolves `variable`, producing a primitive of `kind`.
    ///
    /// Numbers are returned in base units. Unknown variables resolve to the
    /// zero value of `kind`.
    fn resolve(&self, variable: &VariableId, kind: PrimitiveKind) -> Primitive;

    /// Tunables to use while evaluating in this scope.
    fn value_config(&self) -> &ValueConfig {
        &DEFAULT_CONFIG
    }
}

/// A scope with no variables; every lookup yields the zero value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVariables;

impl VariableScope for NoVariables {
    fn resolve(&self, _variable: &VariableId, kind: PrimitiveKind) -> Primitive {
        Primitive::default_for(kind)
    }
}
