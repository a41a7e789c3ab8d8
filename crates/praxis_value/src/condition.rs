//! Conditions comparing a value against a definition.

use praxis_foundation::{Primitive, PrimitiveKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::definition::{BooleanValueBase, NumericalValueBase, StringValueBase, VectorValueBase};
use crate::instance::ValueInstance;
use crate::range::NumericalValueRange;
use crate::scope::VariableScope;
use crate::sign::{DualEqualitySign, EqualitySign};

/// A comparison a value must satisfy.
///
/// The value under test is coerced to the condition's kind first, so a
/// numerical condition can be checked against a boolean attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueCondition {
    /// Boolean comparison (`false < true`).
    Boolean {
        /// Comparison.
        sign: EqualitySign,
        /// Expected value.
        value: BooleanValueBase,
    },
    /// Numerical range, compared in base units.
    Numerical(NumericalValueRange),
    /// Lexicographic string comparison.
    String {
        /// Comparison.
        sign: EqualitySign,
        /// Expected value.
        value: StringValueBase,
    },
    /// Vector comparison; ordering signs compare lengths.
    Vector {
        /// Comparison.
        sign: EqualitySign,
        /// Expected value.
        value: VectorValueBase,
    },
}

impl ValueCondition {
    /// `value == expected` for a boolean.
    #[must_use]
    pub fn is_true(expected: bool) -> Self {
        Self::Boolean {
            sign: EqualitySign::Equal,
            value: BooleanValueBase::new(expected),
        }
    }

    /// A numerical condition with a single literal bound.
    #[must_use]
    pub fn number(sign: EqualitySign, value: f64) -> Self {
        Self::Numerical(NumericalValueRange::single(sign, NumericalValueBase::new(value)))
    }

    /// An inclusive literal `Between` condition.
    #[must_use]
    pub fn between(low: f64, high: f64) -> Self {
        Self::Numerical(NumericalValueRange::literal(DualEqualitySign::Between, low, Some(high)))
    }

    /// A string comparison against a literal.
    #[must_use]
    pub fn string(sign: EqualitySign, value: &str) -> Self {
        Self::String {
            sign,
            value: StringValueBase::new(value),
        }
    }

    /// The kind values are coerced to before comparison.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Boolean { .. } => PrimitiveKind::Boolean,
            Self::Numerical(_) => PrimitiveKind::Number,
            Self::String { .. } => PrimitiveKind::String,
            Self::Vector { .. } => PrimitiveKind::Vector,
        }
    }

    /// Returns true if `instance` satisfies the condition.
    pub fn is_satisfied(&self, instance: &ValueInstance, scope: &dyn VariableScope) -> bool {
        self.is_satisfied_by(&instance.primitive(scope), scope)
    }

    /// Returns true if `actual` satisfies the condition.
    ///
    /// Numbers are expected in base units.
    pub fn is_satisfied_by(&self, actual: &Primitive, scope: &dyn VariableScope) -> bool {
        let actual = actual.coerce(self.kind());
        match self {
            Self::Boolean { sign, value } => {
                sign.accepts(Some(actual.as_bool().cmp(&value.value(scope))))
            }
            Self::Numerical(range) => range.is_in_range(actual.as_number(), scope),
            Self::String { sign, value } => {
                sign.accepts(Some((*actual.as_string()).cmp(&*value.value(scope))))
            }
            Self::Vector { sign, value } => {
                let (actual, expected) = (actual.as_vector(), value.value(scope));
                match sign {
                    EqualitySign::Equal => actual == expected,
                    EqualitySign::NotEqual => actual != expected,
                    ordering => ordering.compare_numbers(actual.length(), expected.length()),
                }
            }
        }
    }

    /// A representative value that satisfies the condition.
    ///
    /// Numerical conditions yield their minimum-highest value.
    pub fn value(&self, scope: &dyn VariableScope) -> Primitive {
        match self {
            Self::Boolean { sign, value } => {
                let expected = value.value(scope);
                Primitive::Boolean(if *sign == EqualitySign::NotEqual { !expected } else { expected })
            }
            Self::Numerical(range) => Primitive::Number(range.minimum_highest_value(scope)),
            Self::String { value, .. } => Primitive::String(value.value(scope)),
            Self::Vector { value, .. } => Primitive::Vector(value.value(scope)),
        }
    }

    /// Lower numerical bound, if this is a numerical condition.
    pub fn min(&self, scope: &dyn VariableScope) -> Option<f64> {
        match self {
            Self::Numerical(range) => Some(range.min(scope)),
            _ => None,
        }
    }

    /// Upper numerical bound, if this is a numerical condition.
    pub fn max(&self, scope: &dyn VariableScope) -> Option<f64> {
        match self {
            Self::Numerical(range) => Some(range.max(scope)),
            _ => None,
        }
    }
}

impl From<NumericalValueRange> for ValueCondition {
    fn from(range: NumericalValueRange) -> Self {
        Self::Numerical(range)
    }
}
