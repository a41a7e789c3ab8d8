//! Mutations applied to value instances.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::definition::{BooleanValueBase, NumericalValueBase, StringValueBase, VectorValueBase};
use crate::instance::ValueInstance;
use crate::scope::VariableScope;

/// How a numerical or vector change combines with the current value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum ChangeKind {
    #[default]
    Set,
    Increase,
    Decrease,
    Multiply,
    Divide,
}

/// How a boolean change applies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BooleanChangeKind {
    /// Replace with the change's value.
    #[default]
    Set,
    /// Flip the current value; the change's value is ignored.
    Reverse,
}

/// How a string change applies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum StringChangeKind {
    #[default]
    Set,
    Append,
}

/// A mutation of a value instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum ValueChange {
    Boolean {
        kind: BooleanChangeKind,
        value: BooleanValueBase,
    },
    Numerical {
        kind: ChangeKind,
        value: NumericalValueBase,
    },
    String {
        kind: StringChangeKind,
        value: StringValueBase,
    },
    Vector {
        kind: ChangeKind,
        value: VectorValueBase,
    },
}

impl ValueChange {
    /// A numerical change by a literal amount.
    #[must_use]
    pub fn number(kind: ChangeKind, amount: f64) -> Self {
        Self::Numerical {
            kind,
            value: NumericalValueBase::new(amount),
        }
    }

    /// Applies the change to `instance`.
    ///
    /// Numerical changes work in base units and respect the instance's
    /// bounds. Returns false if the change does not fit the instance's kind
    /// or would divide by zero; the instance is left untouched then.
    pub fn apply(&self, instance: &mut ValueInstance, scope: &dyn VariableScope) -> bool {
        match (self, instance) {
            (Self::Boolean { kind, value }, ValueInstance::Boolean(target)) => {
                match kind {
                    BooleanChangeKind::Set => target.set_value(value.value(scope)),
                    BooleanChangeKind::Reverse => target.reverse(),
                }
                true
            }
            (Self::Numerical { kind, value }, ValueInstance::Numerical(target)) => {
                let amount = value.value(scope);
                let current = target.base_value();
                let next = match kind {
                    ChangeKind::Set => amount,
                    ChangeKind::Increase => current + amount,
                    ChangeKind::Decrease => current - amount,
                    ChangeKind::Multiply => current * amount,
                    ChangeKind::Divide if amount == 0.0 => return false,
                    ChangeKind::Divide => current / amount,
                };
                target.set_base_value(next);
                true
            }
            (Self::String { kind, value }, ValueInstance::String(target)) => {
                match kind {
                    StringChangeKind::Set => target.set_value(value.value(scope)),
                    StringChangeKind::Append => target.append(&value.value(scope)),
                }
                true
            }
            (Self::Vector { kind, value }, ValueInstance::Vector(target)) => {
                let amount = value.value(scope);
                let current = target.value();
                target.set_value(match kind {
                    ChangeKind::Set => amount,
                    ChangeKind::Increase => current.add(amount),
                    ChangeKind::Decrease => current.sub(amount),
                    ChangeKind::Multiply => current.mul(amount),
                    ChangeKind::Divide => current.div(amount),
                });
                true
            }
            _ => false,
        }
    }
}
