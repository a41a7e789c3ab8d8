//! Comparison signs.

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single-value comparison.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EqualitySign {
    /// `==`
    #[default]
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
}

impl EqualitySign {
    /// Returns true if `ordering` (left compared to right) satisfies the sign.
    ///
    /// An unordered comparison (NaN) only satisfies `NotEqual`.
    #[must_use]
    pub fn accepts(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Self::NotEqual, ord) => ord != Some(Ordering::Equal),
            (_, None) => false,
            (Self::Equal, Some(ord)) => ord == Ordering::Equal,
            (Self::Greater, Some(ord)) => ord == Ordering::Greater,
            (Self::GreaterOrEqual, Some(ord)) => ord != Ordering::Less,
            (Self::Less, Some(ord)) => ord == Ordering::Less,
            (Self::LessOrEqual, Some(ord)) => ord != Ordering::Greater,
        }
    }

    /// Compares two numbers with this sign, treating near-equal values as equal.
    #[must_use]
    pub fn compare_numbers(self, left: f64, right: f64) -> bool {
        self.accepts(compare_numbers(left, right))
    }

    /// Operator symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for EqualitySign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A comparison that may involve a second bound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DualEqualitySign {
    /// `== v`
    #[default]
    Equal,
    /// `!= v`
    NotEqual,
    /// `> v`
    Greater,
    /// `>= v`
    GreaterOrEqual,
    /// `< v`
    Less,
    /// `<= v`
    LessOrEqual,
    /// `v <= x <= v2`
    Between,
    /// `x < v || x > v2`
    NotBetween,
}

impl DualEqualitySign {
    /// The single-value sign this corresponds to, if any.
    #[must_use]
    pub const fn as_single(self) -> Option<EqualitySign> {
        match self {
            Self::Equal => Some(EqualitySign::Equal),
            Self::NotEqual => Some(EqualitySign::NotEqual),
            Self::Greater => Some(EqualitySign::Greater),
            Self::GreaterOrEqual => Some(EqualitySign::GreaterOrEqual),
            Self::Less => Some(EqualitySign::Less),
            Self::LessOrEqual => Some(EqualitySign::LessOrEqual),
            Self::Between | Self::NotBetween => None,
        }
    }

    /// Returns true if this sign takes a second bound.
    #[must_use]
    pub const fn is_dual(self) -> bool {
        matches!(self, Self::Between | Self::NotBetween)
    }
}

impl From<EqualitySign> for DualEqualitySign {
    fn from(sign: EqualitySign) -> Self {
        match sign {
            EqualitySign::Equal => Self::Equal,
            EqualitySign::NotEqual => Self::NotEqual,
            EqualitySign::Greater => Self::Greater,
            EqualitySign::GreaterOrEqual => Self::GreaterOrEqual,
            EqualitySign::Less => Self::Less,
            EqualitySign::LessOrEqual => Self::LessOrEqual,
        }
    }
}

/// Orders two numbers, treating values within a relative epsilon as equal.
///
/// Unit conversion introduces rounding noise, so `1 km` must still equal
/// `1000 m`.
#[must_use]
pub fn compare_numbers(left: f64, right: f64) -> Option<Ordering> {
    let scale = left.abs().max(right.abs()).max(1.0);
    if (left - right).abs() <= scale * 1e-9 {
        return Some(Ordering::Equal);
    }
    left.partial_cmp(&right)
}
