//! Primitive values that variables resolve to.
//!
//! Variables, attributes and manual inputs all surface as one of four
//! primitive kinds. Coercion between kinds is lenient: a value that cannot
//! be coerced falls back to the requested kind's zero value.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::vector::Vector4;

/// Kind descriptor for a [`Primitive`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimitiveKind {
    /// Boolean.
    Boolean,
    /// 64-bit floating point magnitude.
    Number,
    /// String.
    String,
    /// Four-component vector.
    Vector,
}

impl fmt::Debug for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Vector => write!(f, "vector"),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A resolved primitive value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive {
    /// Boolean value.
    Boolean(bool),
    /// Numeric value, already in base units.
    Number(f64),
    /// String value.
    String(Arc<str>),
    /// Vector value.
    Vector(Vector4),
}

impl Primitive {
    /// Returns the zero value of `kind`.
    #[must_use]
    pub fn default_for(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Self::Boolean(false),
            PrimitiveKind::Number => Self::Number(0.0),
            PrimitiveKind::String => Self::String(Arc::from("")),
            PrimitiveKind::Vector => Self::Vector(Vector4::ZERO),
        }
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Number(_) => PrimitiveKind::Number,
            Self::String(_) => PrimitiveKind::String,
            Self::Vector(_) => PrimitiveKind::Vector,
        }
    }

    /// Attempts to convert this value to `kind`.
    ///
    /// - numbers and booleans convert both ways (non-zero is `true`)
    /// - strings parse as numbers or booleans
    /// - vectors convert to numbers by length and to booleans by non-zero length
    /// - numbers broadcast into every vector component
    /// - anything converts to a string
    ///
    /// Returns `None` when no conversion applies (for example a string that
    /// does not parse).
    #[must_use]
    pub fn try_coerce(&self, kind: PrimitiveKind) -> Option<Self> {
        if self.kind() == kind {
            return Some(self.clone());
        }
        match (self, kind) {
            (Self::Boolean(b), PrimitiveKind::Number) => Some(Self::Number(f64::from(u8::from(*b)))),
            (Self::Number(n), PrimitiveKind::Boolean) => Some(Self::Boolean(*n != 0.0)),
            (Self::Number(n), PrimitiveKind::Vector) => Some(Self::Vector(Vector4::splat(*n))),
            (Self::Vector(v), PrimitiveKind::Number) => Some(Self::Number(v.length())),
            (Self::Vector(v), PrimitiveKind::Boolean) => Some(Self::Boolean(v.length() != 0.0)),
            (Self::String(s), PrimitiveKind::Number) => {
                s.trim().parse::<f64>().ok().map(Self::Number)
            }
            (Self::String(s), PrimitiveKind::Boolean) => match s.trim() {
                t if t.eq_ignore_ascii_case("true") => Some(Self::Boolean(true)),
                t if t.eq_ignore_ascii_case("false") => Some(Self::Boolean(false)),
                _ => None,
            },
            (value, PrimitiveKind::String) => Some(Self::String(Arc::from(value.to_string()))),
            _ => None,
        }
    }

    /// Converts this value to `kind`, falling back to the kind's zero value.
    #[must_use]
    pub fn coerce(&self, kind: PrimitiveKind) -> Self {
        self.try_coerce(kind)
            .unwrap_or_else(|| Self::default_for(kind))
    }

    /// Coerces to a number (zero on failure).
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self.coerce(PrimitiveKind::Number) {
            Self::Number(n) => n,
            _ => 0.0,
        }
    }

    /// Coerces to a boolean (`false` on failure).
    #[must_use]
    pub fn as_bool(&self) -> bool {
        matches!(self.coerce(PrimitiveKind::Boolean), Self::Boolean(true))
    }

    /// Coerces to a string.
    #[must_use]
    pub fn as_string(&self) -> Arc<str> {
        match self.coerce(PrimitiveKind::String) {
            Self::String(s) => s,
            _ => Arc::from(""),
        }
    }

    /// Coerces to a vector (zero on failure).
    #[must_use]
    pub fn as_vector(&self) -> Vector4 {
        match self.coerce(PrimitiveKind::Vector) {
            Self::Vector(v) => v,
            _ => Vector4::ZERO,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Vector(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Primitive {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Primitive {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<Vector4> for Primitive {
    fn from(v: Vector4) -> Self {
        Self::Vector(v)
    }
}
