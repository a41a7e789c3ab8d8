//! Units of measurement and base-unit normalization.
//!
//! A magnitude is normalized to its category's base unit by first applying
//! the multiplicative prefix factor and then the unit's conversion equation.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metric prefix applied to a magnitude.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum Prefix {
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    #[default]
    None,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

impl Prefix {
    /// Multiplicative factor of this prefix.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Yocto => 1e-24,
            Self::Zepto => 1e-21,
            Self::Atto => 1e-18,
            Self::Femto => 1e-15,
            Self::Pico => 1e-12,
            Self::Nano => 1e-9,
            Self::Micro => 1e-6,
            Self::Milli => 1e-3,
            Self::Centi => 1e-2,
            Self::Deci => 1e-1,
            Self::None => 1.0,
            Self::Deca => 1e1,
            Self::Hecto => 1e2,
            Self::Kilo => 1e3,
            Self::Mega => 1e6,
            Self::Giga => 1e9,
            Self::Tera => 1e12,
            Self::Peta => 1e15,
            Self::Exa => 1e18,
            Self::Zetta => 1e21,
            Self::Yotta => 1e24,
        }
    }

    /// Conventional symbol of this prefix.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Yocto => "y",
            Self::Zepto => "z",
            Self::Atto => "a",
            Self::Femto => "f",
            Self::Pico => "p",
            Self::Nano => "n",
            Self::Micro => "µ",
            Self::Milli => "m",
            Self::Centi => "c",
            Self::Deci => "d",
            Self::None => "",
            Self::Deca => "da",
            Self::Hecto => "h",
            Self::Kilo => "k",
            Self::Mega => "M",
            Self::Giga => "G",
            Self::Tera => "T",
            Self::Peta => "P",
            Self::Exa => "E",
            Self::Zetta => "Z",
            Self::Yotta => "Y",
        }
    }
}

/// Conversion equation from a unit to its category's base unit.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Conversion {
    /// The unit is the base unit.
    #[default]
    Identity,
    /// `base = magnitude * factor + offset`.
    Linear {
        /// Scale applied to the magnitude.
        factor: f64,
        /// Offset added after scaling.
        offset: f64,
    },
}

impl Conversion {
    /// Converts a prefixed-out magnitude into the base unit.
    #[must_use]
    pub fn to_base(self, magnitude: f64) -> f64 {
        match self {
            Self::Identity => magnitude,
            Self::Linear { factor, offset } => magnitude * factor + offset,
        }
    }

    /// Converts a base-unit magnitude back into this unit.
    ///
    /// A zero factor has no inverse; the base magnitude is returned as is.
    #[must_use]
    pub fn from_base(self, base: f64) -> f64 {
        match self {
            Self::Identity => base,
            Self::Linear { factor, .. } if factor == 0.0 => base,
            Self::Linear { factor, offset } => (base - offset) / factor,
        }
    }
}

/// Definition of a unit of measurement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitBase {
    /// Unit name (e.g. `"celsius"`).
    pub name: Arc<str>,
    /// Unit symbol (e.g. `"°C"`).
    pub symbol: Arc<str>,
    /// Name of the quantity category (e.g. `"temperature"`).
    pub category: Arc<str>,
    /// Conversion to the category's base unit.
    pub conversion: Conversion,
}

impl UnitBase {
    /// Creates a base unit of `category`.
    #[must_use]
    pub fn base(name: &str, symbol: &str, category: &str) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            category: category.into(),
            conversion: Conversion::Identity,
        }
    }

    /// Creates a unit with a linear conversion to the base unit.
    #[must_use]
    pub fn linear(name: &str, symbol: &str, category: &str, factor: f64, offset: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            category: category.into(),
            conversion: Conversion::Linear { factor, offset },
        }
    }

    /// Normalizes `magnitude` with `prefix` into the base unit.
    #[must_use]
    pub fn to_base(&self, magnitude: f64, prefix: Prefix) -> f64 {
        self.conversion.to_base(magnitude * prefix.factor())
    }

    /// Converts a base-unit magnitude into this unit with `prefix`.
    #[must_use]
    pub fn from_base(&self, base: f64, prefix: Prefix) -> f64 {
        self.conversion.from_base(base) / prefix.factor()
    }
}

impl fmt::Display for UnitBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Normalizes a magnitude that may have no unit.
#[must_use]
pub fn to_base(magnitude: f64, prefix: Prefix, unit: Option<&UnitBase>) -> f64 {
    match unit {
        Some(unit) => unit.to_base(magnitude, prefix),
        None => magnitude * prefix.factor(),
    }
}

/// Inverse of [`to_base`].
#[must_use]
pub fn from_base(base: f64, prefix: Prefix, unit: Option<&UnitBase>) -> f64 {
    match unit {
        Some(unit) => unit.from_base(base, prefix),
        None => base / prefix.factor(),
    }
}
