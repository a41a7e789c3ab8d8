//! Numeric ranges with one or two bounds.
//!
//! Besides membership tests, a range can sample a value that satisfies it.
//! Open-ended ranges sample within a window sized by
//! [`ValueConfig::sampling_multiplier`](crate::ValueConfig): `> v` samples
//! from `(v, v * m]` when `v` is positive and `(v, v + m]` otherwise; `< v`
//! samples from `[0, v)` when `v` is positive and `[v - m, v)` otherwise.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::definition::NumericalValueBase;
use crate::scope::VariableScope;
use crate::sign::{DualEqualitySign, EqualitySign};

/// A sign with one or two numerical bounds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericalValueRange {
    /// Comparison applied to the bounds.
    pub sign: DualEqualitySign,
    /// First bound.
    pub value: NumericalValueBase,
    /// Second bound, for `Between` and `NotBetween`.
    pub value2: Option<NumericalValueBase>,
}

impl NumericalValueRange {
    /// Creates a range.
    #[must_use]
    pub fn new(
        sign: DualEqualitySign,
        value: NumericalValueBase,
        value2: Option<NumericalValueBase>,
    ) -> Self {
        Self {
            sign,
            value,
            value2,
        }
    }

    /// Creates a single-bound range.
    #[must_use]
    pub fn single(sign: EqualitySign, value: NumericalValueBase) -> Self {
        Self::new(sign.into(), value, None)
    }

    /// Creates an inclusive `Between` range.
    #[must_use]
    pub fn between(low: NumericalValueBase, high: NumericalValueBase) -> Self {
        Self::new(DualEqualitySign::Between, low, Some(high))
    }

    /// Creates a `NotBetween` range.
    #[must_use]
    pub fn not_between(low: NumericalValueBase, high: NumericalValueBase) -> Self {
        Self::new(DualEqualitySign::NotBetween, low, Some(high))
    }

    /// Shorthand for a unitless range over literal bounds.
    #[must_use]
    pub fn literal(sign: DualEqualitySign, value: f64, value2: Option<f64>) -> Self {
        Self::new(
            sign,
            NumericalValueBase::new(value),
            value2.map(NumericalValueBase::new),
        )
    }

    /// Evaluated bounds in base units, ordered for dual signs.
    ///
    /// A dual sign without a second bound uses the first bound for both.
    pub fn bounds(&self, scope: &dyn VariableScope) -> (f64, f64) {
        let low = self.value.value(scope);
        let high = self.value2.as_ref().map_or(low, |v| v.value(scope));
        if self.sign.is_dual() && high < low {
            (high, low)
        } else {
            (low, high)
        }
    }

    /// Lower bound (the first bound for single signs).
    pub fn min(&self, scope: &dyn VariableScope) -> f64 {
        self.bounds(scope).0
    }

    /// Upper bound (the first bound for single signs).
    pub fn max(&self, scope: &dyn VariableScope) -> f64 {
        let (low, high) = self.bounds(scope);
        if self.sign.is_dual() { high } else { low }
    }

    /// Returns true if `x` satisfies the range.
    pub fn is_in_range(&self, x: f64, scope: &dyn VariableScope) -> bool {
        let (low, high) = self.bounds(scope);
        self.accepts(x, low, high)
    }

    /// Like [`is_in_range`](Self::is_in_range) for a squared quantity.
    ///
    /// The bounds are squared (sign preserving) instead of taking the root
    /// of `x_squared`, so distance checks avoid a square root.
    pub fn is_in_range_squared(&self, x_squared: f64, scope: &dyn VariableScope) -> bool {
        let (low, high) = self.bounds(scope);
        self.accepts(x_squared, low * low.abs(), high * high.abs())
    }

    fn accepts(&self, x: f64, low: f64, high: f64) -> bool {
        match self.sign {
            DualEqualitySign::Between => {
                EqualitySign::GreaterOrEqual.compare_numbers(x, low)
                    && EqualitySign::LessOrEqual.compare_numbers(x, high)
            }
            DualEqualitySign::NotBetween => {
                EqualitySign::Less.compare_numbers(x, low)
                    || EqualitySign::Greater.compare_numbers(x, high)
            }
            single => single
                .as_single()
                .is_some_and(|sign| sign.compare_numbers(x, low)),
        }
    }

    /// Samples a value that satisfies the range.
    pub fn random_value<R: Rng + ?Sized>(&self, scope: &dyn VariableScope, rng: &mut R) -> f64 {
        let m = scope.value_config().sampling_multiplier;
        let (low, high) = self.bounds(scope);
        match self.sign {
            DualEqualitySign::Equal => low,
            DualEqualitySign::Greater | DualEqualitySign::NotEqual => above(rng, low, m),
            DualEqualitySign::GreaterOrEqual => sample_inclusive(rng, low, upper(low, m)),
            DualEqualitySign::Less => sample_half_open(rng, lower(low, m), low),
            DualEqualitySign::LessOrEqual => sample_inclusive(rng, lower(low, m), low),
            DualEqualitySign::Between => sample_inclusive(rng, low, high),
            DualEqualitySign::NotBetween => {
                if rng.gen_bool(0.5) {
                    sample_half_open(rng, lower(low, m), low)
                } else {
                    above(rng, high, m)
                }
            }
        }
    }

    /// Samples an integer that satisfies the range.
    ///
    /// A `Between` range containing no integer yields its rounded lower bound.
    pub fn random_integer<R: Rng + ?Sized>(&self, scope: &dyn VariableScope, rng: &mut R) -> i64 {
        let m = scope.value_config().sampling_multiplier;
        let (low, high) = self.bounds(scope);
        match self.sign {
            DualEqualitySign::Equal => to_int(low.round()),
            DualEqualitySign::Greater | DualEqualitySign::NotEqual => {
                let first = to_int(low.floor()) + 1;
                sample_int(rng, first, to_int(upper(low, m).floor()).max(first))
            }
            DualEqualitySign::GreaterOrEqual => {
                let first = to_int(low.ceil());
                sample_int(rng, first, to_int(upper(low, m).floor()).max(first))
            }
            DualEqualitySign::Less => {
                let last = to_int(low.ceil()) - 1;
                sample_int(rng, to_int(lower(low, m).ceil()).min(last), last)
            }
            DualEqualitySign::LessOrEqual => {
                let last = to_int(low.floor());
                sample_int(rng, to_int(lower(low, m).ceil()).min(last), last)
            }
            DualEqualitySign::Between => {
                let (first, last) = (to_int(low.ceil()), to_int(high.floor()));
                if first <= last {
                    sample_int(rng, first, last)
                } else {
                    to_int(low.round())
                }
            }
            DualEqualitySign::NotBetween => {
                if rng.gen_bool(0.5) {
                    let last = to_int(low.ceil()) - 1;
                    sample_int(rng, to_int(lower(low, m).ceil()).min(last), last)
                } else {
                    let first = to_int(high.floor()) + 1;
                    sample_int(rng, first, to_int(upper(high, m).floor()).max(first))
                }
            }
        }
    }

    /// The highest value [`random_value`](Self::random_value) can produce.
    ///
    /// Used to pick a deterministic representative that satisfies the range
    /// as generously as possible.
    pub fn minimum_highest_value(&self, scope: &dyn VariableScope) -> f64 {
        let m = scope.value_config().sampling_multiplier;
        let (low, high) = self.bounds(scope);
        match self.sign {
            DualEqualitySign::Equal | DualEqualitySign::Less | DualEqualitySign::LessOrEqual => low,
            DualEqualitySign::Between => high,
            DualEqualitySign::Greater
            | DualEqualitySign::GreaterOrEqual
            | DualEqualitySign::NotEqual => upper(low, m),
            DualEqualitySign::NotBetween => upper(high, m),
        }
    }

    /// The highest integer [`random_integer`](Self::random_integer) can produce.
    pub fn minimum_highest_integer(&self, scope: &dyn VariableScope) -> i64 {
        let m = scope.value_config().sampling_multiplier;
        let (low, high) = self.bounds(scope);
        match self.sign {
            DualEqualitySign::Equal => to_int(low.round()),
            DualEqualitySign::LessOrEqual => to_int(low.floor()),
            DualEqualitySign::Less => to_int(low.ceil()) - 1,
            DualEqualitySign::Between => {
                let last = to_int(high.floor());
                if to_int(low.ceil()) <= last {
                    last
                } else {
                    to_int(low.round())
                }
            }
            DualEqualitySign::Greater | DualEqualitySign::NotEqual => {
                to_int(upper(low, m).floor()).max(to_int(low.floor()) + 1)
            }
            DualEqualitySign::GreaterOrEqual => {
                to_int(upper(low, m).floor()).max(to_int(low.ceil()))
            }
            DualEqualitySign::NotBetween => {
                to_int(upper(high, m).floor()).max(to_int(high.floor()) + 1)
            }
        }
    }
}

// =============================================================================
// Sampling helpers
// =============================================================================

fn upper(v: f64, multiplier: f64) -> f64 {
    if v > 0.0 { v * multiplier } else { v + multiplier }
}

fn lower(v: f64, multiplier: f64) -> f64 {
    if v > 0.0 { 0.0 } else { v - multiplier }
}

/// Samples from `(v, upper(v)]`.
fn above<R: Rng + ?Sized>(rng: &mut R, v: f64, multiplier: f64) -> f64 {
    let top = upper(v, multiplier);
    top - sample_half_open(rng, 0.0, top - v)
}

/// Samples from `[low, high]`; degenerate or unbounded intervals yield `low`.
pub(crate) fn sample_inclusive<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low < high && (high - low).is_finite() {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

fn sample_half_open<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low < high && (high - low).is_finite() {
        rng.gen_range(low..high)
    } else {
        low
    }
}

fn sample_int<R: Rng + ?Sized>(rng: &mut R, first: i64, last: i64) -> i64 {
    if first < last {
        rng.gen_range(first..=last)
    } else {
        first
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_int(x: f64) -> i64 {
    x as i64
}
