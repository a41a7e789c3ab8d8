//! Mutable value instances.
//!
//! An instance wraps a shared definition and carries its own current value.
//! Numerical instances also carry their own bounds, unit and prefix; the
//! current value is clamped to the bounds on every write.

use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use praxis_foundation::unit::{from_base, to_base};
use praxis_foundation::{Error, ErrorKind, Prefix, Primitive, Result, UnitBase, Vector4};
use rand::Rng;

use crate::definition::{
    BooleanValueBase, NumericalValueBase, StringValueBase, TermValueBase, ValueBase,
    VectorValueBase,
};
use crate::range::sample_inclusive;
use crate::scope::VariableScope;
use crate::sign::compare_numbers;

// =============================================================================
// ValueInstance
// =============================================================================

/// A mutable value of any kind.
#[derive(Clone, Debug)]
pub enum ValueInstance {
    /// A truth value.
    Boolean(BooleanValueInstance),
    /// A bounded number with unit.
    Numerical(NumericalValueInstance),
    /// A string.
    String(StringValueInstance),
    /// A vector.
    Vector(VectorValueInstance),
    /// A term, evaluated on demand.
    Term(TermValueInstance),
}

impl ValueInstance {
    /// Creates an instance of `base`, sampling random starting values.
    pub fn new<R: Rng + ?Sized>(base: &ValueBase, rng: &mut R) -> Self {
        match base {
            ValueBase::Boolean(b) => Self::Boolean(BooleanValueInstance::new(Arc::new(b.clone()), rng)),
            ValueBase::Numerical(b) => {
                Self::Numerical(NumericalValueInstance::new(Arc::new(b.clone()), rng))
            }
            ValueBase::String(b) => Self::String(StringValueInstance::new(Arc::new(b.clone()), rng)),
            ValueBase::Vector(b) => Self::Vector(VectorValueInstance::new(Arc::new(b.clone()), rng)),
            ValueBase::Term(b) => Self::Term(TermValueInstance::new(Arc::new(b.clone()))),
        }
    }

    /// Name of the variant, used in error messages.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Numerical(_) => "numerical",
            Self::String(_) => "string",
            Self::Vector(_) => "vector",
            Self::Term(_) => "term",
        }
    }

    /// The current value as a primitive. Numbers are in base units.
    pub fn primitive(&self, scope: &dyn VariableScope) -> Primitive {
        match self {
            Self::Boolean(v) => Primitive::Boolean(v.value()),
            Self::Numerical(v) => Primitive::Number(v.base_value()),
            Self::String(v) => Primitive::String(Arc::clone(v.value())),
            Self::Vector(v) => Primitive::Vector(v.value()),
            Self::Term(v) => Primitive::Number(v.value(scope)),
        }
    }

    /// `self + other`. Strings concatenate.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidOperands`] when the variants cannot be added.
    pub fn add(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => Ok(Self::Numerical(a.add(b))),
            (Self::Vector(a), Self::Vector(b)) => Ok(Self::Vector(a.with_value(a.value().add(b.value())))),
            (Self::String(a), Self::String(b)) => {
                let joined = format!("{}{}", a.value(), b.value());
                Ok(Self::String(a.with_value(joined.as_str().into())))
            }
            _ => Err(self.invalid("add", other)),
        }
    }

    /// `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidOperands`] when the variants cannot be subtracted.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => Ok(Self::Numerical(a.subtract(b))),
            (Self::Vector(a), Self::Vector(b)) => Ok(Self::Vector(a.with_value(a.value().sub(b.value())))),
            _ => Err(self.invalid("subtract", other)),
        }
    }

    /// `self * other`. A vector times a number scales the vector.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidOperands`] when the variants cannot be multiplied.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => Ok(Self::Numerical(a.multiply(b))),
            (Self::Vector(a), Self::Vector(b)) => Ok(Self::Vector(a.with_value(a.value().mul(b.value())))),
            (Self::Vector(a), Self::Numerical(b)) => {
                Ok(Self::Vector(a.with_value(a.value().scale(b.base_value()))))
            }
            _ => Err(self.invalid("multiply", other)),
        }
    }

    /// `self / other`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidOperands`] when the variants cannot be
    /// divided and [`ErrorKind::DivisionByZero`] for a zero numerical divisor.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => Ok(Self::Numerical(a.divide(b)?)),
            (Self::Vector(a), Self::Vector(b)) => Ok(Self::Vector(a.with_value(a.value().div(b.value())))),
            _ => Err(self.invalid("divide", other)),
        }
    }

    /// Orders two instances of the same variant.
    ///
    /// Numbers compare in base units, vectors by length, booleans with
    /// `false < true`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidOperands`] for mismatched or term variants.
    pub fn compare(&self, other: &Self) -> Result<Option<Ordering>> {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => Ok(a.compare(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Ok(Some(a.value().cmp(&b.value()))),
            (Self::String(a), Self::String(b)) => Ok(Some(a.value().cmp(b.value()))),
            (Self::Vector(a), Self::Vector(b)) => {
                Ok(compare_numbers(a.value().length(), b.value().length()))
            }
            _ => Err(self.invalid("compare", other)),
        }
    }

    fn invalid(&self, operation: &'static str, other: &Self) -> Error {
        Error::invalid_operands(operation, self.variant_name(), other.variant_name())
    }
}

// =============================================================================
// Boolean
// =============================================================================

/// Mutable boolean.
#[derive(Clone, Debug)]
pub struct BooleanValueInstance {
    base: Arc<BooleanValueBase>,
    value: bool,
}

impl BooleanValueInstance {
    /// Creates an instance; randomized definitions flip a coin.
    pub fn new<R: Rng + ?Sized>(base: Arc<BooleanValueBase>, rng: &mut R) -> Self {
        let value = if base.random { rng.gen_bool(0.5) } else { base.value };
        Self { base, value }
    }

    /// The definition this instance was created from.
    #[must_use]
    pub fn base(&self) -> &BooleanValueBase {
        &self.base
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }

    /// Sets the current value.
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    /// Flips the current value.
    pub fn reverse(&mut self) {
        self.value = !self.value;
    }
}

// =============================================================================
// Numerical
// =============================================================================

/// Mutable bounded number.
///
/// `min <= value <= max` holds after every write. The base-unit value is
/// memoized until the value, unit or prefix changes.
#[derive(Clone, Debug)]
pub struct NumericalValueInstance {
    base: Arc<NumericalValueBase>,
    value: f64,
    min: f64,
    max: f64,
    prefix: Prefix,
    unit: Option<Arc<UnitBase>>,
    base_value: OnceLock<f64>,
}

impl NumericalValueInstance {
    /// Creates an instance, sampling the random range once if present.
    pub fn new<R: Rng + ?Sized>(base: Arc<NumericalValueBase>, rng: &mut R) -> Self {
        let value = match base.random {
            Some((low, high)) => sample_inclusive(rng, low, high),
            None => base.magnitude,
        };
        let (min, max) = (base.min.min(base.max), base.max.max(base.min));
        Self {
            value: initial(value, min, max),
            min,
            max,
            prefix: base.prefix,
            unit: base.unit.clone(),
            base_value: OnceLock::new(),
            base,
        }
    }

    /// Creates an instance of a non-random definition.
    #[must_use]
    pub fn from_base(base: NumericalValueBase) -> Self {
        let (min, max) = (base.min.min(base.max), base.max.max(base.min));
        Self {
            value: initial(base.magnitude, min, max),
            min,
            max,
            prefix: base.prefix,
            unit: base.unit.clone(),
            base_value: OnceLock::new(),
            base: Arc::new(base),
        }
    }

    /// The definition this instance was created from.
    #[must_use]
    pub fn base(&self) -> &NumericalValueBase {
        &self.base
    }

    /// Current magnitude, in this instance's unit and prefix.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Current prefix.
    #[must_use]
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// Current unit.
    #[must_use]
    pub fn unit(&self) -> Option<&Arc<UnitBase>> {
        self.unit.as_ref()
    }

    /// Sets the magnitude, clamped to the bounds.
    ///
    /// Non-finite writes are ignored.
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.value = value.clamp(self.min, self.max);
        self.base_value = OnceLock::new();
    }

    /// Sets the lower bound; it never exceeds the upper bound.
    pub fn set_min(&mut self, min: f64) {
        self.min = min.min(self.max);
        self.set_value(self.value);
    }

    /// Sets the upper bound; it never drops below the lower bound.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(self.min);
        self.set_value(self.value);
    }

    /// Changes the prefix without converting the magnitude.
    pub fn set_prefix(&mut self, prefix: Prefix) {
        self.prefix = prefix;
        self.base_value = OnceLock::new();
    }

    /// Changes the unit without converting the magnitude.
    pub fn set_unit(&mut self, unit: Option<Arc<UnitBase>>) {
        self.unit = unit;
        self.base_value = OnceLock::new();
    }

    /// The current value normalized to base units.
    pub fn base_value(&self) -> f64 {
        *self
            .base_value
            .get_or_init(|| to_base(self.value, self.prefix, self.unit.as_deref()))
    }

    /// Sets the value from a base-unit quantity, clamped to the bounds.
    pub fn set_base_value(&mut self, base: f64) {
        self.set_value(from_base(base, self.prefix, self.unit.as_deref()));
    }

    /// Re-expresses the value and bounds in another unit and prefix,
    /// preserving the physical quantity.
    pub fn convert_to(&mut self, unit: Option<Arc<UnitBase>>, prefix: Prefix) {
        let old_unit = self.unit.take();
        let convert = |x: f64| {
            if x <= f64::MIN || x >= f64::MAX {
                return x;
            }
            let base = to_base(x, self.prefix, old_unit.as_deref());
            from_base(base, prefix, unit.as_deref())
        };
        let value = convert(self.value);
        let (a, b) = (convert(self.min), convert(self.max));
        self.min = a.min(b);
        self.max = a.max(b);
        self.prefix = prefix;
        self.unit = unit;
        self.set_value(value);
    }

    fn with_base_value(&self, base: f64) -> Self {
        let mut result = self.clone();
        result.set_base_value(base);
        result
    }

    /// Sum in base units, expressed in this instance's unit and bounds.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.with_base_value(self.base_value() + other.base_value())
    }

    /// Difference in base units.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.with_base_value(self.base_value() - other.base_value())
    }

    /// Product in base units.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        self.with_base_value(self.base_value() * other.base_value())
    }

    /// Quotient in base units.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DivisionByZero`] if `other` is zero.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        let divisor = other.base_value();
        if divisor == 0.0 {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        Ok(self.with_base_value(self.base_value() / divisor))
    }

    /// Orders by base-unit value.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        compare_numbers(self.base_value(), other.base_value())
    }
}

/// A starting magnitude within the bounds; non-finite starts at zero.
fn initial(value: f64, min: f64, max: f64) -> f64 {
    let value = if value.is_finite() { value } else { 0.0 };
    value.clamp(min, max)
}

// =============================================================================
// String
// =============================================================================

/// Mutable string.
#[derive(Clone, Debug)]
pub struct StringValueInstance {
    base: Arc<StringValueBase>,
    value: Arc<str>,
}

impl StringValueInstance {
    /// Creates an instance; definitions with choices pick one at random.
    pub fn new<R: Rng + ?Sized>(base: Arc<StringValueBase>, rng: &mut R) -> Self {
        let value = if base.choices.is_empty() {
            Arc::clone(&base.value)
        } else {
            Arc::clone(&base.choices[rng.gen_range(0..base.choices.len())])
        };
        Self { base, value }
    }

    /// The definition this instance was created from.
    #[must_use]
    pub fn base(&self) -> &StringValueBase {
        &self.base
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &Arc<str> {
        &self.value
    }

    /// Sets the current value.
    pub fn set_value(&mut self, value: Arc<str>) {
        self.value = value;
    }

    /// Appends to the current value.
    pub fn append(&mut self, suffix: &str) {
        self.value = format!("{}{suffix}", self.value).into();
    }

    fn with_value(&self, value: Arc<str>) -> Self {
        Self {
            base: Arc::clone(&self.base),
            value,
        }
    }
}

// =============================================================================
// Vector
// =============================================================================

/// Mutable vector.
#[derive(Clone, Debug)]
pub struct VectorValueInstance {
    base: Arc<VectorValueBase>,
    value: Vector4,
}

impl VectorValueInstance {
    /// Creates an instance, sampling each component of the random range.
    pub fn new<R: Rng + ?Sized>(base: Arc<VectorValueBase>, rng: &mut R) -> Self {
        let value = match base.random {
            Some((low, high)) => Vector4::new(
                sample_inclusive(rng, low.x.min(high.x), low.x.max(high.x)),
                sample_inclusive(rng, low.y.min(high.y), low.y.max(high.y)),
                sample_inclusive(rng, low.z.min(high.z), low.z.max(high.z)),
                sample_inclusive(rng, low.w.min(high.w), low.w.max(high.w)),
            ),
            None => base.value,
        };
        Self { base, value }
    }

    /// The definition this instance was created from.
    #[must_use]
    pub fn base(&self) -> &VectorValueBase {
        &self.base
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> Vector4 {
        self.value
    }

    /// Sets the current value.
    pub fn set_value(&mut self, value: Vector4) {
        self.value = value;
    }

    fn with_value(&self, value: Vector4) -> Self {
        Self {
            base: Arc::clone(&self.base),
            value,
        }
    }
}

// =============================================================================
// Term
// =============================================================================

/// A term instance; it has no state of its own and evaluates on demand.
#[derive(Clone, Debug)]
pub struct TermValueInstance {
    base: Arc<TermValueBase>,
}

impl TermValueInstance {
    /// Creates an instance.
    #[must_use]
    pub fn new(base: Arc<TermValueBase>) -> Self {
        Self { base }
    }

    /// The definition this instance was created from.
    #[must_use]
    pub fn base(&self) -> &TermValueBase {
        &self.base
    }

    /// Evaluates the term.
    pub fn value(&self, scope: &dyn VariableScope) -> f64 {
        self.base.evaluate(scope)
    }
}
