//! Immutable value definitions.
//!
//! A definition is either a literal or bound to a variable. When a variable
//! is present it takes precedence over the literal at evaluation time.

use std::sync::Arc;

use praxis_foundation::unit::to_base;
use praxis_foundation::{Primitive, PrimitiveKind, Prefix, UnitBase, Vector4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scope::{VariableId, VariableScope};

// =============================================================================
// ValueBase
// =============================================================================

/// A value definition of any kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueBase {
    /// A truth value.
    Boolean(BooleanValueBase),
    /// A number with optional unit and bounds.
    Numerical(NumericalValueBase),
    /// A string.
    String(StringValueBase),
    /// A four-component vector.
    Vector(VectorValueBase),
    /// An arithmetic term over numerical values.
    Term(TermValueBase),
}

impl ValueBase {
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

    /// The primitive kind this definition evaluates to.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Numerical(_) | Self::Term(_) => PrimitiveKind::Number,
            Self::String(_) => PrimitiveKind::String,
            Self::Vector(_) => PrimitiveKind::Vector,
        }
    }

    /// Evaluates the definition. Numbers are in base units.
    pub fn evaluate(&self, scope: &dyn VariableScope) -> Primitive {
        match self {
            Self::Boolean(base) => Primitive::Boolean(base.value(scope)),
            Self::Numerical(base) => Primitive::Number(base.value(scope)),
            Self::String(base) => Primitive::String(base.value(scope)),
            Self::Vector(base) => Primitive::Vector(base.value(scope)),
            Self::Term(base) => Primitive::Number(base.evaluate(scope)),
        }
    }
}

impl From<bool> for ValueBase {
    fn from(value: bool) -> Self {
        Self::Boolean(BooleanValueBase::new(value))
    }
}

impl From<f64> for ValueBase {
    fn from(value: f64) -> Self {
        Self::Numerical(NumericalValueBase::new(value))
    }
}

impl From<&str> for ValueBase {
    fn from(value: &str) -> Self {
        Self::String(StringValueBase::new(value))
    }
}

impl From<Vector4> for ValueBase {
    fn from(value: Vector4) -> Self {
        Self::Vector(VectorValueBase::new(value))
    }
}

// =============================================================================
// Boolean
// =============================================================================

/// Boolean definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BooleanValueBase {
    /// Literal value.
    pub value: bool,
    /// Instances pick a random value at construction.
    pub random: bool,
    /// Variable that overrides the literal.
    pub variable: Option<VariableId>,
}

impl BooleanValueBase {
    /// A literal boolean.
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// A boolean bound to `variable`.
    #[must_use]
    pub fn variable(variable: VariableId) -> Self {
        Self {
            variable: Some(variable),
            ..Self::default()
        }
    }

    /// Marks instances as randomly initialized.
    #[must_use]
    pub fn randomized(mut self) -> Self {
        self.random = true;
        self
    }

    /// Evaluates the definition.
    pub fn value(&self, scope: &dyn VariableScope) -> bool {
        match &self.variable {
            Some(variable) => scope.resolve(variable, PrimitiveKind::Boolean).as_bool(),
            None => self.value,
        }
    }
}

// =============================================================================
// Numerical
// =============================================================================

/// Numerical definition with optional unit, prefix, bounds and random range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericalValueBase {
    /// Literal magnitude, expressed in `prefix` and `unit`.
    pub magnitude: f64,
    /// Metric prefix of the magnitude.
    pub prefix: Prefix,
    /// Unit of the magnitude; unitless when absent.
    pub unit: Option<Arc<UnitBase>>,
    /// Lower bound for instances.
    pub min: f64,
    /// Upper bound for instances.
    pub max: f64,
    /// Inclusive range instances sample their starting value from.
    pub random: Option<(f64, f64)>,
    /// Variable that overrides the literal.
    pub variable: Option<VariableId>,
}

impl Default for NumericalValueBase {
    fn default() -> Self {
        Self {
            magnitude: 0.0,
            prefix: Prefix::None,
            unit: None,
            min: f64::MIN,
            max: f64::MAX,
            random: None,
            variable: None,
        }
    }
}

impl NumericalValueBase {
    /// A unitless literal.
    #[must_use]
    pub fn new(magnitude: f64) -> Self {
        Self {
            magnitude,
            ..Self::default()
        }
    }

    /// A number bound to `variable`.
    #[must_use]
    pub fn variable(variable: VariableId) -> Self {
        Self {
            variable: Some(variable),
            ..Self::default()
        }
    }

    /// Sets the unit and prefix.
    #[must_use]
    pub fn with_unit(mut self, unit: Arc<UnitBase>, prefix: Prefix) -> Self {
        self.unit = Some(unit);
        self.prefix = prefix;
        self
    }

    /// Sets the instance bounds; reversed bounds are swapped.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        if min <= max {
            self.min = min;
            self.max = max;
        } else {
            self.min = max;
            self.max = min;
        }
        self
    }

    /// Sets the random starting range for instances.
    #[must_use]
    pub fn with_random(mut self, low: f64, high: f64) -> Self {
        self.random = Some((low.min(high), low.max(high)));
        self
    }

    /// The literal magnitude normalized to base units.
    #[must_use]
    pub fn base_literal(&self) -> f64 {
        to_base(self.magnitude, self.prefix, self.unit.as_deref())
    }

    /// Evaluates the definition in base units.
    pub fn value(&self, scope: &dyn VariableScope) -> f64 {
        match &self.variable {
            Some(variable) => scope.resolve(variable, PrimitiveKind::Number).as_number(),
            None => self.base_literal(),
        }
    }
}

// =============================================================================
// String
// =============================================================================

/// String definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StringValueBase {
    /// Literal value.
    pub value: Arc<str>,
    /// Candidates instances choose from at random; empty for a literal.
    pub choices: Vec<Arc<str>>,
    /// Variable that overrides the literal.
    pub variable: Option<VariableId>,
}

impl Default for StringValueBase {
    fn default() -> Self {
        Self {
            value: "".into(),
            choices: Vec::new(),
            variable: None,
        }
    }
}

impl StringValueBase {
    /// A literal string.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// A string bound to `variable`.
    #[must_use]
    pub fn variable(variable: VariableId) -> Self {
        Self {
            variable: Some(variable),
            ..Self::default()
        }
    }

    /// Sets the random candidates.
    #[must_use]
    pub fn with_choices<'a>(mut self, choices: impl IntoIterator<Item = &'a str>) -> Self {
        self.choices = choices.into_iter().map(Arc::from).collect();
        self
    }

    /// Evaluates the definition.
    pub fn value(&self, scope: &dyn VariableScope) -> Arc<str> {
        match &self.variable {
            Some(variable) => scope.resolve(variable, PrimitiveKind::String).as_string(),
            None => Arc::clone(&self.value),
        }
    }
}

// =============================================================================
// Vector
// =============================================================================

/// Vector definition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VectorValueBase {
    /// Literal value.
    pub value: Vector4,
    /// Per-component inclusive range instances sample from.
    pub random: Option<(Vector4, Vector4)>,
    /// Variable that overrides the literal.
    pub variable: Option<VariableId>,
}

impl VectorValueBase {
    /// A literal vector.
    #[must_use]
    pub fn new(value: Vector4) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// A vector bound to `variable`.
    #[must_use]
    pub fn variable(variable: VariableId) -> Self {
        Self {
            variable: Some(variable),
            ..Self::default()
        }
    }

    /// Sets the random range.
    #[must_use]
    pub fn with_random(mut self, low: Vector4, high: Vector4) -> Self {
        self.random = Some((low, high));
        self
    }

    /// Evaluates the definition.
    pub fn value(&self, scope: &dyn VariableScope) -> Vector4 {
        match &self.variable {
            Some(variable) => scope.resolve(variable, PrimitiveKind::Vector).as_vector(),
            None => self.value,
        }
    }
}

// =============================================================================
// Term
// =============================================================================

/// Binary operator of a term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum TermOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    Min,
    Max,
}

impl TermOperator {
    /// Applies the operator.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
            Self::Power => left.powf(right),
            Self::Modulo => left % right,
            Self::Min => left.min(right),
            Self::Max => left.max(right),
        }
    }
}

/// Unary function applied to a term operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum TermFunction {
    Abs,
    Negate,
    Square,
    Sqrt,
    Exp,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Floor,
    Ceil,
    Round,
    Reciprocal,
}

impl TermFunction {
    /// Applies the function.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Abs => x.abs(),
            Self::Negate => -x,
            Self::Square => x * x,
            Self::Sqrt => x.sqrt(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            Self::Round => x.round(),
            Self::Reciprocal => x.recip(),
        }
    }
}

/// Operand of a term: a numerical definition or a nested term.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TermOperand {
    /// A numerical definition.
    Numerical(NumericalValueBase),
    /// A nested term.
    Term(TermValueBase),
}

impl TermOperand {
    fn evaluate(&self, scope: &dyn VariableScope) -> f64 {
        match self {
            Self::Numerical(base) => base.value(scope),
            Self::Term(term) => term.evaluate(scope),
        }
    }
}

impl From<f64> for TermOperand {
    fn from(value: f64) -> Self {
        Self::Numerical(NumericalValueBase::new(value))
    }
}

impl From<NumericalValueBase> for TermOperand {
    fn from(value: NumericalValueBase) -> Self {
        Self::Numerical(value)
    }
}

impl From<TermValueBase> for TermOperand {
    fn from(value: TermValueBase) -> Self {
        Self::Term(value)
    }
}

/// Arithmetic term `function1(value1) operator function2(value2)`.
///
/// Functions and the operator are optional; without an operator the term is
/// just `function1(value1)`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TermValueBase {
    /// First operand.
    pub value1: Option<Box<TermOperand>>,
    /// Function applied to the first operand.
    pub function1: Option<TermFunction>,
    /// Operator joining the operands.
    pub operator: Option<TermOperator>,
    /// Function applied to the second operand.
    pub function2: Option<TermFunction>,
    /// Second operand.
    pub value2: Option<Box<TermOperand>>,
}

impl TermValueBase {
    /// A term with a single operand.
    #[must_use]
    pub fn unary(function: Option<TermFunction>, value: impl Into<TermOperand>) -> Self {
        Self {
            value1: Some(Box::new(value.into())),
            function1: function,
            ..Self::default()
        }
    }

    /// A term joining two operands.
    #[must_use]
    pub fn binary(
        value1: impl Into<TermOperand>,
        operator: TermOperator,
        value2: impl Into<TermOperand>,
    ) -> Self {
        Self {
            value1: Some(Box::new(value1.into())),
            operator: Some(operator),
            value2: Some(Box::new(value2.into())),
            ..Self::default()
        }
    }

    /// Sets the function applied to the first operand.
    #[must_use]
    pub fn with_function1(mut self, function: TermFunction) -> Self {
        self.function1 = Some(function);
        self
    }

    /// Sets the function applied to the second operand.
    #[must_use]
    pub fn with_function2(mut self, function: TermFunction) -> Self {
        self.function2 = Some(function);
        self
    }

    /// Evaluates the term.
    ///
    /// A missing operand or a non-finite result yields the scope's default
    /// term value.
    pub fn evaluate(&self, scope: &dyn VariableScope) -> f64 {
        let fallback = scope.value_config().default_term_value;
        let Some(value1) = &self.value1 else {
            return fallback;
        };
        let mut result = apply(self.function1, value1.evaluate(scope));
        if let Some(operator) = self.operator {
            let Some(value2) = &self.value2 else {
                return fallback;
            };
            result = operator.apply(result, apply(self.function2, value2.evaluate(scope)));
        }
        if result.is_finite() { result } else { fallback }
    }
}

fn apply(function: Option<TermFunction>, x: f64) -> f64 {
    function.map_or(x, |f| f.apply(x))
}
