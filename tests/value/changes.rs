//! Integration tests for conditions, changes, and terms

use praxis_foundation::{Primitive, PrimitiveKind};
use praxis_value::{
    ChangeKind, EqualitySign, NoVariables, NumericalValueBase, NumericalValueInstance,
    TermFunction, TermOperator, TermValueBase, ValueChange, ValueCondition, ValueConfig,
    ValueInstance, VariableId, VariableScope,
};

/// Scope that resolves `strength` and carries a custom config.
struct Stats {
    strength: f64,
    config: ValueConfig,
}

impl VariableScope for Stats {
    fn resolve(&self, variable: &VariableId, kind: PrimitiveKind) -> Primitive {
        match variable.as_str() {
            "strength" => Primitive::Number(self.strength).coerce(kind),
            _ => Primitive::default_for(kind),
        }
    }

    fn value_config(&self) -> &ValueConfig {
        &self.config
    }
}

fn stats(strength: f64) -> Stats {
    Stats {
        strength,
        config: ValueConfig::default(),
    }
}

fn stamina(value: f64) -> ValueInstance {
    ValueInstance::Numerical(NumericalValueInstance::from_base(
        NumericalValueBase::new(value).with_bounds(0.0, 100.0),
    ))
}

// =============================================================================
// Conditions
// =============================================================================

#[test]
fn numerical_conditions() {
    let tired = ValueCondition::number(EqualitySign::Less, 20.0);
    assert!(tired.is_satisfied(&stamina(10.0), &NoVariables));
    assert!(!tired.is_satisfied(&stamina(20.0), &NoVariables));

    let rested = ValueCondition::between(50.0, 100.0);
    assert!(rested.is_satisfied(&stamina(75.0), &NoVariables));
}

#[test]
fn conditions_coerce_the_value() {
    // A boolean attribute checked against a number.
    let lit = ValueCondition::number(EqualitySign::Equal, 1.0);
    assert!(lit.is_satisfied_by(&Primitive::Boolean(true), &NoVariables));
    assert!(!lit.is_satisfied_by(&Primitive::Boolean(false), &NoVariables));
}

#[test]
fn string_and_boolean_conditions() {
    let oak = ValueCondition::string(EqualitySign::Equal, "oak");
    assert!(oak.is_satisfied_by(&Primitive::from("oak"), &NoVariables));
    assert!(!oak.is_satisfied_by(&Primitive::from("elm"), &NoVariables));

    let open = ValueCondition::is_true(true);
    assert!(open.is_satisfied_by(&Primitive::Boolean(true), &NoVariables));
}

// =============================================================================
// Changes
// =============================================================================

#[test]
fn changes_read_variables() {
    let mut value = stamina(10.0);
    let train = ValueChange::Numerical {
        kind: ChangeKind::Increase,
        value: NumericalValueBase::variable(VariableId::new("strength")),
    };
    assert!(train.apply(&mut value, &stats(15.0)));
    assert!((value.primitive(&NoVariables).as_number() - 25.0).abs() < f64::EPSILON);
}

#[test]
fn change_sequences_stay_in_bounds() {
    let mut value = stamina(40.0);
    for change in [
        ValueChange::number(ChangeKind::Multiply, 3.0),
        ValueChange::number(ChangeKind::Decrease, 30.0),
        ValueChange::number(ChangeKind::Divide, 2.0),
    ] {
        assert!(change.apply(&mut value, &NoVariables));
    }
    // 40 * 3 clamps to 100, then 70, then 35.
    assert!((value.primitive(&NoVariables).as_number() - 35.0).abs() < f64::EPSILON);
}

// =============================================================================
// Terms
// =============================================================================

#[test]
fn terms_nest() {
    // (strength * 2) + sqrt(16)
    let term = TermValueBase::binary(
        TermValueBase::binary(
            NumericalValueBase::variable(VariableId::new("strength")),
            TermOperator::Multiply,
            2.0,
        ),
        TermOperator::Add,
        16.0,
    )
    .with_function2(TermFunction::Sqrt);
    assert!((term.evaluate(&stats(5.0)) - 14.0).abs() < f64::EPSILON);
}

#[test]
fn non_finite_terms_use_the_configured_default() {
    let term = TermValueBase::binary(1.0, TermOperator::Divide, 0.0);
    let scope = Stats {
        strength: 0.0,
        config: ValueConfig::default().with_default_term_value(-1.0),
    };
    assert!((term.evaluate(&scope) + 1.0).abs() < f64::EPSILON);
}

#[test]
fn min_and_max_operators() {
    let low = TermValueBase::binary(3.0, TermOperator::Min, 7.0);
    let high = TermValueBase::binary(3.0, TermOperator::Max, 7.0);
    assert!((low.evaluate(&NoVariables) - 3.0).abs() < f64::EPSILON);
    assert!((high.evaluate(&NoVariables) - 7.0).abs() < f64::EPSILON);
}
