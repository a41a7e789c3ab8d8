//! Integration tests for numerical ranges

use praxis_foundation::{Primitive, PrimitiveKind};
use praxis_value::{
    DualEqualitySign, EqualitySign, NoVariables, NumericalValueBase, NumericalValueRange,
    VariableId, VariableScope,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Scope binding `limit` to a fixed number.
struct Limit(f64);

impl VariableScope for Limit {
    fn resolve(&self, variable: &VariableId, kind: PrimitiveKind) -> Primitive {
        if variable.as_str() == "limit" {
            Primitive::Number(self.0).coerce(kind)
        } else {
            Primitive::default_for(kind)
        }
    }
}

// =============================================================================
// Membership
// =============================================================================

#[test]
fn between_two_and_five() {
    let range = NumericalValueRange::literal(DualEqualitySign::Between, 2.0, Some(5.0));
    assert!(range.is_in_range(3.0, &NoVariables));
    assert!(range.is_in_range(2.0, &NoVariables));
    assert!(range.is_in_range(5.0, &NoVariables));
    assert!(!range.is_in_range(6.0, &NoVariables));
    assert!((range.minimum_highest_value(&NoVariables) - 5.0).abs() < f64::EPSILON);
    assert_eq!(range.minimum_highest_integer(&NoVariables), 5);
}

#[test]
fn reversed_bounds_are_swapped() {
    let range = NumericalValueRange::literal(DualEqualitySign::Between, 5.0, Some(2.0));
    assert!(range.is_in_range(3.0, &NoVariables));
    assert!((range.min(&NoVariables) - 2.0).abs() < f64::EPSILON);
}

#[test]
fn not_between_excludes_the_interval() {
    let range = NumericalValueRange::literal(DualEqualitySign::NotBetween, 2.0, Some(5.0));
    assert!(range.is_in_range(1.0, &NoVariables));
    assert!(!range.is_in_range(3.0, &NoVariables));
    assert!(range.is_in_range(6.0, &NoVariables));
}

#[test]
fn squared_comparison_matches_plain_comparison() {
    let range = NumericalValueRange::literal(DualEqualitySign::Between, 2.0, Some(5.0));
    for d in [1.0_f64, 2.0, 3.5, 5.0, 5.5] {
        assert_eq!(
            range.is_in_range_squared(d * d, &NoVariables),
            range.is_in_range(d, &NoVariables),
            "distance {d}"
        );
    }
}

#[test]
fn bounds_can_be_variables() {
    let range = NumericalValueRange::single(
        EqualitySign::Less,
        NumericalValueBase::variable(VariableId::new("limit")),
    );
    assert!(range.is_in_range(3.0, &Limit(10.0)));
    assert!(!range.is_in_range(3.0, &Limit(1.0)));
    // Unbound variables resolve to zero.
    assert!(!range.is_in_range(3.0, &NoVariables));
}

// =============================================================================
// Sampling
// =============================================================================

fn signs() -> impl Strategy<Value = DualEqualitySign> {
    prop::sample::select(vec![
        DualEqualitySign::Equal,
        DualEqualitySign::Greater,
        DualEqualitySign::GreaterOrEqual,
        DualEqualitySign::Less,
        DualEqualitySign::LessOrEqual,
        DualEqualitySign::Between,
        DualEqualitySign::NotBetween,
    ])
}

proptest! {
    #[test]
    fn samples_satisfy_the_range(
        sign in signs(),
        low in -100.0f64..100.0,
        width in 1.0f64..50.0,
        seed in any::<u64>(),
    ) {
        let range = NumericalValueRange::literal(sign, low, Some(low + width));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let value = range.random_value(&NoVariables, &mut rng);
        prop_assert!(range.is_in_range(value, &NoVariables), "{value} not in {range:?}");
    }

    #[test]
    fn integer_samples_satisfy_integer_ranges(
        sign in signs(),
        low in -100i64..100,
        width in 1i64..50,
        seed in any::<u64>(),
    ) {
        #[allow(clippy::cast_precision_loss)]
        let range = NumericalValueRange::literal(sign, low as f64, Some((low + width) as f64));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let value = range.random_integer(&NoVariables, &mut rng);
        #[allow(clippy::cast_precision_loss)]
        let as_float = value as f64;
        prop_assert!(range.is_in_range(as_float, &NoVariables), "{value} not in {range:?}");
        prop_assert!(value <= range.minimum_highest_integer(&NoVariables));
    }
}
