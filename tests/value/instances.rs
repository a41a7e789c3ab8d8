//! Integration tests for value instances: bounds, units, arithmetic

use std::cmp::Ordering;
use std::sync::Arc;

use praxis_foundation::{ErrorKind, Prefix, Primitive, UnitBase};
use praxis_value::{
    NoVariables, NumericalValueBase, NumericalValueInstance, StringValueBase, ValueBase,
    ValueInstance,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn metre() -> Arc<UnitBase> {
    Arc::new(UnitBase::base("metre", "m", "length"))
}

fn number(instance: &ValueInstance) -> f64 {
    instance.primitive(&NoVariables).as_number()
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn values_clamp_to_bounds() {
    let mut hunger = NumericalValueInstance::from_base(NumericalValueBase::new(50.0).with_bounds(0.0, 100.0));
    hunger.set_value(150.0);
    assert!((hunger.value() - 100.0).abs() < f64::EPSILON);
    hunger.set_value(-3.0);
    assert!(hunger.value().abs() < f64::EPSILON);
}

#[test]
fn moving_a_bound_reclamps_the_value() {
    let mut hunger = NumericalValueInstance::from_base(NumericalValueBase::new(80.0).with_bounds(0.0, 100.0));
    hunger.set_max(60.0);
    assert!((hunger.value() - 60.0).abs() < f64::EPSILON);

    // A minimum above the maximum is pulled down to it.
    hunger.set_min(90.0);
    assert!((hunger.min() - 60.0).abs() < f64::EPSILON);
    assert!((hunger.value() - 60.0).abs() < f64::EPSILON);
}

#[test]
fn random_definitions_sample_within_bounds() {
    let base = ValueBase::Numerical(
        NumericalValueBase::new(0.0)
            .with_bounds(0.0, 10.0)
            .with_random(-5.0, 20.0),
    );
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..50 {
        let v = number(&ValueInstance::new(&base, &mut rng));
        assert!((0.0..=10.0).contains(&v), "{v} escaped its bounds");
    }
}

#[test]
fn string_choices_are_respected() {
    let base = ValueBase::String(StringValueBase::new("oak").with_choices(["oak", "birch", "pine"]));
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..20 {
        let ValueInstance::String(name) = ValueInstance::new(&base, &mut rng) else {
            panic!("expected a string instance");
        };
        assert!(["oak", "birch", "pine"].contains(&&**name.value()));
    }
}

// =============================================================================
// Units
// =============================================================================

#[test]
fn prefixed_values_compare_in_base_units() {
    let km = NumericalValueInstance::from_base(NumericalValueBase::new(1.0).with_unit(metre(), Prefix::Kilo));
    let m = NumericalValueInstance::from_base(NumericalValueBase::new(999.0).with_unit(metre(), Prefix::None));
    assert!((km.base_value() - 1000.0).abs() < 1e-9);
    assert_eq!(km.compare(&m), Some(Ordering::Greater));
}

#[test]
fn addition_keeps_the_left_unit() {
    let km = NumericalValueInstance::from_base(NumericalValueBase::new(1.5).with_unit(metre(), Prefix::Kilo));
    let m = NumericalValueInstance::from_base(NumericalValueBase::new(500.0).with_unit(metre(), Prefix::None));
    let sum = km.add(&m);
    assert_eq!(sum.prefix(), Prefix::Kilo);
    assert!((sum.value() - 2.0).abs() < 1e-9);
}

#[test]
fn conversion_preserves_the_quantity() {
    let mut distance = NumericalValueInstance::from_base(NumericalValueBase::new(2500.0).with_unit(metre(), Prefix::None));
    distance.convert_to(Some(metre()), Prefix::Kilo);
    assert!((distance.value() - 2.5).abs() < 1e-9);
    assert!((distance.base_value() - 2500.0).abs() < 1e-9);
}

// =============================================================================
// Arithmetic across variants
// =============================================================================

#[test]
fn strings_concatenate() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let a = ValueInstance::new(&ValueBase::from("iron "), &mut rng);
    let b = ValueInstance::new(&ValueBase::from("ore"), &mut rng);
    let joined = a.add(&b).unwrap();
    assert_eq!(joined.primitive(&NoVariables), Primitive::from("iron ore"));
}

#[test]
fn mismatched_variants_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let flag = ValueInstance::new(&ValueBase::from(true), &mut rng);
    let weight = ValueInstance::new(&ValueBase::from(4.0), &mut rng);
    let err = flag.add(&weight).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidOperands { .. }));
}

#[test]
fn division_by_zero_is_an_error() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let a = ValueInstance::new(&ValueBase::from(4.0), &mut rng);
    let zero = ValueInstance::new(&ValueBase::from(0.0), &mut rng);
    let err = a.divide(&zero).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivisionByZero));
}

proptest! {
    #[test]
    fn set_value_never_escapes_bounds(
        low in -1000.0f64..1000.0,
        width in 0.0f64..1000.0,
        value in -5000.0f64..5000.0,
    ) {
        let mut instance = NumericalValueInstance::from_base(
            NumericalValueBase::new(low).with_bounds(low, low + width),
        );
        instance.set_value(value);
        prop_assert!(instance.value() >= instance.min());
        prop_assert!(instance.value() <= instance.max());
    }
}
