//! Integration tests for primitive values and coercion

use praxis_foundation::{Primitive, PrimitiveKind, Vector4};

// =============================================================================
// Zero Values
// =============================================================================

#[test]
fn every_kind_has_a_zero_value() {
    assert_eq!(Primitive::default_for(PrimitiveKind::Boolean), Primitive::Boolean(false));
    assert_eq!(Primitive::default_for(PrimitiveKind::Number), Primitive::Number(0.0));
    assert_eq!(Primitive::default_for(PrimitiveKind::String), Primitive::String("".into()));
    assert_eq!(Primitive::default_for(PrimitiveKind::Vector), Primitive::Vector(Vector4::ZERO));
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn coercion_between_wrapper_kinds() {
    assert_eq!(Primitive::Boolean(true).coerce(PrimitiveKind::Number), Primitive::Number(1.0));
    assert_eq!(Primitive::from("2.5").coerce(PrimitiveKind::Number), Primitive::Number(2.5));
    assert_eq!(Primitive::from("TRUE").coerce(PrimitiveKind::Boolean), Primitive::Boolean(true));
    assert_eq!(
        Primitive::Number(3.0).coerce(PrimitiveKind::Vector),
        Primitive::Vector(Vector4::splat(3.0))
    );
}

#[test]
fn failed_coercion_falls_back_to_zero() {
    assert!(Primitive::from("wet").try_coerce(PrimitiveKind::Number).is_none());
    assert_eq!(Primitive::from("wet").coerce(PrimitiveKind::Number), Primitive::Number(0.0));
    assert!((Primitive::from("wet").as_number()).abs() < f64::EPSILON);
}

#[test]
fn vectors_coerce_by_length() {
    let v = Primitive::Vector(Vector4::position(3.0, 4.0, 0.0));
    assert!((v.as_number() - 5.0).abs() < 1e-12);
    assert!(v.as_bool());
}
