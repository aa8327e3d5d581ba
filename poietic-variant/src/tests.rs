use crate::arithmetic;
use crate::{AtomType, Point, Variant, ValueType};

#[test]
fn string_to_int_conversion() {
    let v = Variant::String("42".to_string());
    assert_eq!(v.as_int().unwrap(), 42);
}

#[test]
fn string_to_int_conversion_fails_on_garbage() {
    let v = Variant::String("abc".to_string());
    assert!(v.as_int().is_err());
}

#[test]
fn string_to_point_conversion() {
    let v = Variant::String("(1.5, -2)".to_string());
    let p = v.as_point().unwrap();
    assert_eq!(p, Point::new(1.5, -2.0));
}

#[test]
fn array_conversion_element_wise() {
    let v = Variant::StringArray(vec!["1".into(), "2".into(), "3".into()]);
    let converted = v.convert_to(ValueType::Array(AtomType::Int)).unwrap();
    assert_eq!(converted, Variant::IntArray(vec![1, 2, 3]));
}

#[test]
fn array_conversion_fails_on_mismatched_element() {
    let v = Variant::StringArray(vec!["1".into(), "oops".into()]);
    assert!(v.convert_to(ValueType::Array(AtomType::Int)).is_err());
}

#[test]
fn total_ordering_within_same_tag() {
    let mut values = vec![Variant::Int(3), Variant::Int(1), Variant::Int(2)];
    values.sort();
    assert_eq!(values, vec![Variant::Int(1), Variant::Int(2), Variant::Int(3)]);
}

#[test]
fn ordering_is_total_across_tags() {
    // Nil sorts before every atom; atoms sort before arrays. Just needs to not panic
    // and produce a consistent order.
    let mut values = vec![
        Variant::Double(1.0),
        Variant::Nil,
        Variant::Bool(true),
        Variant::IntArray(vec![1]),
    ];
    values.sort();
    assert_eq!(values[0], Variant::Nil);
}

#[test]
fn int_arithmetic_stays_int() {
    let a = Variant::Int(7);
    let b = Variant::Int(2);
    assert_eq!(arithmetic::add(&a, &b).unwrap(), Variant::Int(9));
    assert_eq!(arithmetic::div(&a, &b).unwrap(), Variant::Int(3));
}

#[test]
fn mixed_arithmetic_promotes_to_double() {
    let a = Variant::Int(7);
    let b = Variant::Double(2.0);
    assert_eq!(arithmetic::div(&a, &b).unwrap(), Variant::Double(3.5));
}

#[test]
fn int_division_by_zero_is_an_error() {
    let a = Variant::Int(1);
    let b = Variant::Int(0);
    assert!(arithmetic::div(&a, &b).is_err());
}

#[test]
fn double_division_by_zero_yields_nan() {
    let a = Variant::Double(1.0);
    let b = Variant::Double(0.0);
    let result = arithmetic::div(&a, &b).unwrap();
    match result {
        Variant::Double(v) => assert!(v.is_nan()),
        other => panic!("expected Double(NaN), got {other:?}"),
    }
}
