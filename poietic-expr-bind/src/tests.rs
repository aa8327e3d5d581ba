use crate::{BindError, Binder, BoundExpr, BoundRef, FunctionSignature, VariableId};
use poietic_expr::Parser;
use poietic_object::ObjectId;
use poietic_variant::ValueType;
use std::collections::HashMap;

#[test]
fn binds_arithmetic_expression_with_a_two_argument_function_and_tracks_all_variables() {
    let a = ObjectId::from_raw(1);
    let b = ObjectId::from_raw(2);

    let mut variables = HashMap::new();
    variables.insert("a".to_string(), BoundRef::Object(a));
    variables.insert("b".to_string(), BoundRef::Object(b));

    let mut functions = HashMap::new();
    functions.insert(
        "min".to_string(),
        FunctionSignature::new(vec![ValueType::DOUBLE, ValueType::DOUBLE], ValueType::DOUBLE),
    );

    let expr = Parser::parse("a + min(b, 2.5) - 3").unwrap();
    let bound = Binder::new(&variables, &functions).bind(&expr).unwrap();

    assert_eq!(
        bound.all_variables().iter().cloned().collect::<Vec<_>>(),
        vec!["a".to_string(), "b".to_string()]
    );

    match bound.root() {
        BoundExpr::Call { function, .. } if function == "__sub" => {}
        other => panic!("expected the top-level subtraction from desugaring, got {other:?}"),
    }
}

#[test]
fn unbound_variable_is_reported_by_name() {
    let variables = HashMap::new();
    let functions = HashMap::new();

    let expr = Parser::parse("c").unwrap();
    let err = Binder::new(&variables, &functions).bind(&expr).unwrap_err();

    assert_eq!(err, BindError::UnknownVariable("c".to_string()));
}

#[test]
fn mixed_bound_and_unbound_variables_reports_the_unbound_one() {
    let a = ObjectId::from_raw(1);

    let mut variables = HashMap::new();
    variables.insert("a".to_string(), BoundRef::Object(a));
    let functions = HashMap::new();

    let expr = Parser::parse("a + c").unwrap();
    let err = Binder::new(&variables, &functions).bind(&expr).unwrap_err();

    assert_eq!(err, BindError::UnknownVariable("c".to_string()));
}

#[test]
fn calling_an_unregistered_function_is_an_error() {
    let variables = HashMap::new();
    let functions = HashMap::new();

    let expr = Parser::parse("min(1, 2)").unwrap();
    let err = Binder::new(&variables, &functions).bind(&expr).unwrap_err();

    assert_eq!(err, BindError::UnknownFunction("min".to_string()));
}

#[test]
fn calling_a_function_with_the_wrong_number_of_arguments_is_an_arity_mismatch() {
    let variables = HashMap::new();
    let mut functions = HashMap::new();
    functions.insert(
        "min".to_string(),
        FunctionSignature::new(vec![ValueType::DOUBLE, ValueType::DOUBLE], ValueType::DOUBLE),
    );

    let expr = Parser::parse("min(1)").unwrap();
    let err = Binder::new(&variables, &functions).bind(&expr).unwrap_err();

    assert_eq!(
        err,
        BindError::ArityMismatch { function: "min".to_string(), expected: 2, found: 1 }
    );
}

#[test]
fn calling_a_function_with_a_mismatched_literal_argument_type_is_reported() {
    let variables = HashMap::new();
    let mut functions = HashMap::new();
    functions.insert(
        "to_upper".to_string(),
        FunctionSignature::new(vec![ValueType::STRING], ValueType::STRING),
    );

    let expr = Parser::parse("to_upper(1)").unwrap();
    let err = Binder::new(&variables, &functions).bind(&expr).unwrap_err();

    assert_eq!(
        err,
        BindError::ArgumentTypeMismatch {
            function: "to_upper".to_string(),
            index: 0,
            expected: ValueType::STRING,
            found: ValueType::INT,
        }
    );
}

#[test]
fn builtin_variable_references_bind_without_an_object_id() {
    let mut variables = HashMap::new();
    variables.insert("time".to_string(), BoundRef::Builtin(VariableId(7)));
    let functions = HashMap::new();

    let expr = Parser::parse("time").unwrap();
    let bound = Binder::new(&variables, &functions).bind(&expr).unwrap();

    assert_eq!(bound.root(), &BoundExpr::Variable(BoundRef::Builtin(VariableId(7))));
    assert!(bound.all_variables().contains("time"));
}

#[test]
fn unary_negation_desugars_to_the_neg_builtin() {
    let variables = HashMap::new();
    let functions = HashMap::new();

    let expr = Parser::parse("-1").unwrap();
    let bound = Binder::new(&variables, &functions).bind(&expr).unwrap();

    match bound.root() {
        BoundExpr::Call { function, args } if function == "__neg" => assert_eq!(args.len(), 1),
        other => panic!("expected a __neg call, got {other:?}"),
    }
}

#[test]
fn comparison_operator_desugars_to_its_builtin_name() {
    let a = ObjectId::from_raw(1);
    let mut variables = HashMap::new();
    variables.insert("a".to_string(), BoundRef::Object(a));
    let functions = HashMap::new();

    let expr = Parser::parse("a >= 2").unwrap();
    let bound = Binder::new(&variables, &functions).bind(&expr).unwrap();

    match bound.root() {
        BoundExpr::Call { function, args } if function == "__ge" => assert_eq!(args.len(), 2),
        other => panic!("expected a __ge call, got {other:?}"),
    }
}
