//! End-to-end coverage of the expression parse-then-bind and lexer-error scenarios,
//! exercised through the facade the way an external caller would use them.

use crate::{BindError, Binder, BoundRef, FunctionSignature, LexErrorKind, ObjectId, Parser, TokenKind, ValueType};
use std::collections::HashMap;

#[test]
fn expression_parses_and_binds_against_object_and_function_references() {
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

    let expr = Parser::parse("a + min(b, 2.5) - 3").expect("well-formed expression");
    let bound = Binder::new(&variables, &functions).bind(&expr).expect("all names resolve");

    assert_eq!(
        bound.all_variables().iter().cloned().collect::<Vec<_>>(),
        vec!["a".to_string(), "b".to_string()]
    );

    let unbound_expr = Parser::parse("a + c").expect("well-formed expression");
    let err = Binder::new(&variables, &functions).bind(&unbound_expr).unwrap_err();
    assert_eq!(err, BindError::UnknownVariable("c".to_string()));
}

#[test]
fn lexer_reports_the_exact_column_of_a_malformed_numeric_literal() {
    use poietic_expr::Lexer;

    let tokens = Lexer::tokenize("1.2.3");
    assert_eq!(tokens[0].kind, TokenKind::Double);
    assert_eq!(tokens[0].text, "1.2");
    assert_eq!(tokens[1].kind, TokenKind::Error(LexErrorKind::InvalidCharacterInNumber));
    assert_eq!(tokens[1].location.line, 1);
    assert_eq!(tokens[1].location.column, 4);
}
