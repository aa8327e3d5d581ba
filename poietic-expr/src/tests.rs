use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::lexer::Lexer;
use crate::parser::{ParseError, Parser};
use crate::token::{LexErrorKind, TokenKind};

fn token_kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn lexes_identifiers_numbers_and_operators() {
    let tokens = Lexer::tokenize("a + min(b, 2.5) - 3");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Double,
            TokenKind::RightParen,
            TokenKind::Operator,
            TokenKind::Int,
            TokenKind::Empty,
        ]
    );
}

#[test]
fn full_text_of_every_token_reconstructs_the_source() {
    let source = "  a +  b # trailing comment\n  * 2";
    let tokens = Lexer::tokenize(source);
    let mut rebuilt = String::new();
    for token in &tokens {
        rebuilt.push_str(&source[token.leading_trivia.start as usize..token.leading_trivia.end as usize]);
        rebuilt.push_str(&token.text);
        rebuilt.push_str(&source[token.trailing_trivia.start as usize..token.trailing_trivia.end as usize]);
    }
    assert_eq!(rebuilt, source);
}

#[test]
fn underscore_separated_numbers_lex_as_int_and_double() {
    let tokens = Lexer::tokenize("1_000 3_14.15_9");
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].text, "1_000");
    assert_eq!(tokens[1].kind, TokenKind::Double);
    assert_eq!(tokens[1].text, "3_14.15_9");
}

#[test]
fn trailing_letter_after_number_is_an_error() {
    let tokens = Lexer::tokenize("123abc");
    assert_eq!(tokens[0].kind, TokenKind::Error(LexErrorKind::InvalidCharacterInNumber));
    assert_eq!(tokens[0].text, "123abc");
}

#[test]
fn lexer_error_location_points_at_the_invalid_character() {
    let tokens = Lexer::tokenize("1.2.3");
    assert_eq!(tokens[0].kind, TokenKind::Double);
    assert_eq!(tokens[0].text, "1.2");
    assert_eq!(tokens[1].kind, TokenKind::Error(LexErrorKind::InvalidCharacterInNumber));
    assert_eq!(tokens[1].location.line, 1);
    assert_eq!(tokens[1].location.column, 4);
}

#[test]
fn lone_equals_is_a_lexer_error() {
    assert_eq!(token_kinds("a = b")[1], TokenKind::Error(LexErrorKind::LoneEquals));
}

#[test]
fn comparison_and_equality_operators_tokenize_as_two_characters_where_applicable() {
    let tokens = Lexer::tokenize("<= >= == !=");
    for t in &tokens[..4] {
        assert_eq!(t.kind, TokenKind::Operator);
    }
    assert_eq!(tokens[0].text, "<=");
    assert_eq!(tokens[1].text, ">=");
    assert_eq!(tokens[2].text, "==");
    assert_eq!(tokens[3].text, "!=");
}

#[test]
fn parses_left_associative_precedence_chain() {
    let expr = Parser::parse("1 + 2 * 3").unwrap();
    match expr {
        Expr::Binary { op: BinaryOp::Add, left, right, .. } => {
            assert!(matches!(*left, Expr::Literal { value: Literal::Int(1), .. }));
            assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
        }
        other => panic!("expected a top-level addition, got {other:?}"),
    }
}

#[test]
fn parses_unary_minus_and_parenthesised_grouping() {
    let expr = Parser::parse("-(1 + 2)").unwrap();
    match expr {
        Expr::Unary { op: UnaryOp::Neg, operand, .. } => {
            assert!(matches!(*operand, Expr::Binary { op: BinaryOp::Add, .. }));
        }
        other => panic!("expected a unary negation, got {other:?}"),
    }
}

#[test]
fn parses_function_call_with_multiple_arguments() {
    let expr = Parser::parse("min(a, 2.5)").unwrap();
    match expr {
        Expr::Call { name, args, .. } => {
            assert_eq!(name, "min");
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected a call, got {other:?}"),
    }
}

#[test]
fn empty_source_is_an_expression_expected_error() {
    assert!(matches!(Parser::parse(""), Err(ParseError::ExpressionExpected { .. })));
}

#[test]
fn missing_right_parenthesis_is_reported() {
    assert!(matches!(Parser::parse("(1 + 2"), Err(ParseError::MissingRightParenthesis { .. })));
}

#[test]
fn dangling_operator_is_an_unexpected_token_or_expression_expected_error() {
    let err = Parser::parse("1 +").unwrap_err();
    assert!(matches!(err, ParseError::ExpressionExpected { .. }));
}

#[test]
fn lexer_error_propagates_through_the_parser() {
    let err = Parser::parse("1.2.3 + 1").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Lexical { kind: LexErrorKind::InvalidCharacterInNumber, .. }
    ));
}
