//! Recursive-descent, precedence-climbed parser:
//!
//! ```text
//! expression := equality
//! equality   := comparison (('=='|'!=') comparison)*
//! comparison := term (('<'|'<='|'>'|'>=') term)*
//! term       := factor (('+'|'-') factor)*
//! factor     := unary (('*'|'/'|'%') unary)*
//! unary      := '-' unary | primary
//! primary    := literal | callOrVar | '(' expression ')'
//! callOrVar  := IDENT ['(' [expression (',' expression)*] ')']
//! ```
//! All binary operators are left-associative.

use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::lexer::Lexer;
use crate::span::{Span, TextLocation};
use crate::token::{LexErrorKind, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected an expression at {location:?}")]
    ExpressionExpected { location: TextLocation },
    #[error("missing right parenthesis at {location:?}")]
    MissingRightParenthesis { location: TextLocation },
    #[error("unexpected token {found:?} at {location:?}")]
    UnexpectedToken { found: String, location: TextLocation },
    #[error("{kind:?} at {location:?}")]
    Lexical { kind: LexErrorKind, location: TextLocation },
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn parse(source: &str) -> Result<Expr, ParseError> {
        let tokens = Lexer::tokenize(source);
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_expression()?;
        parser.expect_end()?;
        Ok(expr)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check_error(&self, token: &Token) -> Result<(), ParseError> {
        if let TokenKind::Error(kind) = token.kind {
            return Err(ParseError::Lexical { kind, location: token.location });
        }
        Ok(())
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        let token = self.current().clone();
        self.check_error(&token)?;
        if token.kind != TokenKind::Empty {
            return Err(ParseError::UnexpectedToken {
                found: token.text,
                location: token.location,
            });
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["==", "!="], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["<", "<=", ">", ">="], Self::parse_term)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["+", "-"], Self::parse_factor)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["*", "/", "%"], Self::parse_unary)
    }

    fn parse_binary_level(
        &mut self,
        operators: &[&str],
        mut next: impl FnMut(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        loop {
            let token = self.current().clone();
            self.check_error(&token)?;
            let Some(op_text) = operators.iter().find(|op| token.is_operator(op)) else {
                break;
            };
            self.advance();
            let right = next(self)?;
            let op = BinaryOp::from_text(op_text).expect("operator came from our own table");
            let span = Span::new(left.span().start, right.span().end);
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        self.check_error(&token)?;
        if token.is_operator("-") {
            self.advance();
            let operand = self.parse_unary()?;
            let span = Span::new(token.span.start, operand.span().end);
            return Ok(Expr::Unary { op: UnaryOp::Neg, operand: Box::new(operand), span });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        self.check_error(&token)?;
        match token.kind {
            TokenKind::Int => {
                self.advance();
                let value = parse_int_literal(&token.text);
                Ok(Expr::Literal { value: Literal::Int(value), span: token.span })
            }
            TokenKind::Double => {
                self.advance();
                let value = parse_double_literal(&token.text);
                Ok(Expr::Literal { value: Literal::Double(value), span: token.span })
            }
            TokenKind::Identifier => self.parse_call_or_var(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let close = self.current().clone();
                self.check_error(&close)?;
                if close.kind != TokenKind::RightParen {
                    return Err(ParseError::MissingRightParenthesis { location: close.location });
                }
                self.advance();
                Ok(inner)
            }
            TokenKind::Empty => Err(ParseError::ExpressionExpected { location: token.location }),
            _ => Err(ParseError::UnexpectedToken { found: token.text, location: token.location }),
        }
    }

    fn parse_call_or_var(&mut self) -> Result<Expr, ParseError> {
        let name_token = self.advance();
        let name = name_token.text;

        if self.current().kind != TokenKind::LeftParen {
            return Ok(Expr::Variable { name, span: name_token.span });
        }
        self.advance();

        let mut args = Vec::new();
        if self.current().kind != TokenKind::RightParen {
            args.push(self.parse_expression()?);
            while self.current().kind == TokenKind::Comma {
                self.advance();
                args.push(self.parse_expression()?);
            }
        }

        let close = self.current().clone();
        self.check_error(&close)?;
        if close.kind != TokenKind::RightParen {
            return Err(ParseError::MissingRightParenthesis { location: close.location });
        }
        self.advance();

        let span = Span::new(name_token.span.start, close.span.end);
        Ok(Expr::Call { name, args, span })
    }
}

/// Strips the visual-separator underscores the lexer allows in numeric literals.
fn parse_int_literal(text: &str) -> i64 {
    text.replace('_', "").parse().expect("lexer only emits well-formed int text")
}

fn parse_double_literal(text: &str) -> f64 {
    text.replace('_', "").parse().expect("lexer only emits well-formed double text")
}
