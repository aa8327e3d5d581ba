//! Character-at-a-time lexer for the expression sub-language.

use crate::span::{LineIndex, Span, TextLocation};
use crate::token::{LexErrorKind, Token, TokenKind};

/// Scans one token at a time from source text, attaching leading and trailing trivia
/// (whitespace and `#` line comments) to each token so the concatenation of every
/// token's full text reconstructs the source exactly.
pub struct Lexer<'src> {
    source: &'src str,
    remaining: &'src str,
    pos: u32,
    lines: LineIndex,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            remaining: source,
            pos: 0,
            lines: LineIndex::new(source),
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        Some(c)
    }

    fn locate(&self, offset: u32) -> TextLocation {
        self.lines.locate(offset)
    }

    /// Consumes whitespace (including newlines) and `#` comments up to the next real
    /// token, or EOF.
    fn skip_trivia_full(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Consumes spaces/tabs and `#` comments belonging to the *preceding* token,
    /// stopping before the first newline so it can start the next token's leading
    /// trivia instead.
    fn skip_trivia_no_newline(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c == '\n' => break,
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.advance(); // '#'
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn slice(&self, span: Span) -> &'src str {
        &self.source[span.start as usize..span.end as usize]
    }

    /// Scans an identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    fn lex_identifier(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        TokenKind::Identifier
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    /// Scans `int (digit|'_')*` optionally followed by a fractional and/or exponent
    /// part. Returns `(kind, error_at)`, where `error_at` is set when a numeric
    /// literal is immediately followed by a character it cannot absorb.
    fn lex_number(&mut self) -> (TokenKind, Option<u32>) {
        self.consume_digits();
        let mut is_double = false;

        if self.peek() == Some('.') && matches!(self.peek_nth(1), Some(c) if c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
            is_double = true;
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign_offset = if matches!(self.peek_nth(1), Some('+') | Some('-')) { 1 } else { 0 };
            if matches!(self.peek_nth(1 + sign_offset), Some(c) if c.is_ascii_digit()) {
                self.advance();
                if sign_offset == 1 {
                    self.advance();
                }
                self.consume_digits();
                is_double = true;
            }
        }

        // A `.` here starts a *new* token (handled by `lex_leading_dot`): `1.2.3`
        // lexes as a valid `1.2` followed by an erroneous `.3`. A letter or
        // underscore, though, can only be a malformed continuation of this literal.
        if matches!(self.peek(), Some(c) if c.is_alphabetic() || c == '_') {
            let error_at = self.pos;
            while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                self.advance();
            }
            return (TokenKind::Error(LexErrorKind::InvalidCharacterInNumber), Some(error_at));
        }

        (if is_double { TokenKind::Double } else { TokenKind::Int }, None)
    }

    /// A token starting with `.` is never valid on its own (numbers must start with a
    /// digit): treat it as a malformed numeric literal.
    fn lex_leading_dot(&mut self) -> (TokenKind, Option<u32>) {
        let error_at = self.pos;
        self.advance(); // '.'
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '.') {
            self.advance();
        }
        (TokenKind::Error(LexErrorKind::InvalidCharacterInNumber), Some(error_at))
    }

    fn lex_operator(&mut self) -> (TokenKind, Option<u32>) {
        let c = self.advance().expect("caller peeked a char");
        match c {
            '+' | '-' | '*' | '/' | '%' => (TokenKind::Operator, None),
            '<' | '>' | '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                }
                (TokenKind::Operator, None)
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    (TokenKind::Operator, None)
                } else {
                    (TokenKind::Error(LexErrorKind::LoneEquals), None)
                }
            }
            _ => unreachable!("caller only dispatches operator-starting characters here"),
        }
    }

    fn next_token_impl(&mut self) -> Token {
        let leading_start = self.pos;
        self.skip_trivia_full();
        let leading_trivia = Span::new(leading_start, self.pos);

        let core_start = self.pos;
        let (kind, error_at) = match self.peek() {
            None => (TokenKind::Empty, None),
            Some(c) if c.is_ascii_digit() => self.lex_number(),
            Some('.') => self.lex_leading_dot(),
            Some(c) if c.is_alphabetic() || c == '_' => (self.lex_identifier(), None),
            Some('(') => {
                self.advance();
                (TokenKind::LeftParen, None)
            }
            Some(')') => {
                self.advance();
                (TokenKind::RightParen, None)
            }
            Some(',') => {
                self.advance();
                (TokenKind::Comma, None)
            }
            Some('+') | Some('-') | Some('*') | Some('/') | Some('%') | Some('<') | Some('>')
            | Some('!') | Some('=') => self.lex_operator(),
            Some(_) => {
                let at = self.pos;
                self.advance();
                (TokenKind::Error(LexErrorKind::UnexpectedCharacter), Some(at))
            }
        };
        let span = Span::new(core_start, self.pos);
        let text = self.slice(span).to_string();

        let trailing_start = self.pos;
        self.skip_trivia_no_newline();
        let trailing_trivia = Span::new(trailing_start, self.pos);

        let location = self.locate(error_at.unwrap_or(core_start));

        Token {
            kind,
            text,
            span,
            leading_trivia,
            trailing_trivia,
            location,
        }
    }

    /// Consumes the rest of the source into a token stream, ending with exactly one
    /// `Empty` token.
    pub fn tokenize(source: &'src str) -> Vec<Token> {
        Lexer::new(source).collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token_impl();
        if token.kind == TokenKind::Empty {
            self.done = true;
        }
        Some(token)
    }
}
