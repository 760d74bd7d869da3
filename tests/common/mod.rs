#![allow(dead_code)]

use toy_lexer::{Lexer, Location, Token, TokenValue, tokenize};

pub const FILE: &str = "test.toy";

/// Token kinds of a whole source, `EndOfInput` included.
pub fn kinds(source: &str) -> Vec<Token> {
    tokenize(source, FILE).into_iter().map(|t| t.token).collect()
}

/// Payloads of a whole source, `EndOfInput` included.
pub fn values(source: &str) -> Vec<TokenValue> {
    tokenize(source, FILE).into_iter().map(|t| t.value).collect()
}

/// `(line, column)` of every token start.
pub fn positions(source: &str) -> Vec<(usize, usize)> {
    tokenize(source, FILE)
        .into_iter()
        .map(|t| (t.location.line, t.location.column))
        .collect()
}

pub fn lexer(source: &str) -> Lexer<'_> {
    Lexer::new(source, FILE)
}

pub fn at(line: usize, column: usize) -> Location {
    Location::new(FILE, line, column)
}

pub fn ident(text: &str) -> TokenValue {
    TokenValue::Identifier(text.to_string())
}
