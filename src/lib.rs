//! Streaming tokenizer for the Toy language.
//!
//! Source text is pulled one line at a time from a [`LineProvider`],
//! one character at a time through a [`CharCursor`], and classified
//! into [`Token`]s by a [`Lexer`] that a parser drives on demand.
//!
//! # Quick start
//!
//! ## Drive the token stream
//!
//! ```
//! use toy_lexer::{Lexer, Token};
//!
//! let mut lexer = Lexer::new("var answer = 42;", "answer.toy");
//! lexer.advance();
//! lexer.expect_and_consume(Token::Var);
//! assert_eq!(lexer.identifier_text(), "answer");
//! lexer.expect_and_consume(Token::Identifier);
//! lexer.expect_and_consume(Token::Char('='));
//! assert_eq!(lexer.number_value(), 42.0);
//! assert_eq!(lexer.current_location().column, 14);
//! ```
//!
//! ## Tokenize a whole source
//!
//! ```
//! use toy_lexer::{Token, TokenValue, tokenize};
//!
//! let tokens = tokenize("def main() { return; }", "main.toy");
//! assert_eq!(tokens[0].token, Token::Def);
//! assert_eq!(tokens[1].value, TokenValue::Identifier("main".into()));
//! assert_eq!(tokens.last().map(|t| t.token), Some(Token::EndOfInput));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cursor;
pub mod lexer;
pub mod source;
pub mod token;

use std::io::BufRead;

pub use cursor::CharCursor;
pub use lexer::{LexError, LexErrorKind, Lexer, drain, tokenize};
pub use source::{LineProvider, MemoryLines, ReaderLines};
pub use token::{Location, SpannedToken, Token, TokenValue};

/// Unified error type covering token stream misuse and reader sources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A checked token stream accessor failed.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// Reading a source failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Tokenize everything a reader yields, `EndOfInput` included.
pub fn tokenize_reader<R: BufRead>(reader: R, filename: &str) -> Result<Vec<SpannedToken>, Error> {
    let mut lexer = Lexer::with_provider(ReaderLines::new(reader), filename);
    let tokens = drain(&mut lexer);
    match lexer.provider_mut().take_error() {
        Some(err) => Err(err.into()),
        None => Ok(tokens),
    }
}
