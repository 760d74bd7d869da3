use std::fmt;
use std::rc::Rc;

use crate::cursor::CharCursor;
use crate::source::{LineProvider, MemoryLines};
use crate::token::{Location, SpannedToken, Token, TokenValue};

/// Classifies a misuse of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// `expect_and_consume` saw a different token.
    UnexpectedToken { expected: Token, found: Token },
    /// Identifier text requested while not on an identifier.
    NotAnIdentifier { found: Token },
    /// Number value requested while not on a number.
    NotANumber { found: Token },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::NotAnIdentifier { found } => {
                write!(f, "current token is {found}, not an identifier")
            }
            Self::NotANumber { found } => {
                write!(f, "current token is {found}, not a number")
            }
        }
    }
}

/// Error returned by the checked token stream accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {location}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: Location,
}

/// Tokenize an in-memory source, `EndOfInput` included.
#[must_use]
pub fn tokenize(source: &str, filename: &str) -> Vec<SpannedToken> {
    drain(&mut Lexer::new(source, filename))
}

/// Advance until end of input, collecting every token including the
/// final `EndOfInput`.
pub fn drain<'src, P: LineProvider<'src>>(lexer: &mut Lexer<'src, P>) -> Vec<SpannedToken> {
    let mut tokens = Vec::new();
    loop {
        let token = lexer.advance();
        tokens.push(lexer.spanned());
        if token == Token::EndOfInput {
            return tokens;
        }
    }
}

/// Demand-driven token stream over a [`LineProvider`].
///
/// Nothing is scanned until the first [`Lexer::advance`]; before that
/// the current token is [`Token::EndOfInput`].
#[derive(Debug)]
pub struct Lexer<'src, P = MemoryLines<'src>> {
    cursor: CharCursor<'src, P>,
    /// Next unconsumed character, `None` at end of input.
    last_char: Option<char>,
    current: Token,
    location: Location,
    identifier: String,
    number: f64,
}

impl<'src> Lexer<'src, MemoryLines<'src>> {
    /// Lexer over a source held in memory for the lexer's lifetime.
    #[must_use]
    pub fn new(source: &'src str, filename: impl Into<Rc<str>>) -> Self {
        Self::with_provider(MemoryLines::new(source), filename)
    }
}

impl<'src, P: LineProvider<'src>> Lexer<'src, P> {
    #[must_use]
    pub fn with_provider(provider: P, filename: impl Into<Rc<str>>) -> Self {
        Self {
            cursor: CharCursor::new(provider),
            last_char: Some(' '),
            current: Token::EndOfInput,
            location: Location::new(filename, 0, 0),
            identifier: String::new(),
            number: 0.0,
        }
    }

    /// The most recently scanned token.
    #[must_use]
    pub const fn current_token(&self) -> Token {
        self.current
    }

    /// Scan the next token and make it current.
    pub fn advance(&mut self) -> Token {
        let previous = self.current;
        self.current = self.scan_token();
        tracing::trace!(token = %self.current, location = %self.location, "scanned token");
        if self.current == Token::EndOfInput && previous != Token::EndOfInput {
            tracing::debug!(file = %self.location.file, "reached end of input");
        }
        self.current
    }

    /// Advance past `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the current token is not `expected`.
    pub fn expect_and_consume(&mut self, expected: Token) {
        if let Err(err) = self.try_expect_and_consume(expected) {
            panic!("{err}");
        }
    }

    /// Advance past `expected`, returning the new current token.
    pub fn try_expect_and_consume(&mut self, expected: Token) -> Result<Token, LexError> {
        if self.current != expected {
            return Err(self.error(LexErrorKind::UnexpectedToken {
                expected,
                found: self.current,
            }));
        }
        Ok(self.advance())
    }

    /// Text of the current identifier.
    ///
    /// # Panics
    ///
    /// Panics if the current token is not [`Token::Identifier`].
    #[must_use]
    pub fn identifier_text(&self) -> &str {
        match self.try_identifier_text() {
            Ok(text) => text,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_identifier_text(&self) -> Result<&str, LexError> {
        if self.current == Token::Identifier {
            Ok(&self.identifier)
        } else {
            Err(self.error(LexErrorKind::NotAnIdentifier {
                found: self.current,
            }))
        }
    }

    /// Value of the current number.
    ///
    /// # Panics
    ///
    /// Panics if the current token is not [`Token::Number`].
    #[must_use]
    pub fn number_value(&self) -> f64 {
        match self.try_number_value() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_number_value(&self) -> Result<f64, LexError> {
        if self.current == Token::Number {
            Ok(self.number)
        } else {
            Err(self.error(LexErrorKind::NotANumber {
                found: self.current,
            }))
        }
    }

    /// Where the current token starts.
    #[must_use]
    pub const fn current_location(&self) -> &Location {
        &self.location
    }

    /// Live cursor line, ahead of the current token's start.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.cursor.line()
    }

    /// Live cursor column, ahead of the current token's start.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.cursor.column()
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        self.cursor.provider()
    }

    pub const fn provider_mut(&mut self) -> &mut P {
        self.cursor.provider_mut()
    }

    /// The current token detached from the lexer.
    #[must_use]
    pub fn spanned(&self) -> SpannedToken {
        let value = match self.current {
            Token::Identifier => TokenValue::Identifier(self.identifier.clone()),
            Token::Number => TokenValue::Number(self.number),
            _ => TokenValue::None,
        };
        SpannedToken {
            token: self.current,
            value,
            location: self.location.clone(),
        }
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            location: self.location.clone(),
        }
    }

    fn bump(&mut self) {
        self.last_char = self.cursor.next_char();
    }

    fn scan_token(&mut self) -> Token {
        // Comments produce no token; scanning restarts after them.
        loop {
            while self.last_char.is_some_and(is_space) {
                self.bump();
            }

            self.location.line = self.cursor.line();
            self.location.column = self.cursor.column();

            // End of input is not consumed, so it repeats.
            let Some(ch) = self.last_char else {
                return Token::EndOfInput;
            };

            if ch.is_ascii_alphabetic() {
                return self.scan_identifier(ch);
            }
            if is_number_char(ch) {
                return self.scan_number(ch);
            }
            // A comment running into end of input keeps the location
            // of its `#`.
            if ch == '#' {
                if self.skip_comment() {
                    return Token::EndOfInput;
                }
                continue;
            }

            self.bump();
            return Token::Char(ch);
        }
    }

    fn scan_identifier(&mut self, first: char) -> Token {
        self.identifier.clear();
        self.identifier.push(first);
        loop {
            self.bump();
            match self.last_char {
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => self.identifier.push(ch),
                _ => break,
            }
        }
        Token::keyword(&self.identifier).unwrap_or(Token::Identifier)
    }

    fn scan_number(&mut self, first: char) -> Token {
        let mut lexeme = String::from(first);
        loop {
            self.bump();
            match self.last_char {
                Some(ch) if is_number_char(ch) => lexeme.push(ch),
                _ => break,
            }
        }
        self.number = parse_number(&lexeme);
        Token::Number
    }

    /// Skip to the line terminator, leaving it as the lookahead.
    /// Returns whether end of input was reached instead.
    fn skip_comment(&mut self) -> bool {
        loop {
            self.bump();
            match self.last_char {
                None => return true,
                Some('\n' | '\r') => return false,
                Some(_) => {}
            }
        }
    }
}

impl<'src, P: LineProvider<'src>> Iterator for Lexer<'src, P> {
    type Item = SpannedToken;

    /// Advances, then yields the new token until end of input.
    fn next(&mut self) -> Option<SpannedToken> {
        if self.advance() == Token::EndOfInput {
            None
        } else {
            Some(self.spanned())
        }
    }
}

/// C `isspace` in the "C" locale.
const fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

const fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

/// Parse the longest decimal prefix of a `[0-9.]+` lexeme.
///
/// Everything from a second `.` on is ignored, and a lexeme with no
/// digits before that point is `0.0`.
fn parse_number(lexeme: &str) -> f64 {
    let end = lexeme
        .match_indices('.')
        .nth(1)
        .map_or(lexeme.len(), |(i, _)| i);
    lexeme[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lexer primed so its lookahead is the first character of `source`.
    fn primed(source: &str) -> Lexer<'_> {
        let mut lexer = Lexer::new(source, "test.toy");
        while lexer.last_char.is_some_and(is_space) {
            lexer.bump();
        }
        lexer
    }

    #[test]
    fn scan_identifier_stops_at_non_word_character() {
        let mut lexer = primed("a_1b+");
        assert_eq!(lexer.scan_identifier('a'), Token::Identifier);
        assert_eq!(lexer.identifier, "a_1b");
        assert_eq!(lexer.last_char, Some('+'));
    }

    #[test]
    fn scan_identifier_resolves_keywords() {
        let mut lexer = primed("return;");
        assert_eq!(lexer.scan_identifier('r'), Token::Return);
        assert_eq!(lexer.last_char, Some(';'));
    }

    #[test]
    fn scan_number_keeps_every_dot_in_the_lexeme() {
        let mut lexer = primed("1.2.3x");
        assert_eq!(lexer.scan_number('1'), Token::Number);
        assert!((lexer.number - 1.2).abs() < f64::EPSILON);
        assert_eq!(lexer.last_char, Some('x'));
    }

    #[test]
    fn skip_comment_stops_on_terminator() {
        let mut lexer = primed("# note\r\nx");
        assert!(!lexer.skip_comment());
        assert_eq!(lexer.last_char, Some('\r'));
    }

    #[test]
    fn skip_comment_reports_end_of_input() {
        let mut lexer = primed("# note");
        assert!(lexer.skip_comment());
        assert_eq!(lexer.last_char, None);
    }

    #[test]
    fn lenient_numbers() {
        assert!((parse_number("1.2.3") - 1.2).abs() < f64::EPSILON);
        assert!((parse_number("5.") - 5.0).abs() < f64::EPSILON);
        assert!((parse_number(".5") - 0.5).abs() < f64::EPSILON);
        assert!(parse_number(".").abs() < f64::EPSILON);
        assert!(parse_number("..7").abs() < f64::EPSILON);
    }

    #[test]
    fn c_locale_whitespace() {
        for ch in [' ', '\t', '\n', '\x0B', '\x0C', '\r'] {
            assert!(is_space(ch), "{ch:?}");
        }
        assert!(!is_space('\u{a0}'));
    }
}
