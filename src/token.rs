use std::fmt;
use std::rc::Rc;

/// Source location of the first character of a token.
///
/// Lines and columns are 1-based. The file name is shared by every
/// location produced from the same source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: Rc<str>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<Rc<str>>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
///
/// Identifier text and number values are not carried by the token
/// itself; the lexer holds the payload of its current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// End of input. Repeats once reached.
    EndOfInput,
    /// `return`
    Return,
    /// `var`
    Var,
    /// `def`
    Def,
    /// `[a-zA-Z][a-zA-Z0-9_]*` that is not a keyword.
    Identifier,
    /// `[0-9.]+`
    Number,
    /// Any other single character, punctuation included.
    Char(char),
}

impl Token {
    /// `;`
    pub const SEMICOLON: Self = Self::Char(';');
    /// `(`
    pub const PAREN_OPEN: Self = Self::Char('(');
    /// `)`
    pub const PAREN_CLOSE: Self = Self::Char(')');
    /// `{`
    pub const BRACE_OPEN: Self = Self::Char('{');
    /// `}`
    pub const BRACE_CLOSE: Self = Self::Char('}');
    /// `[`
    pub const BRACKET_OPEN: Self = Self::Char('[');
    /// `]`
    pub const BRACKET_CLOSE: Self = Self::Char(']');

    const EOF_CODE: i32 = -1;
    const RETURN_CODE: i32 = -2;
    const VAR_CODE: i32 = -3;
    const DEF_CODE: i32 = -4;
    const IDENTIFIER_CODE: i32 = -5;
    const NUMBER_CODE: i32 = -6;

    /// Integer identity of the token.
    ///
    /// Single-character tokens map to their code point. Everything
    /// else maps to a negative value, so the two ranges never overlap.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn code(self) -> i32 {
        match self {
            Self::EndOfInput => Self::EOF_CODE,
            Self::Return => Self::RETURN_CODE,
            Self::Var => Self::VAR_CODE,
            Self::Def => Self::DEF_CODE,
            Self::Identifier => Self::IDENTIFIER_CODE,
            Self::Number => Self::NUMBER_CODE,
            // Code points top out at 0x10FFFF, well inside i32.
            Self::Char(ch) => ch as u32 as i32,
        }
    }

    /// Inverse of [`Token::code`].
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::EOF_CODE => Some(Self::EndOfInput),
            Self::RETURN_CODE => Some(Self::Return),
            Self::VAR_CODE => Some(Self::Var),
            Self::DEF_CODE => Some(Self::Def),
            Self::IDENTIFIER_CODE => Some(Self::Identifier),
            Self::NUMBER_CODE => Some(Self::Number),
            _ => u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .map(Self::Char),
        }
    }

    /// Resolve identifier text against the keyword table.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        match text {
            "return" => Some(Self::Return),
            "def" => Some(Self::Def),
            "var" => Some(Self::Var),
            _ => None,
        }
    }

    /// Whether this is one of `; ( ) { } [ ]`.
    #[must_use]
    pub const fn is_punctuation(self) -> bool {
        matches!(
            self,
            Self::Char(';' | '(' | ')' | '{' | '}' | '[' | ']')
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfInput => write!(f, "end of input"),
            Self::Return => write!(f, "return"),
            Self::Var => write!(f, "var"),
            Self::Def => write!(f, "def"),
            Self::Identifier => write!(f, "identifier"),
            Self::Number => write!(f, "number"),
            Self::Char(ch) => write!(f, "'{}'", ch.escape_default()),
        }
    }
}

/// Payload attached to a token when it is detached from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Identifier(String),
    Number(f64),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Identifier(text) => write!(f, "{text}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// A token together with its payload and start location.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub value: TokenValue,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_codes_are_ascii() {
        assert_eq!(Token::SEMICOLON.code(), i32::from(b';'));
        assert_eq!(Token::PAREN_OPEN.code(), i32::from(b'('));
        assert_eq!(Token::BRACKET_CLOSE.code(), i32::from(b']'));
    }

    #[test]
    fn reserved_codes_are_negative() {
        let reserved = [
            Token::EndOfInput,
            Token::Return,
            Token::Var,
            Token::Def,
            Token::Identifier,
            Token::Number,
        ];
        for token in reserved {
            assert!(token.code() < 0, "{token} should have a negative code");
            assert_eq!(Token::from_code(token.code()), Some(token));
        }
    }

    #[test]
    fn from_code_rejects_unknown_negatives() {
        assert_eq!(Token::from_code(-7), None);
        assert_eq!(Token::from_code(0xD800), None);
        assert_eq!(Token::from_code(i32::from(b'+')), Some(Token::Char('+')));
    }

    #[test]
    fn keyword_table_is_exact() {
        assert_eq!(Token::keyword("def"), Some(Token::Def));
        assert_eq!(Token::keyword("return"), Some(Token::Return));
        assert_eq!(Token::keyword("var"), Some(Token::Var));
        assert_eq!(Token::keyword("variable"), None);
        assert_eq!(Token::keyword("Def"), None);
    }

    #[test]
    fn punctuation_set() {
        assert!(Token::BRACE_OPEN.is_punctuation());
        assert!(!Token::Char('+').is_punctuation());
        assert!(!Token::Identifier.is_punctuation());
    }

    #[test]
    fn display() {
        assert_eq!(Token::Def.to_string(), "def");
        assert_eq!(Token::SEMICOLON.to_string(), "';'");
        assert_eq!(Token::Char('\t').to_string(), "'\\t'");
        assert_eq!(Location::new("a.toy", 3, 7).to_string(), "a.toy:3:7");
    }
}
