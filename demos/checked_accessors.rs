//! Parse `var <name> = <number>;` with the checked accessors.

use toy_lexer::{Error, Lexer, Token};

fn parse_var(source: &str) -> Result<(String, f64), Error> {
    let mut lexer = Lexer::new(source, "decl.toy");
    lexer.advance();
    lexer.try_expect_and_consume(Token::Var)?;
    let name = lexer.try_identifier_text()?.to_string();
    lexer.try_expect_and_consume(Token::Identifier)?;
    lexer.try_expect_and_consume(Token::Char('='))?;
    let value = lexer.try_number_value()?;
    lexer.try_expect_and_consume(Token::Number)?;
    lexer.try_expect_and_consume(Token::SEMICOLON)?;
    Ok((name, value))
}

fn main() {
    for source in ["var answer = 42;", "var = 1;", "var pi = 3.14"] {
        match parse_var(source) {
            Ok((name, value)) => println!("{source:?}: {name} = {value}"),
            Err(e) => println!("{source:?}: error: {e}"),
        }
    }
}
