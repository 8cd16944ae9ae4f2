use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a single identifier token and returns its name.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected identifier.
///
/// # Returns
/// The identifier's name.
///
/// # Errors
/// - `ExpectedIdentifier` if the next token is not an identifier.
/// - `UnexpectedEndOfInput` if the input ends first.
pub fn parse_identifier<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((_, line)) => Err(ParseError::ExpectedIdentifier { line: *line }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
