use std::iter::Peekable;

use crate::{
    ast::{FieldDecl, RecordDecl, Type},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, utils::parse_identifier},
    },
};

/// Parses a type annotation.
///
/// The arrow is right-associative: `int -> int -> bool` parses as
/// `int -> (int -> bool)`.
///
/// Grammar: `type := atom_type ('->' type)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a type.
///
/// # Returns
/// The parsed [`Type`].
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Type>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let from = parse_atom_type(tokens)?;

    if let Some((Token::Arrow, _)) = tokens.peek() {
        tokens.next();
        let to = parse_type(tokens)?;
        return Ok(Type::Arrow(Box::new(from), Box::new(to)));
    }

    Ok(from)
}

/// Parses an atomic type, including `array` postfixes.
///
/// The `array` suffix is left-associative: `int array array` is an array
/// of integer arrays. An identifier names a declared record type; whether
/// the record exists is the checker's concern.
///
/// Grammar:
/// ```text
///     atom_type := ('int' | 'bool' | 'unit' | 'string' | IDENT
///                  | '(' type ')') 'array'*
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a type.
///
/// # Returns
/// The parsed [`Type`].
pub fn parse_atom_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Type>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ty = match tokens.next() {
        Some((Token::IntType, _)) => Type::Int,
        Some((Token::BoolType, _)) => Type::Bool,
        Some((Token::UnitType, _)) => Type::Unit,
        Some((Token::StringType, _)) => Type::String,
        Some((Token::Identifier(name), _)) => Type::Record(name.clone()),
        Some((Token::LParen, line)) => {
            let inner = parse_type(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => inner,
                _ => return Err(ParseError::ExpectedClosingParen { line: *line }),
            }
        },
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected a type, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    while let Some((Token::Array, _)) = tokens.peek() {
        tokens.next();
        ty = Type::Array(Box::new(ty));
    }

    Ok(ty)
}

/// Parses a record type declaration.
///
/// Syntax:
/// ```text
///     type name = { field1 : t1; mutable field2 : t2 }
/// ```
/// A trailing `;` before `}` is allowed, and a trailing `in` after the
/// declaration is accepted and skipped: the concrete programs write it,
/// though the abstract grammar ends the declaration at `}`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the `type` keyword.
///
/// # Returns
/// The parsed [`RecordDecl`]. Duplicate names are the checker's concern.
///
/// # Errors
/// Returns a `ParseError` if the name, `=`, braces, or a field's `:` and
/// type are missing.
pub fn parse_type_decl<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<RecordDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let name = parse_identifier(tokens)?;

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '=' after the record name, found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    match tokens.next() {
        Some((Token::LBrace, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '{{', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let mut fields = Vec::new();
    loop {
        let mutable = if let Some((Token::Mutable, _)) = tokens.peek() {
            tokens.next();
            true
        } else {
            false
        };

        let field_name = parse_identifier(tokens)?;

        match tokens.next() {
            Some((Token::Colon, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ':' after field name, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }

        let ty = parse_type(tokens)?;
        fields.push(FieldDecl { mutable,
                                name: field_name,
                                ty });

        match tokens.next() {
            Some((Token::Semicolon, _)) => {
                if let Some((Token::RBrace, _)) = tokens.peek() {
                    tokens.next();
                    break;
                }
            },
            Some((Token::RBrace, _)) => break,
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ';' or '}}' in record declaration, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    if let Some((Token::In, _)) = tokens.peek() {
        tokens.next();
    }

    Ok(RecordDecl { name, fields, line })
}
