use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression, parse_no_seq},
            utils::parse_identifier,
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed
/// as `!( -x )`. Both bind looser than application: `-f x` negates the
/// application's result.
///
/// If no unary operator is present, the function delegates to
/// [`parse_application`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | application
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or an application-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                           expr: Box::new(expr),
                           line })
    } else if let Some((Token::Bang, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                           expr: Box::new(expr),
                           line })
    } else {
        parse_application(tokens)
    }
}

/// Parses function application by juxtaposition.
///
/// Application is left-associative and binds tighter than every operator:
/// `f x y` parses as `App(App(f, x), y)`. The head and every argument are
/// postfix expressions, so selectors bind tighter still: `f a.x` applies
/// `f` to the field `a.x`.
///
/// Grammar: `application := postfix postfix*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The application spine, or a single postfix expression when no argument
/// follows.
pub(crate) fn parse_application<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_postfix(tokens)?;

    while let Some((token, _)) = tokens.peek() {
        if !starts_atom(token) {
            break;
        }
        let line = left.line_number();
        let argument = parse_postfix(tokens)?;
        left = Expr::App { function: Box::new(left),
                           argument: Box::new(argument),
                           line };
    }

    Ok(left)
}

/// Reports whether a token can begin an atomic expression.
///
/// The application loop uses this to decide whether another argument
/// follows: literals, identifiers, and the three bracketed forms start
/// atoms; operators and keywords do not.
#[must_use]
pub(crate) const fn starts_atom(token: &Token) -> bool {
    matches!(token,
             Token::Integer(_)
             | Token::Str(_)
             | Token::Bool(_)
             | Token::Identifier(_)
             | Token::LParen
             | Token::LBrace
             | Token::LBracket)
}

/// Parses postfix selectors applied to an atom.
///
/// Two selectors may chain in any combination:
///
/// 1. **Field access** `expr.field`
/// 2. **Array indexing** `expr.(index)`
///
/// Parsing continues until no further selector is found, so `m.rows.(i)`
/// reads the field first and indexes the result.
///
/// Grammar:
/// ```text
///     postfix := atom ('.' IDENT | '.(' expression ')')*
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at an atom.
///
/// # Returns
/// An updated [`Expr`] with all selectors folded in.
///
/// # Errors
/// Returns a `ParseError` if a field name is missing after `.` or an index
/// is not closed with `)`.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_atom(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::Dot, line)) => {
                let line = *line;
                tokens.next();
                let field = parse_identifier(tokens)?;
                node = Expr::FieldAccess { record: Box::new(node),
                                           field,
                                           line };
            },
            Some((Token::DotParen, line)) => {
                let line = *line;
                tokens.next();
                let index = parse_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RParen, _)) => {},
                    _ => return Err(ParseError::ExpectedClosingParen { line }),
                }
                node = Expr::ArrayIndex { array: Box::new(node),
                                          index: Box::new(index),
                                          line };
            },
            _ => break,
        }
    }

    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and
/// include:
/// - integer, string, and boolean literals
/// - identifiers
/// - the unit literal `()` and parenthesized expressions
/// - record literals (`{ x=1; y=2 }`)
/// - array literals (`[ 1; 2; 3 ]`)
///
/// Grammar:
/// ```text
///     atom := INT | STRING | BOOL | IDENT
///           | "(" ")"
///           | "(" expression ")"
///           | "{" field_assignments "}"
///           | "[" elements "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an atom.
///
/// # Returns
/// The parsed atomic [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Integer(n), line) => {
            let (value, line) = (*n, *line);
            tokens.next();
            Ok(Expr::Int { value, line })
        },
        (Token::Str(s), line) => {
            let (value, line) = (s.clone(), *line);
            tokens.next();
            Ok(Expr::String { value, line })
        },
        (Token::Bool(b), line) => {
            let (value, line) = (*b, *line);
            tokens.next();
            Ok(Expr::Bool { value, line })
        },
        (Token::Identifier(name), line) => {
            let (name, line) = (name.clone(), *line);
            tokens.next();
            Ok(Expr::Var { name, line })
        },
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBrace, _) => parse_record_literal(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses a parenthesized expression or the unit literal.
///
/// Expected forms: `( )` or `( expression )`.
///
/// The function consumes the opening parenthesis; an immediately following
/// `)` is the unit literal, otherwise the enclosed expression is parsed
/// and a closing `)` required. Failure to find the closing parenthesis
/// yields `ParseError::ExpectedClosingParen`.
///
/// Grammar: `grouping := "(" ")" | "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
///
/// # Returns
/// The unit literal, or the inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Unit { line });
    }

    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a record literal: `{ x=1; y=2 }`.
///
/// Each field assignment is `IDENT '=' expression`; the `=` here is the
/// binding equals, not equality. Fields are separated by `;` and a
/// trailing separator is allowed. The record's name is not written; the
/// checker resolves the literal against the declaration table.
///
/// # Errors
/// Returns a `ParseError` if a field name or its `=` is missing, or the
/// literal is not closed with `}`.
fn parse_record_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let mut fields = Vec::new();

    loop {
        let field = parse_identifier(tokens)?;

        match tokens.next() {
            Some((Token::Equals, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected '=' after field name, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }

        let value = parse_no_seq(tokens)?;
        fields.push((field, value));

        match tokens.next() {
            Some((Token::Semicolon, _)) => {
                if let Some((Token::RBrace, _)) = tokens.peek() {
                    tokens.next();
                    break;
                }
            },
            Some((Token::RBrace, _)) => break,
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ';' or '}}' in record literal, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(Expr::RecordLiteral { fields, line })
}

/// Parses an array literal: `[ 1; 2; 3 ]`.
///
/// Elements are separated by `;` and a trailing separator is allowed; `[]`
/// is the empty array.
///
/// # Errors
/// Returns a `ParseError` if the literal is not closed with `]`.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let mut elements = Vec::new();

    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::ArrayLiteral { elements, line });
    }

    loop {
        elements.push(parse_no_seq(tokens)?);

        match tokens.next() {
            Some((Token::Semicolon, _)) => {
                if let Some((Token::RBracket, _)) = tokens.peek() {
                    tokens.next();
                    break;
                }
            },
            Some((Token::RBracket, _)) => break,
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ';' or ']' in array literal, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(Expr::ArrayLiteral { elements, line })
}
