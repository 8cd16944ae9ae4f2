use std::iter::Peekable;

use crate::{
    ast::{Expr, Program, Type},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            types::{parse_type, parse_type_decl},
            utils::parse_identifier,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// A program is a possibly empty run of `type` declarations followed by a
/// single expression. Any tokens remaining after the expression are an
/// error.
///
/// Grammar: `program := type_decl* expression EOF`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed [`Program`].
///
/// # Errors
/// Propagates errors from declaration and expression parsing, and reports
/// `UnexpectedTrailingTokens` when input remains after the program
/// expression.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut decls = Vec::new();
    while let Some((Token::Type, _)) = tokens.peek() {
        decls.push(parse_type_decl(tokens)?);
    }

    let body = parse_expression(tokens)?;

    if let Some((tok, line)) = tokens.peek() {
        return Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                          line:  *line, });
    }

    Ok(Program { decls, body })
}

/// Parses a full expression, including sequencing.
///
/// This is the entry point for expression parsing. The semicolon is
/// right-associative and binds looser than every other form except the
/// body of a `let ... in`:
///
/// Grammar: `expression := no_seq (';' expression)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_no_seq(tokens)?;

    if let Some((Token::Semicolon, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let second = parse_expression(tokens)?;
        return Ok(Expr::Seq { first: Box::new(first),
                              second: Box::new(second),
                              line });
    }

    Ok(first)
}

/// Parses one expression of the sequence, stopping before any top-level
/// `;`.
///
/// Dispatches on the leading token to the binding and control forms, and
/// otherwise parses the binary-operator ladder followed by an optional
/// `<-` assignment.
///
/// Grammar:
/// ```text
///     no_seq := let_expr | if_expr | while_expr | fun_expr
///             | binop ('<-' no_seq)?
/// ```
///
/// The left side of `<-` must be a variable, a field access, or an array
/// index; those three shapes become `Assign`, `FieldAssign`, and
/// `ArrayAssign` respectively. Anything else is rejected.
pub fn parse_no_seq<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Let, _)) => return parse_let(tokens),
        Some((Token::If, _)) => return parse_if(tokens),
        Some((Token::While, _)) => return parse_while(tokens),
        Some((Token::Fun, _)) => return parse_fun(tokens),
        _ => {},
    }

    let left = parse_logical_or(tokens)?;

    if let Some((Token::LeftArrow, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let value = parse_no_seq(tokens)?;

        return match left {
            Expr::Var { name, .. } => Ok(Expr::Assign { name,
                                                        value: Box::new(value),
                                                        line }),
            Expr::FieldAccess { record, field, .. } => {
                Ok(Expr::FieldAssign { record,
                                       field,
                                       value: Box::new(value),
                                       line })
            },
            Expr::ArrayIndex { array, index, .. } => {
                Ok(Expr::ArrayAssign { array,
                                       index,
                                       value: Box::new(value),
                                       line })
            },
            _ => Err(ParseError::InvalidAssignmentTarget { line }),
        };
    }

    Ok(left)
}

/// Parses a `let` binding.
///
/// Syntax:
/// ```text
///     let x = e1 in e2
///     let x : t = e1 in e2
///     let f (x:t1) (y:t2) : tret = body in e2
///     let rec f (x:t1) : tret = body in e2
/// ```
/// Parameters desugar to a curried [`Expr::Fun`]; `rec` additionally wraps
/// the function in [`Expr::Fix`] carrying the full arrow type
/// `t1 -> ... -> tret`. The return annotation is mandatory when parameters
/// are present (it determines the function's type); a paramless annotation
/// is kept as an ascription for the checker.
///
/// # Errors
/// - `ExpectedIdentifier` if `let` is not followed by a name.
/// - `UnexpectedToken` for a missing `=`, `in`, or return annotation, and
///   for `let rec` without parameters.
pub fn parse_let<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let recursive = if let Some((Token::Rec, _)) = tokens.peek() {
        tokens.next();
        true
    } else {
        false
    };

    let name = match tokens.peek() {
        Some((Token::Identifier(n), _)) => {
            let n = n.clone();
            tokens.next();
            n
        },
        _ => return Err(ParseError::ExpectedIdentifier { line }),
    };

    let params = parse_params(tokens)?;

    let annotation = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type(tokens)?)
    } else {
        None
    };

    if recursive && params.is_empty() {
        return Err(ParseError::UnexpectedToken {
            token: "'let rec' requires at least one parameter".to_string(),
            line,
        });
    }
    if !params.is_empty() && annotation.is_none() {
        return Err(ParseError::UnexpectedToken {
            token: "Expected ':' and a return type after the parameters".to_string(),
            line,
        });
    }

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '=', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let value = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::In, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'in', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let body = parse_expression(tokens)?;

    if params.is_empty() {
        return Ok(Expr::Let { name,
                              ascription: annotation,
                              value: Box::new(value),
                              body: Box::new(body),
                              line });
    }

    let return_type = annotation.unwrap_or(Type::Unit);
    let fun_type = Type::arrow_from(&params, return_type.clone());
    let fun = Expr::Fun { params,
                          body: Box::new(value),
                          return_type,
                          line };

    let bound = if recursive {
        Expr::Fix { name: name.clone(),
                    ty: fun_type,
                    fun: Box::new(fun),
                    line }
    } else {
        fun
    };

    Ok(Expr::Let { name,
                   ascription: None,
                   value: Box::new(bound),
                   body: Box::new(body),
                   line })
}

/// Parses an anonymous function.
///
/// Syntax: `fun (x:t1) ... (y:tn) : tret = body`, exactly the function
/// form of a `let` binding minus the name. The body extends as far right
/// as possible, like a `let` body.
pub fn parse_fun<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let params = parse_params(tokens)?;
    if params.is_empty() {
        return Err(ParseError::UnexpectedToken {
            token: "'fun' requires at least one parameter".to_string(),
            line,
        });
    }

    match tokens.next() {
        Some((Token::Colon, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected ':' and a return type, found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }
    let return_type = parse_type(tokens)?;

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '=', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let body = parse_expression(tokens)?;

    Ok(Expr::Fun { params,
                   body: Box::new(body),
                   return_type,
                   line })
}

/// Parses a possibly empty parameter list: `('(' IDENT ':' type ')')*`.
fn parse_params<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<(String, Type)>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();

    while let Some((Token::LParen, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let name = parse_identifier(tokens)?;

        match tokens.next() {
            Some((Token::Colon, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ':' after parameter name, found {tok:?}"),
                                                         line:  *l, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }

        let ty = parse_type(tokens)?;

        match tokens.next() {
            Some((Token::RParen, _)) => {},
            _ => return Err(ParseError::ExpectedClosingParen { line }),
        }

        params.push((name, ty));
    }

    Ok(params)
}

/// Parses an `if ... then ... else ...` expression.
///
/// The condition is a full expression (it stops naturally at `then`); the
/// branches stop before any top-level `;`, so `if c then a else b; c`
/// sequences the whole conditional with `c`. The `else` branch is
/// mandatory.
///
/// # Errors
/// `UnexpectedToken` if `then` or `else` is missing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let condition = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::Then, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'then', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let then_branch = parse_no_seq(tokens)?;

    match tokens.next() {
        Some((Token::Else, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'else', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let else_branch = parse_no_seq(tokens)?;

    Ok(Expr::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch: Box::new(else_branch),
                  line })
}

/// Parses a `while ... do ... done` loop.
///
/// Both the condition and the body are full expressions; the `do` and
/// `done` keywords delimit the body, so sequencing inside it needs no
/// parentheses.
///
/// # Errors
/// `UnexpectedToken` if `do` or `done` is missing.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let condition = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::Do, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'do', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let body = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::Done, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected 'done', found {tok:?}"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    Ok(Expr::While { condition: Box::new(condition),
                     body: Box::new(body),
                     line })
}
