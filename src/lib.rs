//! # lumen
//!
//! lumen is a compiler front-end and tree-walking interpreter for a small
//! strict functional language with curried first-class functions, mutable
//! records and arrays, conditionals, and while-loops. Source text is
//! lexed, parsed, type-checked, and evaluated; each stage rejects bad
//! input with an error carrying the source line.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use logos::Logos;

use crate::{
    ast::Program,
    error::{Error, LexError},
    interpreter::{
        evaluator::core::Interp,
        lexer::{LexErrorKind, LexerExtras, Token},
        parser::core::parse_program,
        typecheck::core::check_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent
/// the syntactic structure of source code as a tree, the type grammar,
/// and record declarations. The AST is built by the parser, judged by the
/// type checker, and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression, type, and operator enums for all language
///   constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Provides the syntactic scan that decides which `let` bindings are
///   mutable cells.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, checking, or evaluating code, and the top-level [`Error`]
/// that tags an error with its stage and exit code.
///
/// # Responsibilities
/// - Defines error enums for all failure modes of each stage.
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and
///   reporting utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, type checking, evaluation,
/// value representations, and the heap to provide a complete pipeline for
/// source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, checker, and
///   evaluator.
/// - Provides entry points for each stage of the pipeline.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Lexes a source string into a token stream.
///
/// Each token is paired with the line it was produced on. Whitespace and
/// comments never appear in the stream.
///
/// # Errors
/// Returns a [`LexError`] for an unterminated comment or string, an
/// illegal character, or an integer literal out of range.
pub fn lex_source(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(kind) => {
                let line = lexer.extras.line;
                return Err(match kind {
                    LexErrorKind::BadChar => LexError::BadChar { token: lexer.slice()
                                                                             .to_string(),
                                                                 line },
                    LexErrorKind::UnterminatedComment => LexError::UnterminatedComment { line },
                    LexErrorKind::UnterminatedString => LexError::UnterminatedString { line },
                    LexErrorKind::IntOverflow => LexError::IntOverflow { line },
                });
            },
        }
    }

    Ok(tokens)
}

/// Lexes and parses a source string into a [`Program`].
///
/// # Errors
/// Returns the lexer's or parser's error, tagged with its stage.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = lex_source(source)?;
    let mut iter = tokens.iter().peekable();
    Ok(parse_program(&mut iter)?)
}

/// Runs a complete program and returns its rendered final value.
///
/// The source is lexed, parsed, type-checked, and evaluated; the
/// resulting value is rendered the way the driver prints it (`120`,
/// `true`, `()`, `"..."`, `<fun>`, `{x=1; y=2}`, `[|1; 2; 3|]`).
///
/// # Errors
/// Returns the first failing stage's error. [`Error::exit_code`] maps it
/// to the driver's exit code.
///
/// # Examples
/// ```
/// use lumen::run_program;
///
/// let source = "let x = 2 + 2 in x * 10";
/// assert_eq!(run_program(source).unwrap(), "40");
///
/// // An intentional error: 'y' is not defined.
/// let source = "let x = y + 1 in x";
/// assert!(run_program(source).is_err());
/// ```
pub fn run_program(source: &str) -> Result<String, Error> {
    let program = parse_source(source)?;
    check_program(&program)?;

    let mut interp = Interp::new();
    let value = interp.run(&program)?;
    Ok(interp.render(&value))
}
