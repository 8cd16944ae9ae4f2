/// Lexing errors.
///
/// Defines all error types that can occur while turning source text into
/// tokens: unterminated comments and strings, illegal characters, and
/// integer literals outside the 64-bit signed range.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning tokens into an AST.
/// Parse errors include unexpected tokens, unexpected end of input, and the
/// targeted messages emitted at the parser's recovery points.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero and out-of-bounds array access.
pub mod runtime_error;
/// Type errors.
///
/// Defines all error types the checker can reject a program with, from
/// unbound variables and operand mismatches to record declaration problems.
pub mod type_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use type_error::TypeError;

/// Any error a program can fail with, tagged by pipeline stage.
///
/// Each stage short-circuits to the driver; no stage recovers from the
/// previous stage's errors. The driver maps the stage to its exit code.
#[derive(Debug)]
pub enum Error {
    /// The source text could not be tokenized.
    Lex(LexError),
    /// The token stream could not be parsed.
    Parse(ParseError),
    /// The program is ill-typed.
    Type(TypeError),
    /// The program failed while evaluating.
    Runtime(RuntimeError),
}

impl Error {
    /// The process exit code for this error's stage: 1 for lexing, 2 for
    /// parsing, 3 for typing, 4 for runtime failures.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Lex(_) => 1,
            Self::Parse(_) => 2,
            Self::Type(_) => 3,
            Self::Runtime(_) => 4,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Type(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<TypeError> for Error {
    fn from(e: TypeError) -> Self {
        Self::Type(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
