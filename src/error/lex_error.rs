#[derive(Debug)]
/// Represents all errors that can occur during lexing.
pub enum LexError {
    /// A block comment `(* ... *)` was still open at end of input.
    UnterminatedComment {
        /// The source line where the comment opened.
        line: usize,
    },
    /// A string literal was still open at end of input.
    UnterminatedString {
        /// The source line where the string opened.
        line: usize,
    },
    /// A character that belongs to no token, or an unknown string escape.
    BadChar {
        /// The offending source text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal outside the 64-bit signed range.
    IntOverflow {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedComment { line } => {
                write!(f, "Error on line {line}: Unterminated comment.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },
            Self::BadChar { token, line } => {
                write!(f, "Error on line {line}: Illegal character: {token}.")
            },
            Self::IntOverflow { line } => write!(f,
                                                 "Error on line {line}: Integer literal out of 64-bit signed range."),
        }
    }
}

impl std::error::Error for LexError {}
