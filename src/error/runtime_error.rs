#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// Well-typed programs can only fail with `DivisionByZero` or
/// `IndexOutOfBounds`; the remaining variants guard against evaluating an
/// unchecked AST and are unreachable after a successful checking pass.
pub enum RuntimeError {
    /// Attempted division (or modulo) by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    IndexOutOfBounds {
        /// The array length.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to use an undefined variable.
    UnboundVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected dynamic type.
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),

            Self::IndexOutOfBounds { len, found, line } => write!(f,
                                                                  "Error on line {line}: Index {found} is out of bounds for an array of length {len}."),

            Self::UnboundVariable { name, line } => {
                write!(f, "Error on line {line}: Unbound variable '{name}'.")
            },

            Self::TypeMismatch { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
