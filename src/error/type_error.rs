use crate::ast::Type;

#[derive(Debug)]
/// Represents all errors the type checker can reject a program with.
pub enum TypeError {
    /// Tried to use a variable that is not in scope.
    UnboundVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expression had a different type than its context requires.
    TypeMismatch {
        /// The type the context requires.
        expected: Type,
        /// The type the expression actually has.
        actual:   Type,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The head of an application is not a function.
    NotAFunction {
        /// The type the head actually has.
        actual: Type,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Assignment to a binding or record field that is not mutable.
    NotMutable {
        /// The binding or field name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Operands of a comparison were not of a primitive type.
    NotComparable {
        /// The offending operand type.
        ty:   Type,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A record literal has the wrong number of fields for its declaration.
    ArityMismatch {
        /// The record name.
        record:   String,
        /// The declared field count.
        expected: usize,
        /// The field count found in the literal.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A field name does not belong to the record, or the literal's fields
    /// are not in declaration order.
    RecordFieldMismatch {
        /// The record name.
        record: String,
        /// The offending field name.
        field:  String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// No declared record matches, or a type annotation names an undeclared
    /// record.
    UnknownRecord {
        /// The record name, or the literal's field list when no name is
        /// known.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A record name was declared more than once.
    DuplicateRecord {
        /// The record name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A field name appears twice within one record declaration.
    DuplicateField {
        /// The record name.
        record: String,
        /// The duplicated field name.
        field:  String,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundVariable { name, line } => {
                write!(f, "Error on line {line}: Unbound variable '{name}'.")
            },

            Self::TypeMismatch { expected,
                                 actual,
                                 line, } => write!(f,
                                                   "Error on line {line}: Expected type {expected}, found {actual}."),

            Self::NotAFunction { actual, line } => write!(f,
                                                          "Error on line {line}: This expression has type {actual} and is not a function; it cannot be applied."),

            Self::NotMutable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not mutable.")
            },

            Self::NotComparable { ty, line } => write!(f,
                                                       "Error on line {line}: Values of type {ty} cannot be compared."),

            Self::ArityMismatch { record,
                                  expected,
                                  found,
                                  line, } => write!(f,
                                                    "Error on line {line}: Record '{record}' has {expected} fields, but {found} were given."),

            Self::RecordFieldMismatch { record, field, line } => write!(f,
                                                                        "Error on line {line}: Field '{field}' does not match the declaration of record '{record}'."),

            Self::UnknownRecord { name, line } => {
                write!(f, "Error on line {line}: Unknown record type: {name}.")
            },

            Self::DuplicateRecord { name, line } => write!(f,
                                                           "Error on line {line}: Record '{name}' is declared more than once."),

            Self::DuplicateField { record, field, line } => write!(f,
                                                                   "Error on line {line}: Field '{field}' appears twice in record '{record}'."),
        }
    }
}

impl std::error::Error for TypeError {}
