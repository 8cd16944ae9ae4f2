/// Program and binding-form parsing.
///
/// Contains the program entry point (type declarations followed by the
/// program expression), sequencing, and the `let`, `if`, `while`, `fun`,
/// and assignment forms.
pub mod core;

/// Binary operator parsing.
///
/// Implements the stratified precedence ladder for all binary operators,
/// from `||` down to the multiplicative level.
pub mod binary;

/// Unary, application, postfix, and atom parsing.
///
/// Handles prefix `-` and `!`, function application by juxtaposition, the
/// `.field` and `.(index)` selectors, and the atomic expressions:
/// literals, variables, grouping, record literals, and array literals.
pub mod unary;

/// Type grammar parsing.
///
/// Parses type annotations (`int`, arrows, `array` postfixes, record
/// names) and `type` declarations.
pub mod types;

/// Utility functions for the parser.
///
/// Provides small shared helpers used across parsing functions.
pub mod utils;
