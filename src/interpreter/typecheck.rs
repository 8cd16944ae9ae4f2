/// Core checking logic and scope management.
///
/// Contains the `Checker`, its scope stack, and the syntax-directed
/// checking rules for bindings, functions, control flow, and assignment.
pub mod core;

/// Operator typing rules.
///
/// Implements the rules for binary operators (arithmetic, comparison,
/// logical) and the two unary operators.
pub mod ops;

/// Record declarations and record typing rules.
///
/// Builds the declaration table, validates annotations against it, and
/// implements the rules for record literals, field access, and field
/// update.
pub mod records;
