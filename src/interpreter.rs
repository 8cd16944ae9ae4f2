/// Turns source text into tokens.
///
/// Defines the token set, tracks the current source line, strips
/// whitespace and nested block comments, and reports lexing failures.
pub mod lexer;

/// Turns tokens into an abstract syntax tree.
///
/// A recursive-descent parser with one function per precedence level,
/// covering the binding and control forms, the operator ladder,
/// application, postfix selectors, atoms, and the type grammar.
pub mod parser;

/// Rejects ill-typed programs before evaluation.
///
/// A syntax-directed checker over a scoped typing environment and the
/// record declaration table; the first rule violation aborts the check.
pub mod typecheck;

/// Runtime values and the heap.
///
/// Defines the value model, including closures and pointers, and the
/// append-only heap holding records, arrays, and mutable cells.
pub mod value;

/// Executes the checked program.
///
/// An environment-threaded recursive evaluator with strict left-to-right
/// evaluation, short-circuit logic, heap-backed mutation, and recursion
/// through heap indirection.
pub mod evaluator;
