use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// The value environment: a mapping from identifiers to values.
///
/// Environments are lexically scoped and persistent: binding produces an
/// extended copy for the body only, so outer bindings are never mutated
/// and a closure's captured environment stays exactly what it saw at
/// creation time. Mutable bindings are therefore represented as pointers
/// to heap cells rather than by mutating the environment; see the
/// evaluator's `let` handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    bindings: HashMap<String, Value>,
}

impl Env {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a binding by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns a copy of this environment extended with one binding.
    /// A binding of the same name is shadowed in the copy.
    #[must_use]
    pub fn bind(&self, name: &str, value: Value) -> Self {
        let mut extended = self.clone();
        extended.bindings.insert(name.to_string(), value);
        extended
    }
}
