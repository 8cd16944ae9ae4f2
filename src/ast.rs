/// Represents a type in the language's type grammar.
///
/// Types are produced by the parser from annotations and type declarations,
/// and compared structurally by the type checker. Record types are nominal:
/// two record types are equal exactly when their declared names match; every
/// other constructor compares by structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The type of integer values.
    Int,
    /// The type of boolean values.
    Bool,
    /// The type of the unit value `()`.
    Unit,
    /// The type of string values.
    String,
    /// A function type `t1 -> t2`. The arrow is right-associative in the
    /// concrete syntax; here associativity is already resolved.
    Arrow(Box<Self>, Box<Self>),
    /// An array type `t array`.
    Array(Box<Self>),
    /// A declared record type, referred to by name.
    Record(String),
}

impl Type {
    /// Folds a parameter list and a return type into a curried arrow type.
    ///
    /// `[t1, t2] -> ret` becomes `t1 -> t2 -> ret`.
    #[must_use]
    pub fn arrow_from(params: &[(String, Self)], ret: Self) -> Self {
        params.iter()
              .rev()
              .fold(ret, |acc, (_, ty)| Self::Arrow(Box::new(ty.clone()), Box::new(acc)))
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Unit => write!(f, "unit"),
            Self::String => write!(f, "string"),
            Self::Arrow(from, to) => match **from {
                Self::Arrow(..) => write!(f, "({from}) -> {to}"),
                _ => write!(f, "{from} -> {to}"),
            },
            Self::Array(elem) => match **elem {
                Self::Arrow(..) => write!(f, "({elem}) array"),
                _ => write!(f, "{elem} array"),
            },
            Self::Record(name) => write!(f, "{name}"),
        }
    }
}

/// One field of a record declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Whether the field may be updated with `<-`.
    pub mutable: bool,
    /// The field name, unique within its record.
    pub name:    String,
    /// The declared field type.
    pub ty:      Type,
}

/// A record type declaration, `type name = { fields }`.
///
/// Declarations accumulate into a table that maps names to their ordered
/// field lists. A name may be declared at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    /// The declared record name.
    pub name:   String,
    /// The fields in declaration order.
    pub fields: Vec<FieldDecl>,
    /// Line number in the source code.
    pub line:   usize,
}

/// A complete parsed program: the record declarations followed by the
/// program expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Record declarations, in source order.
    pub decls: Vec<RecordDecl>,
    /// The expression whose value is the program's result.
    pub body:  Expr,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers every construct of the language: literals, variables,
/// operators, conditionals, bindings, functions, application, sequencing,
/// loops, assignment, and the record and array forms. Each variant carries
/// the source line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal.
    Int {
        /// The literal value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal, `true` or `false`.
    Bool {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal, with escapes already resolved.
    String {
        /// The literal value.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// The unit literal `()`.
    Unit {
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Var {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (arithmetic, comparison, or logical).
    BinaryOp {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary operation (negation or logical not).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Conditional expression; the `else` branch is mandatory.
    If {
        /// The condition expression.
        condition:   Box<Self>,
        /// Expression evaluated if the condition is true.
        then_branch: Box<Self>,
        /// Expression evaluated if the condition is false.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A `let` binding, `let x = e1 in e2`.
    Let {
        /// The bound name.
        name:       String,
        /// Optional type ascription on a paramless binding.
        ascription: Option<Type>,
        /// The bound expression.
        value:      Box<Self>,
        /// The body in which the binding is visible.
        body:       Box<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A function with one or more typed parameters and a declared return
    /// type. Multi-parameter functions consume arguments one at a time.
    Fun {
        /// The parameters, each with its declared type.
        params:      Vec<(String, Type)>,
        /// The function body.
        body:        Box<Self>,
        /// The declared return type of the body.
        return_type: Type,
        /// Line number in the source code.
        line:        usize,
    },
    /// The fixpoint form introduced by `let rec`: a function that may refer
    /// to itself through `name`.
    Fix {
        /// The self-referential binding.
        name: String,
        /// The full arrow type of the recursive function.
        ty:   Type,
        /// The enclosed `Fun` expression.
        fun:  Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Function application, one argument at a time: `f x y` is
    /// `App(App(f, x), y)`.
    App {
        /// The function expression.
        function: Box<Self>,
        /// The argument expression.
        argument: Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Sequencing, `e1; e2`. The first expression must have type unit.
    Seq {
        /// The expression evaluated for its effect.
        first:  Box<Self>,
        /// The expression whose value is the result.
        second: Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A `while c do body done` loop.
    While {
        /// The loop condition, re-read each iteration.
        condition: Box<Self>,
        /// The loop body, of type unit.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Assignment to a mutable `let` binding, `x <- e`.
    Assign {
        /// The assigned variable.
        name:  String,
        /// The value to store.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A record literal, `{x=1; y=2}`. The record name is not part of the
    /// syntax; the checker resolves the literal against the declaration
    /// table by its exact field list.
    RecordLiteral {
        /// The field assignments, in source order.
        fields: Vec<(String, Self)>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Field access, `e.f`.
    FieldAccess {
        /// The record expression.
        record: Box<Self>,
        /// The accessed field name.
        field:  String,
        /// Line number in the source code.
        line:   usize,
    },
    /// Field update, `e.f <- e2`. Requires the field to be `mutable`.
    FieldAssign {
        /// The record expression.
        record: Box<Self>,
        /// The updated field name.
        field:  String,
        /// The value to store.
        value:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Array literal expression, `[e1; e2; ...]`.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Array indexing expression, `e.(i)`.
    ArrayIndex {
        /// The array to index into.
        array: Box<Self>,
        /// The index to access.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Array element update, `e.(i) <- v`.
    ArrayAssign {
        /// The array to update.
        array: Box<Self>,
        /// The index to store at.
        index: Box<Self>,
        /// The value to store.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use lumen::ast::Expr;
    ///
    /// let expr = Expr::Var { name: "x".to_string(),
    ///                        line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Int { line, .. }
            | Self::Bool { line, .. }
            | Self::String { line, .. }
            | Self::Unit { line }
            | Self::Var { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::If { line, .. }
            | Self::Let { line, .. }
            | Self::Fun { line, .. }
            | Self::Fix { line, .. }
            | Self::App { line, .. }
            | Self::Seq { line, .. }
            | Self::While { line, .. }
            | Self::Assign { line, .. }
            | Self::RecordLiteral { line, .. }
            | Self::FieldAccess { line, .. }
            | Self::FieldAssign { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::ArrayIndex { line, .. }
            | Self::ArrayAssign { line, .. } => *line,
        }
    }

    /// Reports whether this expression contains an assignment `name <- ...`
    /// to the given binding.
    ///
    /// The scan is purely syntactic and stops at forms that rebind `name`
    /// (a shadowing `let`, a parameter, or a `Fix` binder), so assignments
    /// to a shadowing binding do not count. The checker uses it to mark a
    /// `let` binding as a mutable cell, and the evaluator uses the same
    /// scan to decide whether the binding needs a heap cell, so typing and
    /// allocation always agree.
    #[must_use]
    pub fn assigns_to(&self, name: &str) -> bool {
        match self {
            Self::Int { .. }
            | Self::Bool { .. }
            | Self::String { .. }
            | Self::Unit { .. }
            | Self::Var { .. } => false,
            Self::Assign { name: target, value, .. } => {
                target == name || value.assigns_to(name)
            },
            Self::BinaryOp { left, right, .. } => {
                left.assigns_to(name) || right.assigns_to(name)
            },
            Self::UnaryOp { expr, .. } => expr.assigns_to(name),
            Self::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                condition.assigns_to(name)
                || then_branch.assigns_to(name)
                || else_branch.assigns_to(name)
            },
            Self::Let { name: bound,
                        value,
                        body,
                        .. } => {
                value.assigns_to(name) || (bound != name && body.assigns_to(name))
            },
            Self::Fun { params, body, .. } => {
                params.iter().all(|(p, _)| p != name) && body.assigns_to(name)
            },
            Self::Fix { name: bound, fun, .. } => bound != name && fun.assigns_to(name),
            Self::App { function, argument, .. } => {
                function.assigns_to(name) || argument.assigns_to(name)
            },
            Self::Seq { first, second, .. } => {
                first.assigns_to(name) || second.assigns_to(name)
            },
            Self::While { condition, body, .. } => {
                condition.assigns_to(name) || body.assigns_to(name)
            },
            Self::RecordLiteral { fields, .. } => {
                fields.iter().any(|(_, e)| e.assigns_to(name))
            },
            Self::FieldAccess { record, .. } => record.assigns_to(name),
            Self::FieldAssign { record, value, .. } => {
                record.assigns_to(name) || value.assigns_to(name)
            },
            Self::ArrayLiteral { elements, .. } => {
                elements.iter().any(|e| e.assigns_to(name))
            },
            Self::ArrayIndex { array, index, .. } => {
                array.assigns_to(name) || index.assigns_to(name)
            },
            Self::ArrayAssign { array, index, value, .. } => {
                array.assigns_to(name) || index.assigns_to(name) || value.assigns_to(name)
            },
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, and the short-circuit
/// logical connectives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`mod`), truncated toward zero.
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`, or `=` in expression position)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Short-circuit logical and (`&&`)
    And,
    /// Short-circuit logical or (`||`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "mod",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
