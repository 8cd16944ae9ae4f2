use crate::{
    ast::{Expr, Program},
    error::RuntimeError,
    interpreter::{
        evaluator::env::Env,
        value::{
            core::Value,
            heap::{Heap, HeapObj},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the interpreter state.
///
/// This struct owns the heap; the environment is threaded through the
/// evaluation functions instead, since binding forms extend it per body
/// and closures capture it.
///
/// ## Usage
///
/// An `Interp` is created once per program run. [`Interp::run`] evaluates
/// the program body in an empty environment, and [`Interp::render`]
/// turns the resulting value into its printed form (which may need the
/// heap, for records and arrays).
#[derive(Default)]
pub struct Interp {
    /// The heap holding records, arrays, and mutable cells.
    pub heap: Heap,
}

impl Interp {
    /// Creates an interpreter with an empty heap.
    #[must_use]
    pub const fn new() -> Self {
        Self { heap: Heap::new() }
    }

    /// Evaluates a checked program and returns its final value.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if evaluation fails (division by zero or
    /// an out-of-bounds array access, on well-typed input).
    pub fn run(&mut self, program: &Program) -> EvalResult<Value> {
        self.eval(&program.body, &Env::new())
    }

    /// Evaluates an expression in an environment.
    ///
    /// This is the main entry point for evaluation. The evaluator
    /// dispatches on the expression variant; evaluation is strict and
    /// left-to-right everywhere except the two short-circuit connectives
    /// and the untaken `if` branch.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The value environment for this expression.
    ///
    /// # Returns
    /// The expression's value.
    pub fn eval(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        match expr {
            Expr::Int { value, .. } => Ok(Value::Int(*value)),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Unit { .. } => Ok(Value::Unit),
            Expr::Var { name, line } => self.eval_var(name, *line, env),
            Expr::BinaryOp { op,
                             left,
                             right,
                             line, } => self.eval_binary_op(*op, left, right, *line, env),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line, env),
            Expr::If { condition,
                       then_branch,
                       else_branch,
                       line, } => {
                let taken = if self.eval(condition, env)?.as_bool(*line)? {
                    then_branch
                } else {
                    else_branch
                };
                self.eval(taken, env)
            },
            Expr::Let { name,
                        value,
                        body,
                        .. } => self.eval_let(name, value, body, env),
            Expr::Fun { params, body, .. } => Ok(Self::eval_fun(params, body, env)),
            Expr::Fix { name, fun, line, .. } => self.eval_fix(name, fun, *line, env),
            Expr::App { function,
                        argument,
                        line, } => self.eval_app(function, argument, *line, env),
            Expr::Seq { first, second, .. } => {
                self.eval(first, env)?;
                self.eval(second, env)
            },
            Expr::While { condition, body, line } => self.eval_while(condition, body, *line, env),
            Expr::Assign { name, value, line } => self.eval_assign(name, value, *line, env),
            Expr::RecordLiteral { fields, .. } => self.eval_record_literal(fields, env),
            Expr::FieldAccess { record, field, line } => {
                self.eval_field_access(record, field, *line, env)
            },
            Expr::FieldAssign { record,
                                field,
                                value,
                                line, } => {
                self.eval_field_assign(record, field, value, *line, env)
            },
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements, env),
            Expr::ArrayIndex { array, index, line } => {
                self.eval_array_index(array, index, *line, env)
            },
            Expr::ArrayAssign { array,
                                index,
                                value,
                                line, } => self.eval_array_assign(array, index, value, *line, env),
        }
    }

    /// Evaluates a variable reference.
    ///
    /// A mutable binding is held as a pointer to a heap cell; reading it
    /// loads the cell's current content, which is how closures capturing
    /// the pointer observe later assignments. Other bindings hold their
    /// value directly.
    fn eval_var(&self, name: &str, line: usize, env: &Env) -> EvalResult<Value> {
        let value = env.lookup(name)
                       .ok_or_else(|| RuntimeError::UnboundVariable { name: name.to_string(),
                                                                      line })?;
        Ok(self.load(value))
    }

    /// Loads through a mutable cell: a pointer to a `Cell` yields the
    /// cell's content, every other value is returned as-is.
    pub(crate) fn load(&self, value: &Value) -> Value {
        if let Value::Ptr(id) = value
           && let Some(HeapObj::Cell(inner)) = self.heap.get(*id)
        {
            return inner.clone();
        }
        value.clone()
    }

    /// Evaluates a `let` binding.
    ///
    /// When the body assigns to the binding, the bound value is placed
    /// in a freshly allocated heap cell and the name is bound to the
    /// pointer, so assignments are visible through every capture of the
    /// binding. The common immutable binding stays pointer-free.
    fn eval_let(&mut self, name: &str, value: &Expr, body: &Expr, env: &Env) -> EvalResult<Value> {
        let bound = self.eval(value, env)?;

        let bound = if body.assigns_to(name) {
            Value::Ptr(self.heap.alloc(HeapObj::Cell(bound)))
        } else {
            bound
        };

        let extended = env.bind(name, bound);
        self.eval(body, &extended)
    }

    /// Evaluates a `while` loop: the condition is re-read before every
    /// iteration with all prior mutations visible; the body's unit value
    /// is discarded. The loop itself evaluates to unit.
    fn eval_while(&mut self,
                  condition: &Expr,
                  body: &Expr,
                  line: usize,
                  env: &Env)
                  -> EvalResult<Value> {
        while self.eval(condition, env)?.as_bool(line)? {
            self.eval(body, env)?;
        }
        Ok(Value::Unit)
    }

    /// Evaluates an assignment to a mutable binding by storing into its
    /// heap cell. The checker guarantees the binding exists and was
    /// promoted to a cell.
    fn eval_assign(&mut self,
                   name: &str,
                   value: &Expr,
                   line: usize,
                   env: &Env)
                   -> EvalResult<Value> {
        let target = env.lookup(name)
                        .ok_or_else(|| RuntimeError::UnboundVariable { name: name.to_string(),
                                                                       line })?
                        .clone();
        let new_value = self.eval(value, env)?;

        let id = target.as_ptr(line)?;
        match self.heap.get_mut(id) {
            Some(HeapObj::Cell(inner)) => {
                *inner = new_value;
                Ok(Value::Unit)
            },
            _ => Err(RuntimeError::TypeMismatch { details: format!("'{name}' is not a mutable cell"),
                                                  line }),
        }
    }

    /// Renders a value for display.
    ///
    /// Primitives render as themselves, strings re-escaped in quotes,
    /// closures as `<fun>`. Pointers are rendered through the heap:
    /// records as `{x=1; y=2}` in declaration order and arrays as
    /// `[|1; 2; 3|]`.
    #[must_use]
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::Int(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::String(s) => {
                let escaped = s.replace('\\', "\\\\")
                               .replace('"', "\\\"")
                               .replace('\n', "\\n")
                               .replace('\t', "\\t");
                format!("\"{escaped}\"")
            },
            Value::Unit => "()".to_string(),
            Value::Closure(_) => "<fun>".to_string(),
            Value::Ptr(id) => match self.heap.get(*id) {
                Some(HeapObj::Record(fields)) => {
                    let rendered: Vec<String> =
                        fields.iter()
                              .map(|(name, v)| format!("{name}={}", self.render(v)))
                              .collect();
                    format!("{{{}}}", rendered.join("; "))
                },
                Some(HeapObj::Array(elements)) => {
                    let rendered: Vec<String> =
                        elements.iter().map(|v| self.render(v)).collect();
                    format!("[|{}|]", rendered.join("; "))
                },
                Some(HeapObj::Cell(inner)) => self.render(inner),
                None => "<dangling>".to_string(),
            },
        }
    }
}
