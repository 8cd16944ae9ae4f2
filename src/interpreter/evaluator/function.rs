use std::rc::Rc;

use crate::{
    ast::{Expr, Type},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interp},
            env::Env,
        },
        value::{
            core::{Closure, Value},
            heap::HeapObj,
        },
    },
};

impl Interp {
    /// Evaluates a function expression to a closure.
    ///
    /// The closure captures the current environment by copy together
    /// with the full parameter list; application consumes the parameters
    /// one at a time.
    #[must_use]
    pub fn eval_fun(params: &[(String, Type)], body: &Expr, env: &Env) -> Value {
        let params = params.iter().map(|(name, _)| name.clone()).collect();
        Value::Closure(Rc::new(Closure { params,
                                         body: body.clone(),
                                         env: env.clone() }))
    }

    /// Evaluates the fixpoint form.
    ///
    /// The natural closed-over recursive binding would be a cycle, so it
    /// is broken with one indirection: allocate a heap cell, build the
    /// closure with the binding pointing at the cell, store the closure
    /// into the cell, and return the pointer. Variable reads and
    /// application both load through cells, so the recursive call finds
    /// the finished closure.
    pub fn eval_fix(&mut self, name: &str, fun: &Expr, line: usize, env: &Env) -> EvalResult<Value> {
        let id = self.heap.alloc(HeapObj::Cell(Value::Unit));
        let extended = env.bind(name, Value::Ptr(id));

        let closure = self.eval(fun, &extended)?;

        match self.heap.get_mut(id) {
            Some(HeapObj::Cell(inner)) => *inner = closure,
            _ => {
                return Err(RuntimeError::TypeMismatch { details: "recursive binding lost its cell".to_string(),
                                                        line });
            },
        }

        Ok(Value::Ptr(id))
    }

    /// Evaluates a function application.
    ///
    /// The head is evaluated first and loaded through a possible heap
    /// cell (the recursive-binding indirection), then the argument. The
    /// first remaining parameter is bound in the closure's captured
    /// environment; when parameters remain after it, the result is the
    /// partially-applied closure, otherwise the body is evaluated.
    ///
    /// # Errors
    /// A non-function head is a runtime type mismatch (unreachable on
    /// checked programs).
    pub fn eval_app(&mut self,
                    function: &Expr,
                    argument: &Expr,
                    line: usize,
                    env: &Env)
                    -> EvalResult<Value> {
        let head = self.eval(function, env)?;
        let head = self.load(&head);
        let argument = self.eval(argument, env)?;

        let closure = match head {
            Value::Closure(closure) => closure,
            other => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot apply {}",
                                                                         other.kind()),
                                                        line });
            },
        };

        let Some((first, rest)) = closure.params.split_first() else {
            return Err(RuntimeError::TypeMismatch { details: "closure with no parameters".to_string(),
                                                    line });
        };

        let extended = closure.env.bind(first, argument);

        if rest.is_empty() {
            self.eval(&closure.body, &extended)
        } else {
            Ok(Value::Closure(Rc::new(Closure { params: rest.to_vec(),
                                                body:   closure.body.clone(),
                                                env:    extended, })))
        }
    }
}
