use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::{
            core::{EvalResult, Interp},
            env::Env,
        },
        value::core::Value,
    },
};

impl Interp {
    /// Evaluates a unary operation.
    ///
    /// The operand is evaluated first, then the operator applied:
    /// negation on integers (wrapping), logical NOT on booleans.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `expr`: The operand expression.
    /// - `line`: Line number for error reporting.
    /// - `env`: The value environment.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_unary_op(&mut self,
                         op: UnaryOperator,
                         expr: &Expr,
                         line: usize,
                         env: &Env)
                         -> EvalResult<Value> {
        let value = self.eval(expr, env)?;

        match op {
            UnaryOperator::Negate => Ok(Value::Int(value.as_int(line)?.wrapping_neg())),
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }
}
