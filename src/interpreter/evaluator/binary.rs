use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interp},
            env::Env,
        },
        value::core::Value,
    },
};

impl Interp {
    /// Evaluates a binary operation from its operand expressions.
    ///
    /// The logical connectives short-circuit, so they receive the
    /// unevaluated right operand: `false && e` and `true || e` never
    /// evaluate `e`. Every other operator evaluates both operands
    /// left-to-right and delegates to [`Interp::eval_binary`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    /// - `env`: The value environment.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_binary_op(&mut self,
                          op: BinaryOperator,
                          left: &Expr,
                          right: &Expr,
                          line: usize,
                          env: &Env)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                if !self.eval(left, env)?.as_bool(line)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right, env)?.as_bool(line)?))
            },
            BinaryOperator::Or => {
                if self.eval(left, env)?.as_bool(line)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right, env)?.as_bool(line)?))
            },
            _ => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Self::eval_binary(op, &left, &right, line)
            },
        }
    }

    /// Evaluates a strict binary operation between two values.
    ///
    /// Arithmetic wraps on overflow; division and modulo by zero fail,
    /// and `mod` truncates toward zero (the result takes the sign of the
    /// dividend). Comparisons accept two integers, two booleans
    /// (`false < true`), or two strings (byte-lexicographic).
    ///
    /// # Parameters
    /// - `op`: The operator (never `&&` or `||`, which short-circuit
    ///   before this point).
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use lumen::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interp, value::core::Value},
    /// };
    ///
    /// let left = Value::Int(3);
    /// let right = Value::Int(4);
    ///
    /// let result = Interp::eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Int(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        match op {
            Add | Sub | Mul | Div | Mod => {
                let a = left.as_int(line)?;
                let b = right.as_int(line)?;
                let result = match op {
                    Add => a.wrapping_add(b),
                    Sub => a.wrapping_sub(b),
                    Mul => a.wrapping_mul(b),
                    Div | Mod => {
                        if b == 0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        if matches!(op, Div) {
                            a.wrapping_div(b)
                        } else {
                            a.wrapping_rem(b)
                        }
                    },
                    _ => unreachable!(),
                };
                Ok(Value::Int(result))
            },

            _ => Self::eval_comparison(op, left, right, line),
        }
    }

    /// Evaluates a comparison between two values of one primitive type.
    ///
    /// The orders are the standard total orders: numeric for integers,
    /// `false < true` for booleans, byte-lexicographic for strings.
    fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot compare {} with {}",
                                                                         left.kind(),
                                                                         right.kind()),
                                                        line });
            },
        };

        let result = match op {
            BinaryOperator::Less => ordering.is_lt(),
            BinaryOperator::Greater => ordering.is_gt(),
            BinaryOperator::LessEqual => ordering.is_le(),
            BinaryOperator::GreaterEqual => ordering.is_ge(),
            BinaryOperator::Equal => ordering.is_eq(),
            BinaryOperator::NotEqual => ordering.is_ne(),
            _ => unreachable!(),
        };

        Ok(Value::Bool(result))
    }
}
