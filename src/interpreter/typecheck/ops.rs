use crate::{
    ast::{BinaryOperator, Expr, Type, UnaryOperator},
    error::TypeError,
    interpreter::typecheck::core::{CheckResult, Checker},
};

impl Checker {
    /// Checks a binary operation.
    ///
    /// Arithmetic operators require `int` operands and yield `int`.
    /// Comparisons require both operands to share one primitive type
    /// (`int`, `bool`, or `string`) and yield `bool`; records, arrays,
    /// functions, and `unit` are not comparable. The logical connectives
    /// require `bool` operands and yield `bool`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The operation's result type.
    pub fn check_binary(&mut self,
                        op: BinaryOperator,
                        left: &Expr,
                        right: &Expr,
                        line: usize)
                        -> CheckResult<Type> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };

        let left_ty = self.check(left)?;
        let right_ty = self.check(right)?;

        match op {
            Add | Sub | Mul | Div | Mod => {
                if left_ty != Type::Int {
                    return Err(TypeError::TypeMismatch { expected: Type::Int,
                                                         actual: left_ty,
                                                         line });
                }
                if right_ty != Type::Int {
                    return Err(TypeError::TypeMismatch { expected: Type::Int,
                                                         actual: right_ty,
                                                         line });
                }
                Ok(Type::Int)
            },

            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                if !is_comparable(&left_ty) {
                    return Err(TypeError::NotComparable { ty: left_ty, line });
                }
                if right_ty != left_ty {
                    return Err(TypeError::TypeMismatch { expected: left_ty,
                                                         actual: right_ty,
                                                         line });
                }
                Ok(Type::Bool)
            },

            And | Or => {
                if left_ty != Type::Bool {
                    return Err(TypeError::TypeMismatch { expected: Type::Bool,
                                                         actual: left_ty,
                                                         line });
                }
                if right_ty != Type::Bool {
                    return Err(TypeError::TypeMismatch { expected: Type::Bool,
                                                         actual: right_ty,
                                                         line });
                }
                Ok(Type::Bool)
            },
        }
    }

    /// Checks a unary operation: negation requires `int`, logical not
    /// requires `bool`; each yields its operand type.
    pub fn check_unary(&mut self,
                       op: UnaryOperator,
                       expr: &Expr,
                       line: usize)
                       -> CheckResult<Type> {
        let ty = self.check(expr)?;
        let expected = match op {
            UnaryOperator::Negate => Type::Int,
            UnaryOperator::Not => Type::Bool,
        };

        if ty != expected {
            return Err(TypeError::TypeMismatch { expected,
                                                 actual: ty,
                                                 line });
        }

        Ok(ty)
    }
}

/// Determines whether values of a type can be compared.
///
/// Only the primitive types `int`, `bool`, and `string` are comparable;
/// aggregate and function types are rejected by the checker.
///
/// # Example
/// ```
/// use lumen::{ast::Type, interpreter::typecheck::ops::is_comparable};
///
/// assert!(is_comparable(&Type::Int));
/// assert!(!is_comparable(&Type::Unit));
/// ```
#[must_use]
pub const fn is_comparable(ty: &Type) -> bool {
    matches!(ty, Type::Int | Type::Bool | Type::String)
}
