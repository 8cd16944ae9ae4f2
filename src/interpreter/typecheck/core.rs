use std::collections::HashMap;

use crate::{
    ast::{Expr, Program, RecordDecl, Type},
    error::TypeError,
    interpreter::typecheck::records::RecordTable,
};

/// Result type used by the type checker.
///
/// All checking functions return either a type (or other value) or the
/// first `TypeError` encountered; checking is fail-fast.
pub type CheckResult<T> = Result<T, TypeError>;

/// A variable binding in the typing environment.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The binding's type.
    pub ty:      Type,
    /// Whether the binding is a mutable cell, i.e. a `let` whose body
    /// assigns to it. Function parameters and `Fix` self-bindings are
    /// never mutable.
    pub mutable: bool,
}

/// Checks a parsed program and returns the type of its body.
///
/// Builds the record declaration table, then checks the program
/// expression in an empty environment.
///
/// # Errors
/// Returns the first `TypeError` found, either in the declarations or in
/// the program expression.
pub fn check_program(program: &Program) -> CheckResult<Type> {
    let mut checker = Checker::new(&program.decls)?;
    checker.check(&program.body)
}

/// Stores the state of the type checker.
///
/// This struct holds the record declaration table and the stack of
/// lexical scopes mapping identifiers to their [`Binding`]s. Binding
/// forms push a scope for their body and pop it afterwards, so outer
/// scopes are never mutated.
pub struct Checker {
    /// The record declaration table, fully populated before any
    /// expression is checked.
    pub records: RecordTable,
    scopes:      Vec<HashMap<String, Binding>>,
}

impl Checker {
    /// Creates a checker from the program's record declarations.
    ///
    /// # Errors
    /// Returns a `TypeError` if a record name is declared twice, a field
    /// name repeats within one declaration, or a field type names an
    /// undeclared record.
    pub fn new(decls: &[RecordDecl]) -> CheckResult<Self> {
        Ok(Self { records: RecordTable::build(decls)?,
                  scopes:  vec![HashMap::new()], })
    }

    /// Looks up a binding, innermost scope first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Defines a binding in the innermost scope.
    pub fn define(&mut self, name: &str, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), binding);
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Checks an expression and returns its type.
    ///
    /// This is the main entry point for expression checking. The checker
    /// dispatches on the expression variant; every rule is
    /// syntax-directed, so no inference or unification is involved and
    /// the first failing rule aborts the check.
    ///
    /// # Errors
    /// Returns the first `TypeError` in evaluation order.
    pub fn check(&mut self, expr: &Expr) -> CheckResult<Type> {
        match expr {
            Expr::Int { .. } => Ok(Type::Int),
            Expr::Bool { .. } => Ok(Type::Bool),
            Expr::String { .. } => Ok(Type::String),
            Expr::Unit { .. } => Ok(Type::Unit),
            Expr::Var { name, line } => self.check_var(name, *line),
            Expr::BinaryOp { op,
                             left,
                             right,
                             line, } => self.check_binary(*op, left, right, *line),
            Expr::UnaryOp { op, expr, line } => self.check_unary(*op, expr, *line),
            Expr::If { condition,
                       then_branch,
                       else_branch,
                       line, } => self.check_if(condition, then_branch, else_branch, *line),
            Expr::Let { name,
                        ascription,
                        value,
                        body,
                        line, } => self.check_let(name, ascription.as_ref(), value, body, *line),
            Expr::Fun { params,
                        body,
                        return_type,
                        line, } => self.check_fun(params, body, return_type, *line),
            Expr::Fix { name, ty, fun, line } => self.check_fix(name, ty, fun, *line),
            Expr::App { function,
                        argument,
                        line, } => self.check_app(function, argument, *line),
            Expr::Seq { first, second, line } => self.check_seq(first, second, *line),
            Expr::While { condition, body, line } => self.check_while(condition, body, *line),
            Expr::Assign { name, value, line } => self.check_assign(name, value, *line),
            Expr::RecordLiteral { fields, line } => self.check_record_literal(fields, *line),
            Expr::FieldAccess { record, field, line } => {
                self.check_field_access(record, field, *line)
            },
            Expr::FieldAssign { record,
                                field,
                                value,
                                line, } => self.check_field_assign(record, field, value, *line),
            Expr::ArrayLiteral { elements, line } => self.check_array_literal(elements, *line),
            Expr::ArrayIndex { array, index, line } => self.check_array_index(array, index, *line),
            Expr::ArrayAssign { array,
                                index,
                                value,
                                line, } => self.check_array_assign(array, index, value, *line),
        }
    }

    fn check_var(&self, name: &str, line: usize) -> CheckResult<Type> {
        self.lookup(name)
            .map(|binding| binding.ty.clone())
            .ok_or_else(|| TypeError::UnboundVariable { name: name.to_string(),
                                                        line })
    }

    /// Checks a conditional: the condition must be `bool` and both
    /// branches must have the same type, which is the conditional's type.
    fn check_if(&mut self,
                condition: &Expr,
                then_branch: &Expr,
                else_branch: &Expr,
                line: usize)
                -> CheckResult<Type> {
        let cond_ty = self.check(condition)?;
        if cond_ty != Type::Bool {
            return Err(TypeError::TypeMismatch { expected: Type::Bool,
                                                 actual: cond_ty,
                                                 line });
        }

        let then_ty = self.check(then_branch)?;
        let else_ty = self.check(else_branch)?;
        if then_ty != else_ty {
            return Err(TypeError::TypeMismatch { expected: then_ty,
                                                 actual: else_ty,
                                                 line });
        }

        Ok(then_ty)
    }

    /// Checks a `let` binding.
    ///
    /// The bound expression is checked first; an ascription, when
    /// present, must equal its type. The body is then checked with the
    /// binding in scope, marked mutable when the body contains an
    /// assignment to it.
    fn check_let(&mut self,
                 name: &str,
                 ascription: Option<&Type>,
                 value: &Expr,
                 body: &Expr,
                 line: usize)
                 -> CheckResult<Type> {
        let value_ty = self.check(value)?;

        if let Some(expected) = ascription {
            self.records.validate(expected, line)?;
            if *expected != value_ty {
                return Err(TypeError::TypeMismatch { expected: expected.clone(),
                                                     actual: value_ty,
                                                     line });
            }
        }

        let mutable = body.assigns_to(name);

        self.push_scope();
        self.define(name,
                    Binding { ty: value_ty,
                              mutable });
        let body_ty = self.check(body);
        self.pop_scope();

        body_ty
    }

    /// Checks a function: under the parameters, the body must have the
    /// declared return type; the function's type folds the parameters
    /// into a right-nested arrow.
    fn check_fun(&mut self,
                 params: &[(String, Type)],
                 body: &Expr,
                 return_type: &Type,
                 line: usize)
                 -> CheckResult<Type> {
        for (_, ty) in params {
            self.records.validate(ty, line)?;
        }
        self.records.validate(return_type, line)?;

        self.push_scope();
        for (param, ty) in params {
            self.define(param,
                        Binding { ty:      ty.clone(),
                                  mutable: false, });
        }
        let body_ty = self.check(body);
        self.pop_scope();

        let body_ty = body_ty?;
        if body_ty != *return_type {
            return Err(TypeError::TypeMismatch { expected: return_type.clone(),
                                                 actual: body_ty,
                                                 line });
        }

        Ok(Type::arrow_from(params, return_type.clone()))
    }

    /// Checks the fixpoint form: the enclosed function must have the
    /// declared type with the self-binding in scope.
    fn check_fix(&mut self, name: &str, ty: &Type, fun: &Expr, line: usize) -> CheckResult<Type> {
        self.records.validate(ty, line)?;

        self.push_scope();
        self.define(name,
                    Binding { ty:      ty.clone(),
                              mutable: false, });
        let fun_ty = self.check(fun);
        self.pop_scope();

        let fun_ty = fun_ty?;
        if fun_ty != *ty {
            return Err(TypeError::TypeMismatch { expected: ty.clone(),
                                                 actual: fun_ty,
                                                 line });
        }

        Ok(fun_ty)
    }

    /// Checks an application: the head must be an arrow whose parameter
    /// type equals the argument's type.
    fn check_app(&mut self, function: &Expr, argument: &Expr, line: usize) -> CheckResult<Type> {
        let fun_ty = self.check(function)?;
        let arg_ty = self.check(argument)?;

        match fun_ty {
            Type::Arrow(param, result) => {
                if *param != arg_ty {
                    return Err(TypeError::TypeMismatch { expected: *param,
                                                         actual: arg_ty,
                                                         line });
                }
                Ok(*result)
            },
            actual => Err(TypeError::NotAFunction { actual, line }),
        }
    }

    /// Checks sequencing: the first expression must be strictly `unit`.
    fn check_seq(&mut self, first: &Expr, second: &Expr, line: usize) -> CheckResult<Type> {
        let first_ty = self.check(first)?;
        if first_ty != Type::Unit {
            return Err(TypeError::TypeMismatch { expected: Type::Unit,
                                                 actual: first_ty,
                                                 line });
        }
        self.check(second)
    }

    /// Checks a loop: `bool` condition, `unit` body, `unit` result.
    fn check_while(&mut self, condition: &Expr, body: &Expr, line: usize) -> CheckResult<Type> {
        let cond_ty = self.check(condition)?;
        if cond_ty != Type::Bool {
            return Err(TypeError::TypeMismatch { expected: Type::Bool,
                                                 actual: cond_ty,
                                                 line });
        }

        let body_ty = self.check(body)?;
        if body_ty != Type::Unit {
            return Err(TypeError::TypeMismatch { expected: Type::Unit,
                                                 actual: body_ty,
                                                 line });
        }

        Ok(Type::Unit)
    }

    /// Checks assignment to a binding: the target must be in scope and
    /// marked mutable, and the value's type must equal the binding's.
    fn check_assign(&mut self, name: &str, value: &Expr, line: usize) -> CheckResult<Type> {
        let binding = match self.lookup(name) {
            Some(binding) => binding.clone(),
            None => {
                return Err(TypeError::UnboundVariable { name: name.to_string(),
                                                        line });
            },
        };

        if !binding.mutable {
            return Err(TypeError::NotMutable { name: name.to_string(),
                                               line });
        }

        let value_ty = self.check(value)?;
        if value_ty != binding.ty {
            return Err(TypeError::TypeMismatch { expected: binding.ty,
                                                 actual: value_ty,
                                                 line });
        }

        Ok(Type::Unit)
    }

    /// Checks an array literal: `[]` is `unit array`; otherwise every
    /// element must have the first element's type.
    fn check_array_literal(&mut self, elements: &[Expr], line: usize) -> CheckResult<Type> {
        let Some((first, rest)) = elements.split_first() else {
            return Ok(Type::Array(Box::new(Type::Unit)));
        };

        let elem_ty = self.check(first)?;
        for element in rest {
            let ty = self.check(element)?;
            if ty != elem_ty {
                return Err(TypeError::TypeMismatch { expected: elem_ty,
                                                     actual: ty,
                                                     line });
            }
        }

        Ok(Type::Array(Box::new(elem_ty)))
    }

    /// Checks an index read: array of `t` indexed by `int` yields `t`.
    fn check_array_index(&mut self, array: &Expr, index: &Expr, line: usize) -> CheckResult<Type> {
        let elem = match self.check(array)? {
            Type::Array(elem) => elem,
            actual => {
                return Err(TypeError::TypeMismatch { expected:
                                                         Type::Array(Box::new(Type::Unit)),
                                                     actual,
                                                     line });
            },
        };

        let index_ty = self.check(index)?;
        if index_ty != Type::Int {
            return Err(TypeError::TypeMismatch { expected: Type::Int,
                                                 actual: index_ty,
                                                 line });
        }

        Ok(*elem)
    }

    /// Checks an index write: the stored value must have the element
    /// type; the result is `unit`.
    fn check_array_assign(&mut self,
                          array: &Expr,
                          index: &Expr,
                          value: &Expr,
                          line: usize)
                          -> CheckResult<Type> {
        let elem_ty = self.check_array_index(array, index, line)?;

        let value_ty = self.check(value)?;
        if value_ty != elem_ty {
            return Err(TypeError::TypeMismatch { expected: elem_ty,
                                                 actual: value_ty,
                                                 line });
        }

        Ok(Type::Unit)
    }
}
