use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interp},
            env::Env,
        },
        value::{core::Value, heap::HeapObj},
    },
};

impl Interp {
    /// Evaluates a record literal.
    ///
    /// Field expressions are evaluated in declaration order, the record
    /// instance is allocated on the heap, and the pointer is the
    /// literal's value.
    pub fn eval_record_literal(&mut self,
                               fields: &[(String, Expr)],
                               env: &Env)
                               -> EvalResult<Value> {
        let mut instance = Vec::with_capacity(fields.len());
        for (name, expr) in fields {
            let value = self.eval(expr, env)?;
            instance.push((name.clone(), value));
        }

        Ok(Value::Ptr(self.heap.alloc(HeapObj::Record(instance))))
    }

    /// Evaluates a field read through the record's pointer.
    pub fn eval_field_access(&mut self,
                             record: &Expr,
                             field: &str,
                             line: usize,
                             env: &Env)
                             -> EvalResult<Value> {
        let id = self.eval(record, env)?.as_ptr(line)?;

        let Some(HeapObj::Record(fields)) = self.heap.get(id) else {
            return Err(RuntimeError::TypeMismatch { details: "field access on a non-record".to_string(),
                                                    line });
        };

        fields.iter()
              .find(|(name, _)| name == field)
              .map(|(_, value)| value.clone())
              .ok_or_else(|| RuntimeError::TypeMismatch { details: format!("record has no field '{field}'"),
                                                          line })
    }

    /// Evaluates a field write: the record is evaluated first, then the
    /// stored value, and the field is updated in place on the heap. The
    /// update is visible through every alias of the record.
    pub fn eval_field_assign(&mut self,
                             record: &Expr,
                             field: &str,
                             value: &Expr,
                             line: usize,
                             env: &Env)
                             -> EvalResult<Value> {
        let id = self.eval(record, env)?.as_ptr(line)?;
        let new_value = self.eval(value, env)?;

        let Some(HeapObj::Record(fields)) = self.heap.get_mut(id) else {
            return Err(RuntimeError::TypeMismatch { details: "field update on a non-record".to_string(),
                                                    line });
        };

        match fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => {
                *slot = new_value;
                Ok(Value::Unit)
            },
            None => Err(RuntimeError::TypeMismatch { details: format!("record has no field '{field}'"),
                                                     line }),
        }
    }

    /// Evaluates an array literal: elements left-to-right, then one heap
    /// allocation; the pointer is the literal's value.
    pub fn eval_array_literal(&mut self, elements: &[Expr], env: &Env) -> EvalResult<Value> {
        let mut instance = Vec::with_capacity(elements.len());
        for element in elements {
            instance.push(self.eval(element, env)?);
        }

        Ok(Value::Ptr(self.heap.alloc(HeapObj::Array(instance))))
    }

    /// Evaluates an element read, `e.(i)`, with bounds checking.
    ///
    /// # Errors
    /// `IndexOutOfBounds` when `i < 0` or `i >= length`.
    pub fn eval_array_index(&mut self,
                            array: &Expr,
                            index: &Expr,
                            line: usize,
                            env: &Env)
                            -> EvalResult<Value> {
        let id = self.eval(array, env)?.as_ptr(line)?;
        let index = self.eval(index, env)?.as_int(line)?;

        let Some(HeapObj::Array(elements)) = self.heap.get(id) else {
            return Err(RuntimeError::TypeMismatch { details: "indexing a non-array".to_string(),
                                                    line });
        };

        usize::try_from(index)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .ok_or(RuntimeError::IndexOutOfBounds { len: elements.len(),
                                                    found: index,
                                                    line })
    }

    /// Evaluates an element write, `e.(i) <- v`: array, index, and value
    /// evaluate left-to-right, the bounds are checked, and the slot is
    /// updated in place.
    ///
    /// # Errors
    /// `IndexOutOfBounds` when `i < 0` or `i >= length`.
    pub fn eval_array_assign(&mut self,
                             array: &Expr,
                             index: &Expr,
                             value: &Expr,
                             line: usize,
                             env: &Env)
                             -> EvalResult<Value> {
        let id = self.eval(array, env)?.as_ptr(line)?;
        let index = self.eval(index, env)?.as_int(line)?;
        let new_value = self.eval(value, env)?;

        let Some(HeapObj::Array(elements)) = self.heap.get_mut(id) else {
            return Err(RuntimeError::TypeMismatch { details: "updating a non-array".to_string(),
                                                    line });
        };

        let len = elements.len();
        match usize::try_from(index).ok().and_then(|i| elements.get_mut(i)) {
            Some(slot) => {
                *slot = new_value;
                Ok(Value::Unit)
            },
            None => Err(RuntimeError::IndexOutOfBounds { len,
                                                         found: index,
                                                         line }),
        }
    }
}
