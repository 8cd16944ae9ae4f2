use crate::{
    ast::{Expr, RecordDecl, Type},
    error::TypeError,
    interpreter::typecheck::core::{CheckResult, Checker},
};

/// The record declaration table, mapping names to ordered field lists.
///
/// Declarations are kept in source order: a literal that several
/// declarations could match (identical field lists) resolves to the
/// first one, and a field type may only name records declared at or
/// before its own declaration.
pub struct RecordTable {
    decls: Vec<RecordDecl>,
}

impl RecordTable {
    /// Builds the table from the program's declarations.
    ///
    /// # Errors
    /// - `DuplicateRecord` if a name is declared twice.
    /// - `DuplicateField` if a field name repeats within one declaration.
    /// - `UnknownRecord` if a field type names a record that is not
    ///   declared yet (self-reference is allowed).
    pub fn build(decls: &[RecordDecl]) -> CheckResult<Self> {
        let mut table = Self { decls: Vec::new() };

        for decl in decls {
            if table.get(&decl.name).is_some() {
                return Err(TypeError::DuplicateRecord { name: decl.name.clone(),
                                                        line: decl.line, });
            }

            for (i, field) in decl.fields.iter().enumerate() {
                if decl.fields[..i].iter().any(|f| f.name == field.name) {
                    return Err(TypeError::DuplicateField { record: decl.name.clone(),
                                                           field:  field.name.clone(),
                                                           line:   decl.line, });
                }
            }

            // Push first so field types may refer to the record itself.
            table.decls.push(decl.clone());
            for field in &decl.fields {
                table.validate(&field.ty, decl.line)?;
            }
        }

        Ok(table)
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RecordDecl> {
        self.decls.iter().find(|decl| decl.name == name)
    }

    /// Validates that a type annotation only names declared records.
    ///
    /// # Errors
    /// `UnknownRecord` for a record name not in the table.
    pub fn validate(&self, ty: &Type, line: usize) -> CheckResult<()> {
        match ty {
            Type::Int | Type::Bool | Type::Unit | Type::String => Ok(()),
            Type::Arrow(from, to) => {
                self.validate(from, line)?;
                self.validate(to, line)
            },
            Type::Array(elem) => self.validate(elem, line),
            Type::Record(name) => {
                if self.get(name).is_some() {
                    Ok(())
                } else {
                    Err(TypeError::UnknownRecord { name: name.clone(),
                                                   line })
                }
            },
        }
    }

    /// Resolves an anonymous record literal against the table by its
    /// exact, ordered field-name list.
    ///
    /// # Errors
    /// When no declaration matches exactly, the most specific error is
    /// chosen: a declaration with the same names in a different order is
    /// a `RecordFieldMismatch`, one that merely shares the literal's
    /// first field name an `ArityMismatch` or `RecordFieldMismatch`
    /// depending on the field count, and otherwise the literal is an
    /// `UnknownRecord`.
    pub fn resolve(&self, fields: &[(String, Expr)], line: usize) -> CheckResult<&RecordDecl> {
        if let Some(decl) = self.decls.iter().find(|decl| {
            decl.fields.len() == fields.len()
            && decl.fields
                   .iter()
                   .zip(fields)
                   .all(|(declared, (name, _))| declared.name == *name)
        }) {
            return Ok(decl);
        }

        // Same names, wrong order.
        if let Some(decl) = self.decls.iter().find(|decl| {
            decl.fields.len() == fields.len()
            && fields.iter()
                     .all(|(name, _)| decl.fields.iter().any(|f| f.name == *name))
        }) {
            let (field, _) = fields.iter()
                                   .enumerate()
                                   .find(|(i, (name, _))| decl.fields[*i].name != *name)
                                   .map(|(_, f)| f)
                                   .unwrap_or(&fields[0]);
            return Err(TypeError::RecordFieldMismatch { record: decl.name.clone(),
                                                        field:  field.clone(),
                                                        line });
        }

        // A declaration that shares the leading field name is the likely
        // intent; report against it.
        if let Some((first, _)) = fields.first()
           && let Some(decl) = self.decls
                                   .iter()
                                   .find(|decl| decl.fields.iter().any(|f| f.name == *first))
        {
            if decl.fields.len() == fields.len() {
                let (field, _) = fields.iter()
                                       .find(|(name, _)| {
                                           !decl.fields.iter().any(|f| f.name == *name)
                                       })
                                       .unwrap_or(&fields[0]);
                return Err(TypeError::RecordFieldMismatch { record: decl.name.clone(),
                                                            field:  field.clone(),
                                                            line });
            }
            return Err(TypeError::ArityMismatch { record:   decl.name.clone(),
                                                  expected: decl.fields.len(),
                                                  found:    fields.len(),
                                                  line });
        }

        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        Err(TypeError::UnknownRecord { name: format!("{{{}}}", names.join("; ")),
                                       line })
    }
}

impl Checker {
    /// Checks a record literal.
    ///
    /// The literal is resolved against the declaration table by its
    /// exact field list; each field value must then have its declared
    /// type. The literal's type is the declared record name.
    pub fn check_record_literal(&mut self,
                                fields: &[(String, Expr)],
                                line: usize)
                                -> CheckResult<Type> {
        let decl = self.records.resolve(fields, line)?;
        let name = decl.name.clone();
        let declared: Vec<Type> = decl.fields.iter().map(|f| f.ty.clone()).collect();

        for ((_, value), field_ty) in fields.iter().zip(&declared) {
            let value_ty = self.check(value)?;
            if value_ty != *field_ty {
                return Err(TypeError::TypeMismatch { expected: field_ty.clone(),
                                                     actual: value_ty,
                                                     line });
            }
        }

        Ok(Type::Record(name))
    }

    /// Checks a field read: the expression must be a declared record
    /// containing the field; the result is the declared field type.
    pub fn check_field_access(&mut self,
                              record: &Expr,
                              field: &str,
                              line: usize)
                              -> CheckResult<Type> {
        self.field_of(record, field, line)
    }

    /// Checks a field write: the field must additionally be declared
    /// `mutable` and the stored value must have its declared type; the
    /// result is `unit`.
    pub fn check_field_assign(&mut self,
                              record: &Expr,
                              field: &str,
                              value: &Expr,
                              line: usize)
                              -> CheckResult<Type> {
        let name = match self.check(record)? {
            Type::Record(name) => name,
            actual => {
                return Err(TypeError::TypeMismatch { expected:
                                                         Type::Record("record".to_string()),
                                                     actual,
                                                     line });
            },
        };

        let Some(decl) = self.records.get(&name) else {
            return Err(TypeError::UnknownRecord { name, line });
        };
        let Some(field_decl) = decl.fields.iter().find(|f| f.name == field) else {
            return Err(TypeError::RecordFieldMismatch { record: name,
                                                        field: field.to_string(),
                                                        line });
        };

        if !field_decl.mutable {
            return Err(TypeError::NotMutable { name: field.to_string(),
                                               line });
        }
        let field_ty = field_decl.ty.clone();

        let value_ty = self.check(value)?;
        if value_ty != field_ty {
            return Err(TypeError::TypeMismatch { expected: field_ty,
                                                 actual: value_ty,
                                                 line });
        }

        Ok(Type::Unit)
    }

    /// Checks that an expression is a record containing `field` and
    /// returns the field's declared type.
    fn field_of(&mut self, record: &Expr, field: &str, line: usize) -> CheckResult<Type> {
        let name = match self.check(record)? {
            Type::Record(name) => name,
            actual => {
                return Err(TypeError::TypeMismatch { expected:
                                                         Type::Record("record".to_string()),
                                                     actual,
                                                     line });
            },
        };

        let Some(decl) = self.records.get(&name) else {
            return Err(TypeError::UnknownRecord { name, line });
        };

        match decl.fields.iter().find(|f| f.name == field) {
            Some(field_decl) => Ok(field_decl.ty.clone()),
            None => Err(TypeError::RecordFieldMismatch { record: name,
                                                         field: field.to_string(),
                                                         line }),
        }
    }
}
