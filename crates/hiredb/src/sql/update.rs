//! Partial-update compilation.

use super::CompiledClause;
use crate::error::{StoreError, StoreResult};
use crate::ident;
use tokio_postgres::types::ToSql;

/// An ordered set of (field name, new value) pairs describing a partial
/// update. Insertion order is preserved into the compiled clause and its
/// value list.
#[derive(Default)]
pub struct FieldMap {
    fields: Vec<(String, Box<dyn ToSql + Sync + Send>)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn set<T>(&mut self, field: &str, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.fields.push((field.to_string(), Box::new(value)));
        self
    }

    /// Set an optional field (None => skip).
    pub fn set_opt<T>(&mut self, field: &str, value: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = value {
            self.set(field, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Maps caller-facing field names to storage column names.
///
/// A field absent from the table keeps its own name as the column name.
pub struct ColumnMap {
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// A table with no renames: every field passes through unchanged.
    pub const fn empty() -> Self {
        Self::new(&[])
    }

    /// Resolve the storage column for a field name.
    pub fn column_for<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, col)| *col)
            .unwrap_or(field)
    }
}

/// Compile a partial update into a `SET` clause list and its value list.
///
/// The `i`-th field (0-based) is rendered as `"<column>"=$<i+1>`, fragments
/// joined by `", "`, with the column resolved through `columns` and quoted.
/// Values land in the same order, so the clause can be spliced into an
/// `UPDATE ... SET` statement and executed with
/// [`params_ref`](CompiledClause::params_ref) as-is.
///
/// An empty map is a caller error, not a silent no-op.
pub fn partial_update(fields: FieldMap, columns: &ColumnMap) -> StoreResult<CompiledClause> {
    if fields.is_empty() {
        return Err(StoreError::invalid_input("no data to update"));
    }

    let mut set_cols = Vec::with_capacity(fields.fields.len());
    let mut params = Vec::with_capacity(fields.fields.len());
    for (idx, (field, value)) in fields.fields.into_iter().enumerate() {
        let column = columns.column_for(&field);
        set_cols.push(format!("{}=${}", ident::quote(column), idx + 1));
        params.push(value);
    }

    Ok(CompiledClause::new(set_cols.join(", "), params))
}
