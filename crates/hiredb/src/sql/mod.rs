//! Dynamic statement compilation.
//!
//! Two compilers turn structured caller input into parameterized SQL
//! fragments:
//!
//! - [`partial_update`] compiles a [`FieldMap`] into a `SET` clause list
//! - [`FilterBuilder`] folds optional search criteria into a `WHERE` clause
//!
//! Both produce a [`CompiledClause`]: the fragment text with `$1..$N`
//! placeholders and the value list those placeholders bind to. Caller data
//! only ever travels through the value list.

mod filter;
mod update;

#[cfg(test)]
mod tests;

pub use filter::FilterBuilder;
pub use update::{ColumnMap, FieldMap, partial_update};

use tokio_postgres::types::ToSql;

/// A parameterized SQL fragment paired with its positional value list.
///
/// Placeholder `$i` in the fragment always corresponds to the `i`-th value;
/// the two are produced together and must never be reordered independently.
pub struct CompiledClause {
    sql: String,
    params: Vec<Box<dyn ToSql + Sync + Send>>,
}

impl std::fmt::Debug for CompiledClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledClause")
            .field("sql", &self.sql)
            .field("param_count", &self.params.len())
            .finish()
    }
}

impl CompiledClause {
    pub(crate) fn new(sql: String, params: Vec<Box<dyn ToSql + Sync + Send>>) -> Self {
        Self { sql, params }
    }

    /// The clause text, with `$1..$N` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// True when no conditions were bound at all.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of bound values.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Get parameter references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|v| &**v as &(dyn ToSql + Sync))
            .collect()
    }
}
