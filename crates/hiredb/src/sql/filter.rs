//! Filtered-search compilation.

use super::CompiledClause;
use tokio_postgres::types::ToSql;

/// Accumulator for optional search criteria.
///
/// Criteria are appended in the resource's fixed order; each binding
/// condition takes the next placeholder number, while literal conditions
/// consume none. [`build`](FilterBuilder::build) joins everything with
/// `AND` under a `WHERE` prefix, or yields the empty clause when nothing
/// was bound.
pub struct FilterBuilder {
    /// Conditions (without leading AND)
    conditions: Vec<String>,
    /// Parameter values
    params: Vec<Box<dyn ToSql + Sync + Send>>,
    /// Current parameter counter
    param_count: usize,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            params: Vec::new(),
            param_count: 0,
        }
    }

    fn add_binding<T>(&mut self, sql_template: &str, value: T)
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.param_count += 1;
        let placeholder = format!("${}", self.param_count);
        let condition = sql_template.replacen('$', &placeholder, 1);
        self.conditions.push(condition);
        self.params.push(Box::new(value));
    }

    /// Add an equality condition.
    pub fn and_eq<T>(&mut self, col: &str, val: T)
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.add_binding(&format!("{} = $", col), val);
    }

    /// Add a `>` condition.
    pub fn and_gt<T>(&mut self, col: &str, val: T)
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.add_binding(&format!("{} > $", col), val);
    }

    /// Add a `<` condition.
    pub fn and_lt<T>(&mut self, col: &str, val: T)
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.add_binding(&format!("{} < $", col), val);
    }

    /// Add a condition that binds no placeholder (flag criteria).
    pub fn and_literal(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    // ==================== Option-friendly helpers ====================

    pub fn and_eq_opt<T>(&mut self, col: &str, val: Option<T>)
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = val {
            self.and_eq(col, v);
        }
    }

    pub fn and_gt_opt<T>(&mut self, col: &str, val: Option<T>)
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = val {
            self.and_gt(col, v);
        }
    }

    pub fn and_lt_opt<T>(&mut self, col: &str, val: Option<T>)
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = val {
            self.and_lt(col, v);
        }
    }

    /// Check if any conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Build the full `WHERE ...` fragment, or the empty clause when no
    /// criteria were bound.
    pub fn build(self) -> CompiledClause {
        if self.conditions.is_empty() {
            return CompiledClause::new(String::new(), Vec::new());
        }
        CompiledClause::new(
            format!("WHERE {}", self.conditions.join(" AND ")),
            self.params,
        )
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
