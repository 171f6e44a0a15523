//! Position records and store operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, CompiledClause, FieldMap, FilterBuilder, partial_update};

/// Columns fetched for every position row.
const POSITION_COLUMNS: &str = "id, title, salary, equity, organization_handle";

/// Updatable position fields all match their storage columns.
const POSITION_RENAMES: ColumnMap = ColumnMap::empty();

/// An open position at an organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub organization_handle: String,
}

impl FromRow for Position {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            organization_handle: row.try_get_column("organization_handle")?,
        })
    }
}

/// The shape nested under an organization: the owner column is implied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for PositionSummary {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

/// Input for [`create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPosition {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub organization_handle: String,
}

/// Partial update for a position. Only the fields that are set change;
/// the updatable set is closed, so unknown field names never reach the
/// update compiler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PositionPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl PositionPatch {
    fn field_map(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields
            .set_opt("title", self.title.clone())
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity);
        fields
    }
}

/// Optional search criteria for [`list`]. Every key is optional; a false
/// `has_equity` contributes nothing, same as an absent one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PositionFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    #[serde(default)]
    pub has_equity: bool,
}

impl PositionFilter {
    /// Compile the present criteria into a `WHERE` fragment.
    pub fn compile(&self) -> StoreResult<CompiledClause> {
        let mut filter = FilterBuilder::new();
        filter.and_eq_opt("title", self.title.clone());
        filter.and_gt_opt("salary", self.min_salary);
        if self.has_equity {
            filter.and_literal("equity > 0");
        }
        Ok(filter.build())
    }
}

fn update_statement(patch: &PositionPatch) -> StoreResult<(String, CompiledClause)> {
    let clause = partial_update(patch.field_map(), &POSITION_RENAMES)?;
    let sql = format!(
        "UPDATE positions SET {} WHERE id = ${} RETURNING {POSITION_COLUMNS}",
        clause.sql(),
        clause.param_count() + 1,
    );
    Ok((sql, clause))
}

fn list_statement(filter: &PositionFilter) -> StoreResult<(String, CompiledClause)> {
    let clause = filter.compile()?;
    let mut sql = format!("SELECT {POSITION_COLUMNS} FROM positions");
    if !clause.is_empty() {
        sql.push(' ');
        sql.push_str(clause.sql());
    }
    sql.push_str(" ORDER BY title");
    Ok((sql, clause))
}

/// Create a position. Fails with [`StoreError::DuplicateKey`] when the title
/// is already taken; the pre-check is the friendly fast path, the UNIQUE
/// constraint the actual guarantee.
pub async fn create(client: &impl GenericClient, new: &NewPosition) -> StoreResult<Position> {
    let duplicate = client
        .query_opt("SELECT title FROM positions WHERE title = $1", &[&new.title])
        .await?;
    if duplicate.is_some() {
        return Err(StoreError::duplicate_key(format!(
            "position already exists: {}",
            new.title
        )));
    }

    let sql = format!(
        "INSERT INTO positions (title, salary, equity, organization_handle) \
         VALUES ($1, $2, $3, $4) RETURNING {POSITION_COLUMNS}"
    );
    tracing::debug!(target: "hiredb::position", sql = %sql, "create");
    let row = client
        .query_one(
            &sql,
            &[&new.title, &new.salary, &new.equity, &new.organization_handle],
        )
        .await?;
    Position::from_row(&row)
}

/// Fetch a position by id.
pub async fn get(client: &impl GenericClient, id: i32) -> StoreResult<Position> {
    let sql = format!("SELECT {POSITION_COLUMNS} FROM positions WHERE id = $1");
    let row = client
        .query_opt(&sql, &[&id])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("no position: {id}")))?;
    Position::from_row(&row)
}

/// Apply a partial update and return the updated row.
pub async fn update(
    client: &impl GenericClient,
    id: i32,
    patch: &PositionPatch,
) -> StoreResult<Position> {
    let (sql, clause) = update_statement(patch)?;
    let mut params = clause.params_ref();
    params.push(&id);
    tracing::debug!(target: "hiredb::position", sql = %sql, "update");
    let row = client
        .query_opt(&sql, &params)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("no position: {id}")))?;
    Position::from_row(&row)
}

/// Delete a position by id.
pub async fn remove(client: &impl GenericClient, id: i32) -> StoreResult<()> {
    let row = client
        .query_opt("DELETE FROM positions WHERE id = $1 RETURNING id", &[&id])
        .await?;
    if row.is_none() {
        return Err(StoreError::not_found(format!("no position: {id}")));
    }
    Ok(())
}

/// List positions matching the filter, ordered by title.
pub async fn list(
    client: &impl GenericClient,
    filter: &PositionFilter,
) -> StoreResult<Vec<Position>> {
    let (sql, clause) = list_statement(filter)?;
    tracing::debug!(target: "hiredb::position", sql = %sql, "list");
    let rows = client.query(&sql, &clause.params_ref()).await?;
    rows.iter().map(Position::from_row).collect()
}
