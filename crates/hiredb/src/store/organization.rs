//! Organization records and store operations.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, CompiledClause, FieldMap, FilterBuilder, partial_update};
use crate::store::position::PositionSummary;

/// Columns fetched for every organization row.
const ORGANIZATION_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Caller-facing field names whose storage columns differ.
const ORGANIZATION_RENAMES: ColumnMap = ColumnMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// An organization. The handle is its key and is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Organization {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// An organization together with its open positions, ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDetail {
    #[serde(flatten)]
    pub organization: Organization,
    pub positions: Vec<PositionSummary>,
}

/// Input for [`create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewOrganization {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Partial update for an organization. The handle is not updatable; the
/// updatable set is closed, so unknown field names never reach the update
/// compiler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl OrganizationPatch {
    fn field_map(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields
            .set_opt("name", self.name.clone())
            .set_opt("description", self.description.clone())
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url.clone());
        fields
    }
}

/// Optional search criteria for [`list`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrganizationFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl OrganizationFilter {
    /// Compile the present criteria into a `WHERE` fragment.
    ///
    /// The employee range is validated before any placeholder is allocated.
    pub fn compile(&self) -> StoreResult<CompiledClause> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(StoreError::invalid_input(
                    "minEmployees cannot exceed maxEmployees",
                ));
            }
        }

        let mut filter = FilterBuilder::new();
        filter.and_eq_opt("name", self.name.clone());
        filter.and_gt_opt("num_employees", self.min_employees);
        filter.and_lt_opt("num_employees", self.max_employees);
        Ok(filter.build())
    }
}

fn update_statement(patch: &OrganizationPatch) -> StoreResult<(String, CompiledClause)> {
    let clause = partial_update(patch.field_map(), &ORGANIZATION_RENAMES)?;
    let sql = format!(
        "UPDATE organizations SET {} WHERE handle = ${} RETURNING {ORGANIZATION_COLUMNS}",
        clause.sql(),
        clause.param_count() + 1,
    );
    Ok((sql, clause))
}

fn list_statement(filter: &OrganizationFilter) -> StoreResult<(String, CompiledClause)> {
    let clause = filter.compile()?;
    let mut sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations");
    if !clause.is_empty() {
        sql.push(' ');
        sql.push_str(clause.sql());
    }
    sql.push_str(" ORDER BY name");
    Ok((sql, clause))
}

/// Create an organization. Fails with [`StoreError::DuplicateKey`] when the
/// handle is already taken; the pre-check is the friendly fast path, the
/// UNIQUE constraint the actual guarantee.
pub async fn create(
    client: &impl GenericClient,
    new: &NewOrganization,
) -> StoreResult<Organization> {
    let duplicate = client
        .query_opt(
            "SELECT handle FROM organizations WHERE handle = $1",
            &[&new.handle],
        )
        .await?;
    if duplicate.is_some() {
        return Err(StoreError::duplicate_key(format!(
            "organization already exists: {}",
            new.handle
        )));
    }

    let sql = format!(
        "INSERT INTO organizations (handle, name, description, num_employees, logo_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {ORGANIZATION_COLUMNS}"
    );
    tracing::debug!(target: "hiredb::organization", sql = %sql, "create");
    let row = client
        .query_one(
            &sql,
            &[
                &new.handle,
                &new.name,
                &new.description,
                &new.num_employees,
                &new.logo_url,
            ],
        )
        .await?;
    Organization::from_row(&row)
}

/// Fetch an organization by handle, with its positions nested.
pub async fn get(client: &impl GenericClient, handle: &str) -> StoreResult<OrganizationDetail> {
    let sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE handle = $1");
    let row = client
        .query_opt(&sql, &[&handle])
        .await?
        .ok_or_else(|| StoreError::not_found(format!("no organization: {handle}")))?;
    let organization = Organization::from_row(&row)?;

    let rows = client
        .query(
            "SELECT id, title, salary, equity FROM positions \
             WHERE organization_handle = $1 ORDER BY id",
            &[&handle],
        )
        .await?;
    let positions = rows
        .iter()
        .map(PositionSummary::from_row)
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(OrganizationDetail {
        organization,
        positions,
    })
}

/// Apply a partial update and return the updated row.
pub async fn update(
    client: &impl GenericClient,
    handle: &str,
    patch: &OrganizationPatch,
) -> StoreResult<Organization> {
    let (sql, clause) = update_statement(patch)?;
    let mut params = clause.params_ref();
    params.push(&handle);
    tracing::debug!(target: "hiredb::organization", sql = %sql, "update");
    let row = client
        .query_opt(&sql, &params)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("no organization: {handle}")))?;
    Organization::from_row(&row)
}

/// Delete an organization by handle.
pub async fn remove(client: &impl GenericClient, handle: &str) -> StoreResult<()> {
    let row = client
        .query_opt(
            "DELETE FROM organizations WHERE handle = $1 RETURNING handle",
            &[&handle],
        )
        .await?;
    if row.is_none() {
        return Err(StoreError::not_found(format!("no organization: {handle}")));
    }
    Ok(())
}

/// List organizations matching the filter, ordered by name.
pub async fn list(
    client: &impl GenericClient,
    filter: &OrganizationFilter,
) -> StoreResult<Vec<Organization>> {
    let (sql, clause) = list_statement(filter)?;
    tracing::debug!(target: "hiredb::organization", sql = %sql, "list");
    let rows = client.query(&sql, &clause.params_ref()).await?;
    rows.iter().map(Organization::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_inverted_range_rejected() {
        let filter = OrganizationFilter {
            min_employees: Some(50),
            max_employees: Some(10),
            ..Default::default()
        };
        let err = filter.compile().unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_filter_equal_bounds_allowed() {
        let filter = OrganizationFilter {
            min_employees: Some(10),
            max_employees: Some(10),
            ..Default::default()
        };
        let clause = filter.compile().unwrap();
        assert_eq!(
            clause.sql(),
            "WHERE num_employees > $1 AND num_employees < $2"
        );
        assert_eq!(clause.param_count(), 2);
    }

    #[test]
    fn test_filter_all_criteria() {
        let filter = OrganizationFilter {
            name: Some("Acme".to_string()),
            min_employees: Some(50),
            max_employees: Some(500),
        };
        let clause = filter.compile().unwrap();
        assert_eq!(
            clause.sql(),
            "WHERE name = $1 AND num_employees > $2 AND num_employees < $3"
        );
        assert_eq!(clause.param_count(), 3);
    }

    #[test]
    fn test_filter_subset_renumbers_from_one() {
        let filter = OrganizationFilter {
            max_employees: Some(500),
            ..Default::default()
        };
        let clause = filter.compile().unwrap();
        assert_eq!(clause.sql(), "WHERE num_employees < $1");
        assert_eq!(clause.param_count(), 1);
    }

    #[test]
    fn test_filter_empty_produces_no_clause() {
        let clause = OrganizationFilter::default().compile().unwrap();
        assert!(clause.is_empty());
        assert_eq!(clause.param_count(), 0);
    }

    #[test]
    fn test_list_statement_appends_order_after_where() {
        let filter = OrganizationFilter {
            name: Some("Acme".to_string()),
            ..Default::default()
        };
        let (sql, clause) = list_statement(&filter).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url \
             FROM organizations WHERE name = $1 ORDER BY name"
        );
        assert_eq!(clause.param_count(), 1);
    }

    #[test]
    fn test_update_statement_translates_renamed_fields() {
        let patch = OrganizationPatch {
            num_employees: Some(120),
            logo_url: Some("https://acme.test/logo.png".to_string()),
            ..Default::default()
        };
        let (sql, clause) = update_statement(&patch).unwrap();
        assert_eq!(
            sql,
            "UPDATE organizations SET \"num_employees\"=$1, \"logo_url\"=$2 \
             WHERE handle = $3 \
             RETURNING handle, name, description, num_employees, logo_url"
        );
        assert_eq!(clause.param_count(), 2);
    }

    #[test]
    fn test_update_statement_empty_patch_rejected() {
        let err = update_statement(&OrganizationPatch::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
