//! # hiredb
//!
//! A PostgreSQL data-access layer for organizations and their open positions.
//!
//! ## Features
//!
//! - **Dynamic statements, static templates**: partial updates and filtered
//!   searches are compiled from structured input; everything else is a fixed
//!   statement
//! - **Parameterized always**: caller values travel as bind parameters, never
//!   in query text
//! - **Transaction-friendly**: pass a transaction anywhere a [`GenericClient`]
//!   is expected
//! - **Type-safe mapping**: Row → struct via the [`FromRow`] trait
//!
//! ## Example
//!
//! ```ignore
//! use hiredb::store::organization;
//! use hiredb::{OrganizationFilter, OrganizationPatch};
//!
//! let pool = hiredb::create_pool("postgres://localhost/hiredb")?;
//! let client = pool.get().await?;
//!
//! // Filtered search: only the criteria that are present are bound.
//! let filter = OrganizationFilter {
//!     min_employees: Some(50),
//!     ..Default::default()
//! };
//! let orgs = organization::list(&client, &filter).await?;
//!
//! // Partial update: only the fields that are set change.
//! let patch = OrganizationPatch {
//!     description: Some("Widgets, but better".to_string()),
//!     ..Default::default()
//! };
//! let org = organization::update(&client, "acme", &patch).await?;
//! ```

pub mod client;
pub mod error;
pub mod ident;
pub mod row;
pub mod sql;
pub mod store;

pub use client::GenericClient;
pub use error::{StoreError, StoreResult};
pub use row::{FromRow, RowExt};
pub use sql::{ColumnMap, CompiledClause, FieldMap, FilterBuilder, partial_update};
pub use store::organization::{
    NewOrganization, Organization, OrganizationDetail, OrganizationFilter, OrganizationPatch,
};
pub use store::position::{
    NewPosition, Position, PositionFilter, PositionPatch, PositionSummary,
};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "migrate")]
pub mod migrate;
