//! Embedded schema migrations via [`refinery`].
//!
//! The schema lives in `migrations/` and carries the constraints the store
//! layer leans on: UNIQUE keys behind [`StoreError::DuplicateKey`] and the
//! salary/equity CHECKs.
//!
//! [`StoreError::DuplicateKey`]: crate::error::StoreError::DuplicateKey

use crate::error::StoreResult;

pub use refinery::Report;

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// Run all pending migrations on a single PostgreSQL connection.
pub async fn run(client: &mut tokio_postgres::Client) -> StoreResult<Report> {
    Ok(embedded::migrations::runner().run_async(client).await?)
}

/// Acquire a connection from a pool and run migrations on it.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool) -> StoreResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client).await
}
