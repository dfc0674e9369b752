use super::error::RepositoryError;
use super::{DbConnection, DbPool};
use anyhow::{Context, Result};
use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;

/// Builds the r2d2 pool. `build` opens the initial connections, so an
/// unreachable database fails here rather than on the first request.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    diesel::r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create database pool")
}

/// Checks a connection out of the pool for a single statement.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, RepositoryError> {
    pool.get().map_err(Into::into)
}
