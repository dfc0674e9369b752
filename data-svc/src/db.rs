//! Startup work against PostgreSQL: readiness wait, migrations, schema check.

use std::fmt::Display;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use diesel::pg::PgConnection;
use diesel::sql_types::{BigInt, Bool, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, sql_query};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Tables every service relies on.
pub const EXPECTED_TABLES: [&str; 6] = [
    "users",
    "model_versions",
    "assessments",
    "reports",
    "auth_sessions",
    "audit_logs",
];

#[derive(QueryableByName)]
struct TableExists {
    #[diesel(sql_type = Bool)]
    present: bool,
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Runs `op` until it succeeds, at most `attempts` times, sleeping
/// `interval` between failures.
pub async fn retry<T, E, F>(attempts: u32, interval: Duration, mut op: F) -> Result<T>
where
    E: Display,
    F: FnMut() -> std::result::Result<T, E>,
{
    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::info!("PostgreSQL not ready yet (attempt {attempt}/{attempts}): {e}");
                if attempt < attempts {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    anyhow::bail!("gave up after {attempts} attempts")
}

/// Opens a connection and checks it with `SELECT 1`.
pub fn connect(database_url: &str) -> Result<PgConnection> {
    let mut conn = PgConnection::establish(database_url)?;
    sql_query("SELECT 1").execute(&mut conn)?;
    Ok(conn)
}

pub async fn wait_for_db(
    database_url: &str,
    attempts: u32,
    interval: Duration,
) -> Result<PgConnection> {
    tracing::info!("Waiting for PostgreSQL to be ready...");
    let conn = retry(attempts, interval, || connect(database_url))
        .await
        .context("Timeout waiting for PostgreSQL")?;
    tracing::info!("PostgreSQL is ready!");
    Ok(conn)
}

/// Applies pending migrations; already applied ones are skipped.
pub fn run_migrations(conn: &mut PgConnection) -> Result<()> {
    tracing::info!("Running database migrations...");

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))
        .context("Failed to run migrations")?;

    if applied.is_empty() {
        tracing::info!("✅ Schema already up to date");
    }
    for version in applied {
        tracing::info!("✅ Applied migration {version}");
    }

    Ok(())
}

pub fn verify_schema(conn: &mut PgConnection) -> Result<()> {
    tracing::info!("Verifying database schema...");

    for table in EXPECTED_TABLES {
        let exists = sql_query(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            ) AS present",
        )
        .bind::<Text, _>(table)
        .get_result::<TableExists>(conn)
        .with_context(|| format!("Failed to check table {table}"))?;

        if !exists.present {
            anyhow::bail!("Table {table} does not exist");
        }
        tracing::info!("  ✓ Table '{table}' exists");
    }

    let users = count_rows(conn, "users")?;
    let models = count_rows(conn, "model_versions")?;
    tracing::info!("  ✓ Found {users} users and {models} model versions");

    Ok(())
}

/// `table` must be one of [`EXPECTED_TABLES`]; it is spliced into the query.
fn count_rows(conn: &mut PgConnection, table: &str) -> Result<i64> {
    debug_assert!(EXPECTED_TABLES.contains(&table));

    sql_query(format!("SELECT COUNT(*) AS count FROM {table}"))
        .get_result::<RowCount>(conn)
        .map(|row| row.count)
        .with_context(|| format!("Failed to count {table}"))
}
