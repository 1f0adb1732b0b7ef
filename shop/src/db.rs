// shop/src/db.rs

//! SQLite pool construction and schema migrations.

use crate::errors::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

/// Opens (creating if needed) the database at `database_url` with foreign keys enforced.
#[instrument(name = "db::connect", skip_all, fields(database_url = %database_url))]
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true);
  let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;
  info!("Connected to the database.");
  Ok(pool)
}

/// A private in-memory database on a single, never-recycled connection.
pub async fn connect_in_memory() -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await?;
  Ok(pool)
}

/// Applies every pending migration under `shop/migrations`.
#[instrument(name = "db::migrate", skip_all)]
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("Database schema is up to date.");
  Ok(())
}
