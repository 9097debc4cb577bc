pub mod error;
pub mod queries;

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use error::{StoreError, StoreResult};
pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

pub async fn establish_connection(url: &str, max_connections: u32) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Single-connection in-memory database with the schema applied.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool is capped at one.
pub async fn in_memory() -> anyhow::Result<SqlitePool> {
    let pool = establish_connection("sqlite::memory:", 1).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
