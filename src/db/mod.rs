//! SQLite persistence: pool setup, schema creation and the two record stores.

pub mod models;
pub mod urls;
pub mod users;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::StorageError;

pub use urls::UrlStore;
pub use users::NameStore;

/// Opens a connection pool. Every store call checks one connection out for a
/// single statement and hands it back when the call returns.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(StorageError::from_sqlx)?;
    info!(database_url = %database_url, max_connections, "Connected to database");
    Ok(pool)
}

/// Creates both tables if they are missing. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS urls (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            short_code TEXT UNIQUE,
            long_url TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(StorageError::from_sqlx)?;

    sqlx::query("CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT)")
        .execute(pool)
        .await
        .map_err(StorageError::from_sqlx)?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    // one connection, otherwise each checkout would see a fresh in-memory db
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
