use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StorageError;

use super::models::NameRecord;

#[derive(Debug, Clone)]
pub struct NameStore {
    pool: SqlitePool,
}

impl NameStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, name: &str) -> Result<i64, StorageError> {
        let result = sqlx::query("INSERT INTO users (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;
        let id = result.last_insert_rowid();
        debug!(id, "Stored name");
        Ok(id)
    }

    /// All names in insertion order.
    pub async fn list_all(&self) -> Result<Vec<NameRecord>, StorageError> {
        sqlx::query_as::<_, NameRecord>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)
    }
}
