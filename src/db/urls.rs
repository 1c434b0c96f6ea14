use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::error::{is_unique_violation, StorageError};

use super::models::UrlMapping;

/// Short code to long URL mappings. Rows are only ever inserted.
#[derive(Debug, Clone)]
pub struct UrlStore {
    pool: SqlitePool,
}

impl UrlStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a mapping. An existing `short_code` is never overwritten; the
    /// insert fails with [`StorageError::Conflict`] instead.
    #[instrument(skip(self))]
    pub async fn save(&self, short_code: &str, long_url: &str) -> Result<(), StorageError> {
        let result = sqlx::query("INSERT INTO urls (short_code, long_url) VALUES (?, ?)")
            .bind(short_code)
            .bind(long_url)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(short_code = %short_code, "Stored url mapping");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(short_code.to_string()))
            }
            Err(err) => Err(StorageError::from_sqlx(err)),
        }
    }

    /// Returns the long URL for `short_code`. An unknown code is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn lookup(&self, short_code: &str) -> Result<Option<String>, StorageError> {
        sqlx::query_scalar("SELECT long_url FROM urls WHERE short_code = ?")
            .bind(short_code)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)
    }

    pub async fn find(&self, short_code: &str) -> Result<Option<UrlMapping>, StorageError> {
        sqlx::query_as::<_, UrlMapping>(
            "SELECT short_code, long_url FROM urls WHERE short_code = ?",
        )
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::from_sqlx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn save_then_lookup_round_trips() {
        let store = UrlStore::new(memory_pool().await);
        store.save("aB3xY9", "http://example.com/path").await.unwrap();

        let found = store.lookup("aB3xY9").await.unwrap();
        assert_eq!(found.as_deref(), Some("http://example.com/path"));
    }

    #[tokio::test]
    async fn lookup_unknown_code_is_none() {
        let store = UrlStore::new(memory_pool().await);
        assert_eq!(store.lookup("nope00").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_code_conflicts_and_keeps_first() {
        let store = UrlStore::new(memory_pool().await);
        store.save("dup123", "http://first.com").await.unwrap();

        let err = store.save("dup123", "http://second.com").await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(ref code) if code == "dup123"));

        assert_eq!(
            store.lookup("dup123").await.unwrap().as_deref(),
            Some("http://first.com")
        );
    }

    #[tokio::test]
    async fn codes_are_case_sensitive() {
        let store = UrlStore::new(memory_pool().await);
        store.save("abcdef", "http://lower.com").await.unwrap();
        store.save("ABCDEF", "http://upper.com").await.unwrap();

        assert_eq!(
            store.lookup("ABCDEF").await.unwrap().as_deref(),
            Some("http://upper.com")
        );
    }

    #[tokio::test]
    async fn find_returns_full_mapping() {
        let store = UrlStore::new(memory_pool().await);
        store.save("find01", "https://rust-lang.org").await.unwrap();

        let mapping = store.find("find01").await.unwrap().unwrap();
        assert_eq!(
            mapping,
            UrlMapping {
                short_code: "find01".into(),
                long_url: "https://rust-lang.org".into(),
            }
        );
        assert!(store.find("none01").await.unwrap().is_none());
    }
}
