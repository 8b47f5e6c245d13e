use super::DocumentStore;
use crate::db::DbPool;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::Row;
use tracing::debug;

/// Documents kept in the `documents` table, one `collection` value per
/// logical collection.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, collection: &str) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>> {
        let rows = sqlx::query(
            r#"
            SELECT doc::text AS doc
            FROM documents
            WHERE collection = $1
            ORDER BY id
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        let docs = rows
            .iter()
            .map(|row| serde_json::from_str::<Value>(row.get::<&str, _>("doc")))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(collection, count = docs.len(), "loaded documents");
        Ok(docs)
    }

    async fn replace_all(&self, collection: &str, docs: &[Value]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Refreshes of one collection queue here until the holder commits,
        // so the later writer's DELETE sees the earlier writer's rows.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        if !docs.is_empty() {
            let encoded = docs
                .iter()
                .map(serde_json::to_string)
                .collect::<std::result::Result<Vec<_>, _>>()?;

            // One statement for the whole set; ordinality keeps the ids in
            // the order of `docs`.
            sqlx::query(
                r#"
                INSERT INTO documents (collection, doc)
                SELECT $1, d.doc::json
                FROM UNNEST($2::text[]) WITH ORDINALITY AS d(doc, ord)
                ORDER BY d.ord
                "#,
            )
            .bind(collection)
            .bind(encoded)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(collection, count = docs.len(), "replaced collection");
        Ok(())
    }
}
