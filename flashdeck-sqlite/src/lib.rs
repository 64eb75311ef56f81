use flashdeck_core::{repo::DocumentStore, Card, CardId, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::path::Path;

/// Documents kept as JSON text, one table for every collection.
///
/// `seq` is the natural iteration order; `card_id` mirrors the integer `_id`
/// when the document has one.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .map_err(|e| StoreError::Unavailable(format!("sqlite connect: {e}")))?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Private in-memory database. A single connection, since every
    /// connection would otherwise see its own empty database.
    pub async fn open_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::Unavailable(format!("sqlite connect: {e}")))?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        const STMT: &str = r#"
        CREATE TABLE IF NOT EXISTS documents (
          seq         INTEGER PRIMARY KEY AUTOINCREMENT,
          collection  TEXT    NOT NULL,
          card_id     INTEGER,
          body        TEXT    NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_collection_card ON documents (collection, card_id);
        "#;

        // Execute statements one by one for compatibility.
        for chunk in STMT.split(';') {
            let sql = chunk.trim();
            if sql.is_empty() {
                continue;
            }
            sqlx::query(sql)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Unavailable(format!("sqlite schema: {e}")))?;
        }
        Ok(())
    }

    /// Appends a document to `collection`. The service itself never writes;
    /// this is how a database gets populated.
    pub async fn insert(&self, collection: &str, card: &Card) -> Result<(), StoreError> {
        let body = serde_json::to_string(card)
            .map_err(|e| StoreError::InvalidData(format!("encode document: {e}")))?;
        sqlx::query("INSERT INTO documents (collection, card_id, body) VALUES (?,?,?)")
            .bind(collection)
            .bind(card.id())
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| query_err("insert document", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for SqliteStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("sqlite ping: {e}")))?;
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE collection=?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_err("count documents", e))?;
        Ok(n.max(0) as u64)
    }

    async fn find_at(&self, collection: &str, skip: u64) -> Result<Option<Card>, StoreError> {
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);
        let row = sqlx::query(
            "SELECT body FROM documents WHERE collection=? ORDER BY seq ASC LIMIT 1 OFFSET ?",
        )
        .bind(collection)
        .bind(skip)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_err("read document", e))?;
        row.map(row_into_card).transpose()
    }

    async fn find_next(
        &self,
        collection: &str,
        after: CardId,
    ) -> Result<Option<Card>, StoreError> {
        let row = sqlx::query(
            r#"SELECT body FROM documents
               WHERE collection=? AND card_id > ?
               ORDER BY card_id ASC, seq ASC LIMIT 1"#,
        )
        .bind(collection)
        .bind(after)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_err("read next document", e))?;
        row.map(row_into_card).transpose()
    }

    async fn find_first(&self, collection: &str) -> Result<Option<Card>, StoreError> {
        let row = sqlx::query(
            r#"SELECT body FROM documents
               WHERE collection=?
               ORDER BY card_id IS NULL, card_id ASC, seq ASC LIMIT 1"#,
        )
        .bind(collection)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_err("read first document", e))?;
        row.map(row_into_card).transpose()
    }
}

// ===== Helpers =====
fn query_err(what: &str, e: sqlx::Error) -> StoreError {
    StoreError::Query(format!("{what}: {e}"))
}

fn row_into_card(row: SqliteRow) -> Result<Card, StoreError> {
    let body: String = row.get("body");
    let value: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| StoreError::InvalidData(format!("decode document: {e}")))?;
    Card::try_from(value)
}
