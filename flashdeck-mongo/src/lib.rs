use flashdeck_core::{repo::DocumentStore, Card, CardId, StoreError};
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use tracing::debug;

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parses the URI and builds the client. The driver connects lazily, so
    /// call `ping` before serving.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Unavailable(format!("mongo connect: {e}")))?;
        debug!(database, "mongo client ready");
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(format!("mongo ping: {e}")))?;
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        self.collection(collection)
            .count_documents(doc! {})
            .await
            .map_err(|e| query_err("count documents", e))
    }

    async fn find_at(&self, collection: &str, skip: u64) -> Result<Option<Card>, StoreError> {
        let doc = self
            .collection(collection)
            .find_one(doc! {})
            .skip(skip)
            .await
            .map_err(|e| query_err("find document", e))?;
        doc.map(document_into_card).transpose()
    }

    async fn find_next(
        &self,
        collection: &str,
        after: CardId,
    ) -> Result<Option<Card>, StoreError> {
        let doc = self
            .collection(collection)
            .find_one(next_filter(after))
            .sort(ascending_id())
            .await
            .map_err(|e| query_err("find next document", e))?;
        doc.map(document_into_card).transpose()
    }

    async fn find_first(&self, collection: &str) -> Result<Option<Card>, StoreError> {
        let doc = self
            .collection(collection)
            .find_one(doc! {})
            .sort(ascending_id())
            .await
            .map_err(|e| query_err("find first document", e))?;
        doc.map(document_into_card).transpose()
    }
}

// ===== Helpers =====
fn query_err(what: &str, e: mongodb::error::Error) -> StoreError {
    StoreError::Query(format!("{what}: {e}"))
}

fn next_filter(after: CardId) -> Document {
    doc! { "_id": { "$gt": after } }
}

fn ascending_id() -> Document {
    doc! { "_id": 1 }
}

/// BSON to JSON via relaxed extended JSON: plain numbers stay plain, other
/// BSON types (ObjectId, dates) keep their `$`-tagged form.
fn document_into_card(doc: Document) -> Result<Card, StoreError> {
    Card::try_from(Bson::Document(doc).into_relaxed_extjson())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn integer_ids_survive_conversion() {
        let card = document_into_card(doc! { "_id": 7_i32, "question": "q", "deck": "x" }).unwrap();
        assert_eq!(card.id(), Some(7));
        assert_eq!(card.get("question"), Some(&json!("q")));

        let card = document_into_card(doc! { "_id": 9_i64 }).unwrap();
        assert_eq!(card.id(), Some(9));
    }

    #[test]
    fn field_order_is_kept() {
        let card = document_into_card(doc! { "_id": 1, "b": 2, "a": [true, Bson::Null] }).unwrap();
        let keys: Vec<&str> = card.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["_id", "b", "a"]);
        assert_eq!(card.get("a"), Some(&json!([true, null])));
    }

    #[test]
    fn object_ids_are_tagged() {
        let oid = ObjectId::new();
        let card = document_into_card(doc! { "_id": oid }).unwrap();
        assert_eq!(card.id(), None);
        assert_eq!(card.get("_id"), Some(&json!({ "$oid": oid.to_hex() })));
    }

    #[test]
    fn next_filter_is_strictly_greater() {
        assert_eq!(next_filter(3), doc! { "_id": { "$gt": 3_i64 } });
        assert_eq!(ascending_id(), doc! { "_id": 1 });
    }
}
