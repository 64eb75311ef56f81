use async_trait::async_trait;
use flashdeck_core::{repo::DocumentStore, Card, CardId, Deck, MemoryStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

pub mod paths;

/// Serves the deck collections from `<dir>/<Collection>.json` files.
///
/// A file holds either a JSON array of documents or one document per line
/// (the `mongoexport` layout). Files are read once at open; a missing file is
/// an empty collection.
pub struct JsonStore {
    docs: MemoryStore,
}

impl JsonStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        let root = dir.clone();
        let collections = task::spawn_blocking(move || load_all(&root))
            .await
            .map_err(|e| StoreError::Unavailable(format!("loader task: {e}")))??;

        for (name, cards) in &collections {
            info!(collection = %name, cards = cards.len(), dir = %dir.display(), "loaded collection");
        }
        Ok(Self {
            docs: MemoryStore::from_collections(collections),
        })
    }
}

fn load_all(dir: &Path) -> Result<HashMap<String, Vec<Card>>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::Unavailable(format!(
            "not a directory: {}",
            dir.display()
        )));
    }
    let mut out = HashMap::new();
    for deck in Deck::ALL {
        let name = deck.collection();
        let path = dir.join(format!("{name}.json"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no dump for collection");
                continue;
            }
            Err(e) => {
                return Err(StoreError::Unavailable(format!("{}: {e}", path.display())));
            }
        };
        let cards = parse_dump(&text)
            .map_err(|e| StoreError::InvalidData(format!("{}: {e}", path.display())))?;
        out.insert(name.to_string(), cards);
    }
    Ok(out)
}

/// Parses a JSON array dump, or JSON Lines when the text is not an array.
fn parse_dump(text: &str) -> Result<Vec<Card>, StoreError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let values: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| StoreError::InvalidData(e.to_string()))?
    } else {
        let mut v = Vec::new();
        for (n, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let doc = serde_json::from_str(line)
                .map_err(|e| StoreError::InvalidData(format!("line {}: {e}", n + 1)))?;
            v.push(doc);
        }
        v
    };
    values.into_iter().map(Card::try_from).collect()
}

#[async_trait]
impl DocumentStore for JsonStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.docs.ping().await
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        self.docs.count(collection).await
    }

    async fn find_at(&self, collection: &str, skip: u64) -> Result<Option<Card>, StoreError> {
        self.docs.find_at(collection, skip).await
    }

    async fn find_next(
        &self,
        collection: &str,
        after: CardId,
    ) -> Result<Option<Card>, StoreError> {
        self.docs.find_next(collection, after).await
    }

    async fn find_first(&self, collection: &str) -> Result<Option<Card>, StoreError> {
        self.docs.find_first(collection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_core::{COLLECTION_GEMINI, COLLECTION_GPT};
    use serde_json::json;

    #[tokio::test]
    async fn loads_array_and_lines_dumps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(format!("{COLLECTION_GPT}.json")),
            r#"[{"_id": 2, "q": "b"}, {"_id": 1, "q": "a"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(format!("{COLLECTION_GEMINI}.json")),
            "{\"_id\": 10, \"q\": \"x\"}\n\n{\"_id\": 11, \"q\": \"y\"}\n",
        )
        .unwrap();

        let store = JsonStore::open(dir.path()).await.unwrap();
        assert_eq!(store.count(COLLECTION_GPT).await.unwrap(), 2);
        assert_eq!(store.count(COLLECTION_GEMINI).await.unwrap(), 2);

        let first = store.find_first(COLLECTION_GPT).await.unwrap().unwrap();
        assert_eq!(first.get("q"), Some(&json!("a")));
        let at0 = store.find_at(COLLECTION_GPT, 0).await.unwrap().unwrap();
        assert_eq!(at0.id(), Some(2));
        let next = store.find_next(COLLECTION_GEMINI, 10).await.unwrap().unwrap();
        assert_eq!(next.id(), Some(11));
    }

    #[tokio::test]
    async fn missing_dump_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        assert_eq!(store.count(COLLECTION_GPT).await.unwrap(), 0);
        assert!(store.find_first(COLLECTION_GPT).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_dump_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(format!("{COLLECTION_GPT}.json")), "[1, 2]").unwrap();
        let err = JsonStore::open(dir.path()).await.err().unwrap();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }

    #[tokio::test]
    async fn missing_dir_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonStore::open(dir.path().join("nope")).await.err().unwrap();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
