use crate::{Card, CardId, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Collections held in insertion order.
///
/// Ordering by `_id` puts documents without an integer id after all others;
/// equal ids keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Card>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_collections(collections: HashMap<String, Vec<Card>>) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    pub fn with_cards(self, collection: &str, cards: impl IntoIterator<Item = Card>) -> Self {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .extend(cards);
        self
    }
}

#[async_trait]
impl crate::repo::DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map_or(0, |v| v.len() as u64))
    }

    async fn find_at(&self, collection: &str, skip: u64) -> Result<Option<Card>, StoreError> {
        let Ok(skip) = usize::try_from(skip) else {
            return Ok(None);
        };
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|v| v.get(skip))
            .cloned())
    }

    async fn find_next(
        &self,
        collection: &str,
        after: CardId,
    ) -> Result<Option<Card>, StoreError> {
        let m = self.collections.read();
        let Some(cards) = m.get(collection) else {
            return Ok(None);
        };
        Ok(cards
            .iter()
            .filter_map(|c| c.id().filter(|id| *id > after).map(|id| (id, c)))
            .min_by_key(|(id, _)| *id)
            .map(|(_, c)| c.clone()))
    }

    async fn find_first(&self, collection: &str) -> Result<Option<Card>, StoreError> {
        let m = self.collections.read();
        let Some(cards) = m.get(collection) else {
            return Ok(None);
        };
        Ok(cards
            .iter()
            .min_by_key(|c| {
                let id = c.id();
                (id.is_none(), id)
            })
            .cloned())
    }
}
