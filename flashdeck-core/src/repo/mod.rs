use crate::{Card, CardId, StoreError};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryStore;

/// Read-only access to the card collections.
///
/// "No matching document" is `Ok(None)`; `Err` is reserved for faults.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    /// Document at `skip` in the store's natural iteration order.
    async fn find_at(&self, collection: &str, skip: u64) -> Result<Option<Card>, StoreError>;

    /// Document with the smallest `_id` strictly greater than `after`.
    async fn find_next(&self, collection: &str, after: CardId)
        -> Result<Option<Card>, StoreError>;

    /// Document with the smallest `_id`.
    async fn find_first(&self, collection: &str) -> Result<Option<Card>, StoreError>;
}
