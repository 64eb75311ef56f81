use thiserror::Error;

/// Failure reported by a document store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no cards found in deck")]
    EmptyDeck,
    #[error("no next card found")]
    NoNextCard,
    #[error("failed to count documents: {0}")]
    Count(#[source] StoreError),
    #[error("failed to fetch card: {0}")]
    Fetch(#[source] StoreError),
}
