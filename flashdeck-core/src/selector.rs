use crate::{Card, CardId, CoreError, Deck, DocumentStore};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Picks cards out of a deck and stamps them with the canonical deck name.
///
/// The random generator lives as long as the selector; the lock is only held
/// while drawing an offset.
pub struct CardSelector {
    store: Arc<dyn DocumentStore>,
    rng: Mutex<StdRng>,
}

impl CardSelector {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(store: Arc<dyn DocumentStore>, seed: u64) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub async fn random_card(&self, deck: Deck) -> Result<Card, CoreError> {
        let collection = deck.collection();
        let count = self
            .store
            .count(collection)
            .await
            .map_err(CoreError::Count)?;
        if count == 0 {
            return Err(CoreError::EmptyDeck);
        }

        let skip = self.rng.lock().gen_range(0..count);
        let mut card = self
            .store
            .find_at(collection, skip)
            .await
            .map_err(CoreError::Fetch)?
            .ok_or_else(|| {
                CoreError::Fetch(crate::StoreError::Query(format!(
                    "no document at offset {skip} of {count}"
                )))
            })?;

        card.set_deck(deck);
        Ok(card)
    }

    /// Smallest id after `current`, wrapping to the first card of the deck.
    pub async fn next_card(&self, deck: Deck, current: CardId) -> Result<Card, CoreError> {
        let collection = deck.collection();
        let next = self
            .store
            .find_next(collection, current)
            .await
            .map_err(CoreError::Fetch)?;

        let mut card = match next {
            Some(card) => card,
            None => self
                .store
                .find_first(collection)
                .await
                .map_err(CoreError::Fetch)?
                .ok_or(CoreError::NoNextCard)?,
        };

        card.set_deck(deck);
        Ok(card)
    }
}
