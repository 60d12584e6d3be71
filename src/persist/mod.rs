//! Persistence abstraction for decks, cards, and deck-card links.

pub mod sqlite;

use crate::{
    card::{Card, Deck, DeckAggregate, DeckCardLink},
    types::{DeckId, ValidationError},
};

/// Failure surfaced by a [`DeckStore`] or the ledger on top of it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced deck, card, or link does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (`deck`, `card`, `deck card`).
        entity: &'static str,
        /// Offending identifier.
        id: String,
    },
    /// Input failed validation before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Any other store failure.
    #[error("{0}")]
    Message(String),
}

impl StoreError {
    /// Shorthand for a missing deck.
    pub fn deck_not_found(id: DeckId) -> Self {
        Self::NotFound {
            entity: "deck",
            id: id.to_string(),
        }
    }

    /// Returns true for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Row store consumed by the ledger.
///
/// Implementations must keep at most one link per `(deck_id, card_id)` and
/// must apply [`DeckStore::upsert_increment_deck_card`] as a single atomic
/// operation.
pub trait DeckStore: Send {
    /// Inserts a deck and returns it with its assigned id.
    fn create_deck(&mut self, name: &str) -> StoreResult<Deck>;

    /// Looks up a deck by id.
    fn find_deck(&self, id: DeckId) -> StoreResult<Option<Deck>>;

    /// Looks up a stored card by id.
    fn get_card(&self, id: &str) -> StoreResult<Option<Card>>;

    /// Inserts the card, or overwrites every descriptive field if it exists.
    fn upsert_card(&mut self, card: &Card) -> StoreResult<()>;

    /// Inserts the link with `qty = 1`, or increments an existing link by 1.
    fn upsert_increment_deck_card(&mut self, deck_id: DeckId, card_id: &str) -> StoreResult<DeckCardLink>;

    /// Removes a link. Fails with [`StoreError::NotFound`] if absent.
    fn delete_deck_card(&mut self, deck_id: DeckId, card_id: &str) -> StoreResult<()>;

    /// Joins a deck's links to their cards.
    fn load_deck(&self, id: DeckId) -> StoreResult<Option<DeckAggregate>>;

    /// Every deck with its cards, in creation order.
    fn list_decks_with_cards(&self) -> StoreResult<Vec<DeckAggregate>>;
}
