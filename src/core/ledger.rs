//! Deck-card ledger: idempotent, quantity-accumulating adds and the deck
//! aggregate loader.
//!
//! These functions work against any [`DeckStore`]. The store owns
//! atomicity of the link upsert; the ledger owns ordering (card before link)
//! and input validation.

use crate::{
    card::{Card, Deck, DeckAggregate, DeckCardLink},
    persist::{DeckStore, StoreError, StoreResult},
    types::{DeckId, ValidationError},
};

/// Creates a deck after trimming `name`. Empty names are rejected.
pub fn create_deck(store: &mut dyn DeckStore, name: &str) -> StoreResult<Deck> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("deck.name").into());
    }
    let deck = store.create_deck(name)?;
    log::debug!("created deck {} ({:?})", deck.id, deck.name);
    Ok(deck)
}

/// Records "add `card` to deck `deck_id`".
///
/// The card row is upserted first so a link never dangles, then the link is
/// inserted with `qty = 1` or incremented by exactly one.
pub fn add_card(store: &mut dyn DeckStore, deck_id: DeckId, card: &Card) -> StoreResult<DeckCardLink> {
    card.validate()?;
    if store.find_deck(deck_id)?.is_none() {
        return Err(StoreError::deck_not_found(deck_id));
    }

    store.upsert_card(card)?;
    let link = store.upsert_increment_deck_card(deck_id, &card.id)?;
    log::debug!(
        "deck {} card {} ({}) now x{}",
        link.deck_id,
        link.card_id,
        card.name,
        link.qty
    );
    Ok(link)
}

/// Removes the `(deck_id, card_id)` link entirely.
pub fn remove_card(store: &mut dyn DeckStore, deck_id: DeckId, card_id: &str) -> StoreResult<()> {
    if store.find_deck(deck_id)?.is_none() {
        return Err(StoreError::deck_not_found(deck_id));
    }
    store.delete_deck_card(deck_id, card_id)?;
    log::debug!("deck {deck_id} card {card_id} removed");
    Ok(())
}

/// Loads a deck with every link resolved to its card.
pub fn load_deck(store: &dyn DeckStore, deck_id: DeckId) -> StoreResult<DeckAggregate> {
    store
        .load_deck(deck_id)?
        .ok_or_else(|| StoreError::deck_not_found(deck_id))
}

/// Lists every deck with its cards.
pub fn list_decks(store: &dyn DeckStore) -> StoreResult<Vec<DeckAggregate>> {
    store.list_decks_with_cards()
}
