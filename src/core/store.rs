//! In-memory deck store.

use hashbrown::HashMap;

use crate::{
    card::{Card, Deck, DeckAggregate, DeckCardLink, DeckEntry},
    persist::{DeckStore, StoreError, StoreResult},
    types::{CardId, DeckId},
};

/// In-memory [`DeckStore`] keyed by hash maps, with per-deck insertion order.
#[derive(Debug, Default)]
pub struct MemoryDeckStore {
    decks: HashMap<DeckId, Deck>,
    deck_order: Vec<DeckId>,
    cards: HashMap<CardId, Card>,
    qty: HashMap<(DeckId, CardId), u32>,
    link_order: HashMap<DeckId, Vec<CardId>>,
    next_deck_id: DeckId,
}

impl MemoryDeckStore {
    /// Creates an empty store; deck ids start at 1.
    pub fn new() -> Self {
        Self {
            next_deck_id: 1,
            ..Self::default()
        }
    }

    /// Number of decks.
    pub fn deck_count(&self) -> usize {
        self.deck_order.len()
    }

    /// Number of distinct cards stored.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of deck-card links across all decks.
    pub fn link_count(&self) -> usize {
        self.qty.len()
    }

    fn entries_for(&self, deck_id: DeckId) -> Vec<DeckEntry> {
        self.link_order
            .get(&deck_id)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|card_id| {
                let card = self.cards.get(card_id)?;
                let qty = *self.qty.get(&(deck_id, card_id.clone()))?;
                Some(DeckEntry {
                    card: card.clone(),
                    qty,
                })
            })
            .collect()
    }

    fn remove_from_vec_index(v: &mut Vec<CardId>, card_id: &str) {
        if let Some(pos) = v.iter().position(|x| x == card_id) {
            v.remove(pos);
        }
    }
}

impl DeckStore for MemoryDeckStore {
    fn create_deck(&mut self, name: &str) -> StoreResult<Deck> {
        let id = self.next_deck_id.max(1);
        self.next_deck_id = id + 1;

        let deck = Deck {
            id,
            name: name.to_string(),
        };
        self.decks.insert(id, deck.clone());
        self.deck_order.push(id);
        Ok(deck)
    }

    fn find_deck(&self, id: DeckId) -> StoreResult<Option<Deck>> {
        Ok(self.decks.get(&id).cloned())
    }

    fn get_card(&self, id: &str) -> StoreResult<Option<Card>> {
        Ok(self.cards.get(id).cloned())
    }

    fn upsert_card(&mut self, card: &Card) -> StoreResult<()> {
        self.cards.insert(card.id.clone(), card.clone());
        Ok(())
    }

    fn upsert_increment_deck_card(&mut self, deck_id: DeckId, card_id: &str) -> StoreResult<DeckCardLink> {
        if !self.decks.contains_key(&deck_id) {
            return Err(StoreError::deck_not_found(deck_id));
        }
        if !self.cards.contains_key(card_id) {
            return Err(StoreError::NotFound {
                entity: "card",
                id: card_id.to_string(),
            });
        }

        let key = (deck_id, card_id.to_string());
        let qty = match self.qty.get_mut(&key) {
            Some(q) => {
                *q += 1;
                *q
            }
            None => {
                self.qty.insert(key, 1);
                self.link_order
                    .entry(deck_id)
                    .or_default()
                    .push(card_id.to_string());
                1
            }
        };

        Ok(DeckCardLink {
            deck_id,
            card_id: card_id.to_string(),
            qty,
        })
    }

    fn delete_deck_card(&mut self, deck_id: DeckId, card_id: &str) -> StoreResult<()> {
        if self.qty.remove(&(deck_id, card_id.to_string())).is_none() {
            return Err(StoreError::NotFound {
                entity: "deck card",
                id: format!("{deck_id}/{card_id}"),
            });
        }
        if let Some(order) = self.link_order.get_mut(&deck_id) {
            Self::remove_from_vec_index(order, card_id);
        }
        Ok(())
    }

    fn load_deck(&self, id: DeckId) -> StoreResult<Option<DeckAggregate>> {
        let Some(deck) = self.decks.get(&id) else {
            return Ok(None);
        };
        Ok(Some(DeckAggregate {
            deck: deck.clone(),
            cards: self.entries_for(id),
        }))
    }

    fn list_decks_with_cards(&self) -> StoreResult<Vec<DeckAggregate>> {
        Ok(self
            .deck_order
            .iter()
            .filter_map(|id| {
                let deck = self.decks.get(id)?;
                Some(DeckAggregate {
                    deck: deck.clone(),
                    cards: self.entries_for(*id),
                })
            })
            .collect())
    }
}
