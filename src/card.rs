//! Card, deck, and deck-card link records.

use serde::{Deserialize, Serialize};

use crate::types::{CardId, DeckId, ValidationError};

/// Stored card metadata. Shared across decks by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Catalog-assigned identifier.
    pub id: CardId,
    /// Printed card name.
    pub name: String,
    /// Full type line, e.g. `Creature — Elf Druid`.
    pub type_line: Option<String>,
    /// Mana cost in catalog notation, e.g. `{1}{G}`.
    pub mana_cost: Option<String>,
    /// Rules text.
    pub oracle_text: Option<String>,
    /// Display image URL.
    pub image_uri: Option<String>,
}

impl Card {
    /// Builds a card carrying only the required fields.
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_line: None,
            mana_cost: None,
            oracle_text: None,
            image_uri: None,
        }
    }

    /// Checks that `id` and `name` are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("card.id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("card.name"));
        }
        Ok(())
    }
}

/// Named collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Store-assigned identifier.
    pub id: DeckId,
    /// Display name.
    pub name: String,
}

/// Unique `(deck_id, card_id)` association with a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCardLink {
    /// Owning deck.
    pub deck_id: DeckId,
    /// Linked card.
    pub card_id: CardId,
    /// Copies of the card in the deck, at least 1.
    pub qty: u32,
}

/// One resolved line of a deck listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Resolved card record.
    pub card: Card,
    /// Copies in the deck.
    pub qty: u32,
}

/// Display-ready deck: name plus every link joined to its card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckAggregate {
    /// Deck identity and name.
    pub deck: Deck,
    /// Links in a stable order.
    pub cards: Vec<DeckEntry>,
}

impl DeckAggregate {
    /// Number of distinct cards.
    pub fn unique_cards(&self) -> usize {
        self.cards.len()
    }

    /// Sum of all quantities.
    pub fn total_cards(&self) -> u64 {
        self.cards.iter().map(|e| u64::from(e.qty)).sum()
    }

    /// Quantity of `card_id`, if linked.
    pub fn qty_of(&self, card_id: &str) -> Option<u32> {
        self.cards
            .iter()
            .find(|e| e.card.id == card_id)
            .map(|e| e.qty)
    }
}
