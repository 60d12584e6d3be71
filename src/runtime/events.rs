//! Runtime event stream payloads.

use crate::types::{CardId, DeckId};

/// Events emitted from the single-writer ledger loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    /// A deck was created.
    DeckCreated {
        /// New deck id.
        deck_id: DeckId,
    },
    /// A card was added or its quantity incremented.
    CardAdded {
        /// Target deck.
        deck_id: DeckId,
        /// Added card.
        card_id: CardId,
        /// Quantity after the add.
        qty: u32,
    },
    /// A card link was removed from a deck.
    CardRemoved {
        /// Target deck.
        deck_id: DeckId,
        /// Removed card.
        card_id: CardId,
    },
}
