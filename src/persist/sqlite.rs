//! SQLite-backed deck store.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    card::{Card, Deck, DeckAggregate, DeckCardLink, DeckEntry},
    types::DeckId,
};

use super::{DeckStore, StoreError, StoreResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const UPSERT_CARD_SQL: &str = "INSERT INTO cards (id, name, type_line, mana_cost, oracle_text, image_uri)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(id) DO UPDATE SET
         name = excluded.name,
         type_line = excluded.type_line,
         mana_cost = excluded.mana_cost,
         oracle_text = excluded.oracle_text,
         image_uri = excluded.image_uri";

// One statement: concurrent writers serialize on the write lock and each
// sees the other's increment.
const UPSERT_INCREMENT_SQL: &str = "INSERT INTO deck_cards (deck_id, card_id, qty)
     VALUES (?1, ?2, 1)
     ON CONFLICT(deck_id, card_id) DO UPDATE SET qty = qty + 1
     RETURNING qty";

const DECK_ENTRIES_SQL: &str = "SELECT c.id, c.name, c.type_line, c.mana_cost, c.oracle_text, c.image_uri, dc.qty
     FROM deck_cards dc
     JOIN cards c ON c.id = dc.card_id
     WHERE dc.deck_id = ?1
     ORDER BY dc.rowid ASC";

/// SQLite implementation of [`crate::persist::DeckStore`].
pub struct SqliteDeckStore {
    conn: Connection,
}

impl SqliteDeckStore {
    /// Opens or creates a SQLite-backed store at `path`.
    ///
    /// Enables WAL mode, foreign keys, and a busy timeout so several
    /// connections to the same file can write concurrently.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Number of link rows for `(deck_id, card_id)`. Always 0 or 1.
    pub fn link_row_count(&self, deck_id: DeckId, card_id: &str) -> StoreResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM deck_cards WHERE deck_id = ?1 AND card_id = ?2",
            params![deck_id, card_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn entries_for(&self, deck_id: DeckId) -> StoreResult<Vec<DeckEntry>> {
        let mut stmt = self.conn.prepare_cached(DECK_ENTRIES_SQL)?;
        let rows = stmt.query_map(params![deck_id], |row| {
            Ok(DeckEntry {
                card: card_from_row(row)?,
                qty: row.get(6)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl DeckStore for SqliteDeckStore {
    fn create_deck(&mut self, name: &str) -> StoreResult<Deck> {
        self.conn
            .execute("INSERT INTO decks (name) VALUES (?1)", params![name])?;
        Ok(Deck {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn find_deck(&self, id: DeckId) -> StoreResult<Option<Deck>> {
        let deck = self
            .conn
            .query_row(
                "SELECT id, name FROM decks WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Deck {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(deck)
    }

    fn get_card(&self, id: &str) -> StoreResult<Option<Card>> {
        let card = self
            .conn
            .query_row(
                "SELECT id, name, type_line, mana_cost, oracle_text, image_uri FROM cards WHERE id = ?1",
                params![id],
                card_from_row,
            )
            .optional()?;
        Ok(card)
    }

    fn upsert_card(&mut self, card: &Card) -> StoreResult<()> {
        self.conn.execute(
            UPSERT_CARD_SQL,
            params![
                card.id,
                card.name,
                card.type_line,
                card.mana_cost,
                card.oracle_text,
                card.image_uri,
            ],
        )?;
        Ok(())
    }

    fn upsert_increment_deck_card(&mut self, deck_id: DeckId, card_id: &str) -> StoreResult<DeckCardLink> {
        if self.find_deck(deck_id)?.is_none() {
            return Err(StoreError::deck_not_found(deck_id));
        }
        if self.get_card(card_id)?.is_none() {
            return Err(StoreError::NotFound {
                entity: "card",
                id: card_id.to_string(),
            });
        }

        let qty: u32 = self
            .conn
            .query_row(UPSERT_INCREMENT_SQL, params![deck_id, card_id], |row| row.get(0))?;
        Ok(DeckCardLink {
            deck_id,
            card_id: card_id.to_string(),
            qty,
        })
    }

    fn delete_deck_card(&mut self, deck_id: DeckId, card_id: &str) -> StoreResult<()> {
        let removed = self.conn.execute(
            "DELETE FROM deck_cards WHERE deck_id = ?1 AND card_id = ?2",
            params![deck_id, card_id],
        )?;
        if removed == 0 {
            return Err(StoreError::NotFound {
                entity: "deck card",
                id: format!("{deck_id}/{card_id}"),
            });
        }
        Ok(())
    }

    fn load_deck(&self, id: DeckId) -> StoreResult<Option<DeckAggregate>> {
        let Some(deck) = self.find_deck(id)? else {
            return Ok(None);
        };
        let cards = self.entries_for(id)?;
        Ok(Some(DeckAggregate { deck, cards }))
    }

    fn list_decks_with_cards(&self) -> StoreResult<Vec<DeckAggregate>> {
        let decks = {
            let mut stmt = self.conn.prepare("SELECT id, name FROM decks ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(Deck {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut out = Vec::with_capacity(decks.len());
        for deck in decks {
            let cards = self.entries_for(deck.id)?;
            out.push(DeckAggregate { deck, cards });
        }
        Ok(out)
    }
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        name: row.get(1)?,
        type_line: row.get(2)?,
        mana_cost: row.get(3)?,
        oracle_text: row.get(4)?,
        image_uri: row.get(5)?,
    })
}
