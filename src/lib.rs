//! Deck composition over an external card catalog: filter-aware query
//! building, debounced type-ahead search, and an idempotent deck-card ledger
//! backed by SQLite.
//!
//! # Examples
//!
//! Building a catalog query from filters:
//! ```
//! use mtgstack::{
//!     search::query::{build_query, CmcRange, FilterState},
//!     types::{CardType, Color},
//! };
//!
//! let filters = FilterState {
//!     card_type: CardType::Creature,
//!     colors: [Color::White, Color::Blue].into_iter().collect(),
//!     cmc: CmcRange { min: 2, max: 5 },
//!     set_code: Some("mh3".to_string()),
//! };
//! assert_eq!(build_query("", &filters), "t:creature id<=WU cmc>=2 cmc<=5 s:mh3");
//! ```
//!
//! In-memory ledger usage with [`core::store::MemoryDeckStore`]:
//! ```
//! use mtgstack::{card::Card, core::{ledger, store::MemoryDeckStore}};
//!
//! let mut store = MemoryDeckStore::new();
//! let deck = ledger::create_deck(&mut store, "Elves").expect("create");
//! let elf = Card::new("llanowar-elves", "Llanowar Elves");
//! ledger::add_card(&mut store, deck.id, &elf).expect("add");
//! let link = ledger::add_card(&mut store, deck.id, &elf).expect("add again");
//! assert_eq!(link.qty, 2);
//! ```
//!
//! Runtime usage with the SQLite store:
//! ```no_run
//! use mtgstack::{
//!     card::Card,
//!     persist::sqlite::SqliteDeckStore,
//!     runtime::handle::{spawn_ledger, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SqliteDeckStore::open("decks.db").expect("open sqlite");
//! let handle = spawn_ledger(Box::new(store), RuntimeConfig::default());
//! let deck = handle.create_deck("Burn").await.expect("create");
//! let link = handle
//!     .add_card(deck.id, Card::new("lightning-bolt", "Lightning Bolt"))
//!     .await
//!     .expect("add");
//! assert_eq!(link.qty, 1);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Card, deck, and link records.
pub mod card;
/// Catalog provider trait and the Scryfall client.
pub mod catalog;
/// Ledger operations and the in-memory store.
pub mod core;
/// Store abstraction and SQLite implementation.
pub mod persist;
/// Single-writer ledger runtime and events.
pub mod runtime;
/// Query building, debounced autocomplete, and search sessions.
pub mod search;
/// Shared primitive types and enums.
pub mod types;
