//! Cloneable handle over the single-writer deck ledger loop.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};

use crate::{
    card::{Card, Deck, DeckAggregate, DeckCardLink},
    core::ledger,
    persist::{DeckStore, StoreError},
    types::{CardId, DeckId},
};

use super::events::DeckEvent;

/// Failure returned through a [`DeckLedgerHandle`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The store or ledger rejected the command.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The command loop has shut down.
    #[error("ledger runtime is not running")]
    ChannelClosed,
}

impl RuntimeError {
    /// True when the underlying store reported a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_not_found())
    }
}

/// Channel sizing for [`spawn_ledger`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Commands buffered before senders wait.
    pub command_queue_bound: usize,
    /// Events retained for slow subscribers.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Sends commands to the ledger loop. Clones share the same loop.
#[derive(Clone)]
pub struct DeckLedgerHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<DeckEvent>,
}

enum Command {
    CreateDeck {
        name: String,
        resp: oneshot::Sender<Result<Deck, RuntimeError>>,
    },
    AddCard {
        deck_id: DeckId,
        card: Card,
        resp: oneshot::Sender<Result<DeckCardLink, RuntimeError>>,
    },
    RemoveCard {
        deck_id: DeckId,
        card_id: CardId,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    LoadDeck {
        deck_id: DeckId,
        resp: oneshot::Sender<Result<DeckAggregate, RuntimeError>>,
    },
    ListDecks {
        resp: oneshot::Sender<Result<Vec<DeckAggregate>, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

type SharedStore = Arc<Mutex<Box<dyn DeckStore>>>;

/// Starts the single-writer command loop that owns `store`.
///
/// Every mutation goes through this loop one at a time, so concurrent adds
/// of the same card through cloned handles each apply exactly once.
pub fn spawn_ledger(store: Box<dyn DeckStore>, config: RuntimeConfig) -> DeckLedgerHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<DeckEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();
    let store: SharedStore = Arc::new(Mutex::new(store));

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &store, &events_tx_loop).await {
                break;
            }
        }
        log::debug!("ledger runtime stopped");
    });

    DeckLedgerHandle { cmd_tx, events_tx }
}

impl DeckLedgerHandle {
    /// Receiver for events emitted after successful mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<DeckEvent> {
        self.events_tx.subscribe()
    }

    /// Creates a deck with a trimmed, non-empty name.
    pub async fn create_deck(&self, name: impl Into<String>) -> Result<Deck, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::CreateDeck {
                name: name.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Adds one copy of `card` to the deck, upserting the card first.
    pub async fn add_card(&self, deck_id: DeckId, card: Card) -> Result<DeckCardLink, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::AddCard {
                deck_id,
                card,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Removes a card from a deck entirely.
    pub async fn remove_card(&self, deck_id: DeckId, card_id: impl Into<CardId>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RemoveCard {
                deck_id,
                card_id: card_id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Loads a deck with its cards; NotFound if absent.
    pub async fn load_deck(&self, deck_id: DeckId) -> Result<DeckAggregate, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::LoadDeck { deck_id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Every deck with its cards.
    pub async fn list_decks(&self) -> Result<Vec<DeckAggregate>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ListDecks { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Deck picker listing: any failure degrades to an empty list.
    pub async fn list_decks_or_empty(&self) -> Vec<DeckAggregate> {
        match self.list_decks().await {
            Ok(decks) => decks,
            Err(err) => {
                log::warn!("deck listing failed, showing none: {err}");
                Vec::new()
            }
        }
    }

    /// Stops the loop. Later calls fail with [`RuntimeError::ChannelClosed`].
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command(cmd: Command, store: &SharedStore, events_tx: &broadcast::Sender<DeckEvent>) -> bool {
    match cmd {
        Command::CreateDeck { name, resp } => {
            let res = with_store(store, move |s| ledger::create_deck(s, &name)).await;
            if let Ok(deck) = &res {
                let _ = events_tx.send(DeckEvent::DeckCreated { deck_id: deck.id });
            }
            let _ = resp.send(res);
        }
        Command::AddCard { deck_id, card, resp } => {
            let res = with_store(store, move |s| ledger::add_card(s, deck_id, &card)).await;
            if let Ok(link) = &res {
                let _ = events_tx.send(DeckEvent::CardAdded {
                    deck_id: link.deck_id,
                    card_id: link.card_id.clone(),
                    qty: link.qty,
                });
            }
            let _ = resp.send(res);
        }
        Command::RemoveCard { deck_id, card_id, resp } => {
            let event_card_id = card_id.clone();
            let res = with_store(store, move |s| ledger::remove_card(s, deck_id, &card_id)).await;
            if res.is_ok() {
                let _ = events_tx.send(DeckEvent::CardRemoved {
                    deck_id,
                    card_id: event_card_id,
                });
            }
            let _ = resp.send(res);
        }
        Command::LoadDeck { deck_id, resp } => {
            let res = with_store(store, move |s| ledger::load_deck(s, deck_id)).await;
            let _ = resp.send(res);
        }
        Command::ListDecks { resp } => {
            let res = with_store(store, |s| ledger::list_decks(s)).await;
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

// Store calls are synchronous (SQLite), so they run on the blocking pool.
async fn with_store<T, F>(store: &SharedStore, f: F) -> Result<T, RuntimeError>
where
    T: Send + 'static,
    F: FnOnce(&mut dyn DeckStore) -> Result<T, StoreError> + Send + 'static,
{
    let store_ref = Arc::clone(store);
    tokio::task::spawn_blocking(move || {
        let mut guard = store_ref.blocking_lock();
        f(guard.as_mut())
    })
    .await
    .map_err(|e| StoreError::Message(format!("join error: {e}")))?
    .map_err(RuntimeError::from)
}
