use std::collections::BTreeMap;

use proptest::prelude::*;

use mtgstack::{
    card::Card,
    core::{ledger, store::MemoryDeckStore},
    persist::{DeckStore, sqlite::SqliteDeckStore},
    types::DeckId,
};

const DECKS: DeckId = 3;

#[derive(Debug, Clone)]
enum Action {
    Add { deck: u8, card: u8, printing: u8 },
    Remove { deck: u8, card: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u8..4, 0u8..6, 0u8..3).prop_map(|(deck, card, printing)| Action::Add { deck, card, printing }),
        1 => (0u8..4, 0u8..6).prop_map(|(deck, card)| Action::Remove { deck, card }),
    ]
}

fn card_from(card: u8, printing: u8) -> Card {
    Card {
        type_line: Some(format!("Creature — Test {printing}")),
        image_uri: Some(format!("https://img.example/{card}/{printing}.jpg")),
        ..Card::new(format!("card-{card}"), format!("Card {card}"))
    }
}

// Deck index 3 maps to an id that is never created.
fn deck_id(deck: u8) -> DeckId {
    DeckId::from(deck) + 1
}

#[derive(Default)]
struct Model {
    qty: BTreeMap<(DeckId, String), u32>,
    cards: BTreeMap<String, Card>,
}

fn check_against_model(store: &dyn DeckStore, model: &Model) -> Result<(), TestCaseError> {
    for id in 1..=DECKS {
        let agg = ledger::load_deck(store, id).map_err(|e| TestCaseError::fail(format!("{e}")))?;

        let mut seen = std::collections::BTreeSet::new();
        for entry in &agg.cards {
            prop_assert!(seen.insert(entry.card.id.clone()), "duplicate link for {}", entry.card.id);
            prop_assert_eq!(Some(&entry.qty), model.qty.get(&(id, entry.card.id.clone())));
            prop_assert_eq!(Some(&entry.card), model.cards.get(&entry.card.id));
        }

        let expected_links = model.qty.keys().filter(|(d, _)| *d == id).count();
        prop_assert_eq!(agg.cards.len(), expected_links);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_adds_and_removes_keep_one_link_per_pair(actions in prop::collection::vec(action_strategy(), 1..120)) {
        let mut memory = MemoryDeckStore::new();
        let mut sqlite = SqliteDeckStore::open_in_memory().expect("open sqlite");
        let mut model = Model::default();

        for name in ["A", "B", "C"] {
            let m = ledger::create_deck(&mut memory, name).expect("memory deck");
            let s = ledger::create_deck(&mut sqlite, name).expect("sqlite deck");
            prop_assert_eq!(m, s);
        }

        for action in actions {
            match action {
                Action::Add { deck, card, printing } => {
                    let id = deck_id(deck);
                    let payload = card_from(card, printing);
                    let m = ledger::add_card(&mut memory, id, &payload);
                    let s = ledger::add_card(&mut sqlite, id, &payload);

                    if id > DECKS {
                        prop_assert!(m.is_err_and(|e| e.is_not_found()));
                        prop_assert!(s.is_err_and(|e| e.is_not_found()));
                        continue;
                    }

                    let qty = model.qty.entry((id, payload.id.clone())).or_insert(0);
                    *qty += 1;
                    model.cards.insert(payload.id.clone(), payload);

                    let m = m.expect("memory add");
                    let s = s.expect("sqlite add");
                    prop_assert_eq!(m.qty, *qty);
                    prop_assert_eq!(&m, &s);
                }
                Action::Remove { deck, card } => {
                    let id = deck_id(deck);
                    let card_id = format!("card-{card}");
                    let existed = model.qty.remove(&(id, card_id.clone())).is_some();

                    let m = ledger::remove_card(&mut memory, id, &card_id);
                    let s = ledger::remove_card(&mut sqlite, id, &card_id);
                    prop_assert_eq!(m.is_ok(), existed);
                    prop_assert_eq!(s.is_ok(), existed);
                }
            }

            check_against_model(&memory, &model)?;
            check_against_model(&sqlite, &model)?;
        }

        let m = ledger::list_decks(&memory).expect("memory list");
        let s = ledger::list_decks(&sqlite).expect("sqlite list");
        prop_assert_eq!(m, s);
    }
}
