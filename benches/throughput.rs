use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use mtgstack::{
    card::Card,
    core::{ledger, store::MemoryDeckStore},
    persist::sqlite::SqliteDeckStore,
    search::query::{CmcRange, FilterState, build_query},
    types::{CardType, Color},
};

fn card(i: u32) -> Card {
    Card {
        type_line: Some("Creature — Elf".to_string()),
        mana_cost: Some("{G}".to_string()),
        ..Card::new(format!("card-{i}"), format!("Card {i}"))
    }
}

fn bench_memory_adds(c: &mut Criterion) {
    c.bench_function("memory_add_10k", |b| {
        b.iter(|| {
            let mut store = MemoryDeckStore::new();
            let deck = ledger::create_deck(&mut store, "Bench").expect("create");
            for i in 0..10_000u32 {
                let _ = ledger::add_card(&mut store, deck.id, &card(i % 250)).expect("add");
            }
        });
    });
}

fn bench_sqlite_adds(c: &mut Criterion) {
    c.bench_function("sqlite_add_1k", |b| {
        b.iter(|| {
            let mut store = SqliteDeckStore::open_in_memory().expect("open");
            let deck = ledger::create_deck(&mut store, "Bench").expect("create");
            for i in 0..1_000u32 {
                let _ = ledger::add_card(&mut store, deck.id, &card(i % 60)).expect("add");
            }
        });
    });
}

fn bench_load_deck(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_deck");

    for n in [10u32, 60u32, 250u32] {
        let mut store = SqliteDeckStore::open_in_memory().expect("open");
        let deck = ledger::create_deck(&mut store, "Bench").expect("create");
        for i in 0..n {
            let _ = ledger::add_card(&mut store, deck.id, &card(i)).expect("add");
        }

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let _ = ledger::load_deck(&store, deck.id).expect("load");
            });
        });
    }

    group.finish();
}

fn bench_build_query(c: &mut Criterion) {
    let filters = FilterState {
        card_type: CardType::Creature,
        colors: [Color::Green, Color::White, Color::Blue].into_iter().collect(),
        cmc: CmcRange { min: 2, max: 5 },
        set_code: Some("mh3".to_string()),
    };

    c.bench_function("build_query", |b| {
        b.iter(|| build_query("  elf lord  ", &filters));
    });
}

criterion_group!(benches, bench_memory_adds, bench_sqlite_adds, bench_load_deck, bench_build_query);
criterion_main!(benches);
