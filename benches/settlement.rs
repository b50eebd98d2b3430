use billsplit_core::core::services::{ImportService, ImportTarget, SettlementService};
use billsplit_core::domain::{Identifiable, SplitMode};
use billsplit_core::ledger::Ledger;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn rows(prefix: &str, count: usize, value: impl Fn(usize) -> f64) -> String {
    (0..count)
        .map(|idx| format!("{prefix}{idx},{}", value(idx)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_itemized_ledger(people: usize, items: usize) -> Ledger {
    let mut ledger = Ledger::new(SplitMode::ItemBased);
    ImportService::import(
        &mut ledger,
        ImportTarget::People,
        &rows("Guest ", people, |idx| (idx % 7) as f64 * 10.0),
    )
    .expect("people");
    ImportService::import(
        &mut ledger,
        ImportTarget::Items,
        &rows("Dish ", items, |idx| 5.0 + (idx % 40) as f64),
    )
    .expect("items");

    let person_ids: Vec<_> = ledger.people().iter().map(|person| person.id).collect();
    let item_ids: Vec<_> = ledger.line_items().iter().map(|item| item.id()).collect();
    for (idx, item) in item_ids.iter().enumerate() {
        for offset in 0..3 {
            let person = person_ids[(idx + offset) % person_ids.len()];
            ledger.set_item_person(*item, person, true);
        }
    }
    ledger
}

fn build_per_head_ledger(people: usize) -> Ledger {
    let mut ledger = Ledger::new(SplitMode::PerHead);
    ImportService::import(
        &mut ledger,
        ImportTarget::Items,
        &format!("Banquet,{}", people * 25),
    )
    .expect("items");
    ImportService::import(
        &mut ledger,
        ImportTarget::People,
        &rows("Guest ", people, |idx| if idx % 2 == 0 { 50.0 } else { 0.0 }),
    )
    .expect("people");
    ledger
}

fn bench_settlement(c: &mut Criterion) {
    let itemized = build_itemized_ledger(black_box(50), black_box(2_000));
    c.bench_function("per_item_50_people_2k_items", |b| {
        b.iter(|| black_box(SettlementService::per_item(&itemized)))
    });

    let per_head = build_per_head_ledger(black_box(1_000));
    c.bench_function("equal_split_1k_people", |b| {
        b.iter(|| black_box(SettlementService::equal_split(&per_head).expect("balanced")))
    });
}

fn bench_import(c: &mut Criterion) {
    let text = rows("Dish ", 5_000, |idx| 1.5 + idx as f64);
    c.bench_function("import_items_5k_rows", |b| {
        b.iter_batched(
            || Ledger::new(SplitMode::PerHead),
            |mut ledger| {
                ImportService::import(&mut ledger, ImportTarget::Items, &text).expect("import");
                black_box(ledger);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_settlement, bench_import);
criterion_main!(benches);
