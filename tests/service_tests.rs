use billsplit_core::{
    core::services::{
        ImportService, ImportTarget, SettlementError, SettlementService, ValidationService,
    },
    domain::{Direction, Identifiable, NamedEntity, SplitMode},
    ledger::Ledger,
};

fn per_head_dinner(paid: &[(&str, f64)]) -> Ledger {
    let mut ledger = Ledger::new(SplitMode::PerHead);
    ImportService::import(&mut ledger, ImportTarget::Items, "Dinner,300").unwrap();
    let rows: Vec<String> = paid
        .iter()
        .map(|(name, amount)| format!("{name},{amount}"))
        .collect();
    ImportService::import(&mut ledger, ImportTarget::People, &rows.join("\n")).unwrap();
    ledger
}

#[test]
fn imported_rows_settle_per_head() {
    let ledger = per_head_dinner(&[("A", 150.0), ("B", 100.0), ("C", 50.0)]);
    assert_eq!(ledger.total(), 300.0);
    assert_eq!(ledger.per_head_share(), Some(100.0));
    let check = ValidationService::check_ledger(&ledger);
    assert!(check.is_valid);
    assert_eq!(check.message, "Contributions match total!");

    let entries = SettlementService::settle(&ledger).unwrap();
    let summary: Vec<(&str, Direction, f64)> = entries
        .iter()
        .map(|entry| (entry.name.as_str(), entry.direction, entry.amount))
        .collect();
    assert_eq!(
        summary,
        vec![("A", Direction::Receive, 50.0), ("C", Direction::Pay, 50.0)]
    );
}

#[test]
fn fully_settled_group_has_no_entries() {
    let ledger = per_head_dinner(&[("A", 100.0), ("B", 100.0), ("C", 100.0)]);
    assert!(SettlementService::settle(&ledger).unwrap().is_empty());
}

#[test]
fn equal_split_refuses_shortfall() {
    let ledger = per_head_dinner(&[("A", 100.0), ("B", 150.0)]);
    let check = ValidationService::check_ledger(&ledger);
    assert_eq!(check.message, "Missing 50.00 in contributions");
    assert_eq!(
        SettlementService::settle(&ledger),
        Err(SettlementError::ContributionMismatch { difference: 50.0 })
    );
}

#[test]
fn item_based_split_follows_assignments() {
    let mut ledger = Ledger::new(SplitMode::ItemBased);
    ImportService::import(&mut ledger, ImportTarget::People, "A,160\nB,0").unwrap();
    ImportService::import(&mut ledger, ImportTarget::Items, "Tea,100\nCoffee,60").unwrap();
    let people: Vec<_> = ledger.people().iter().map(|person| person.id).collect();
    let items: Vec<_> = ledger.line_items().iter().map(|item| item.id()).collect();
    ledger.set_all_people(items[0], true);
    ledger.set_item_person(items[1], people[0], true);

    assert_eq!(ledger.assigned_names(items[0]), vec!["A", "B"]);
    let breakdown = ledger.person_item_breakdown(people[0]);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].personal_cost, 50.0);
    assert_eq!(breakdown[0].bill_name, "Bill 1");
    assert_eq!(
        breakdown[0].split_info().as_deref(),
        Some("100.00 divided by 2")
    );
    assert_eq!(breakdown[1].split_info(), None);

    let entries = SettlementService::settle(&ledger).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!((entries[0].direction, entries[0].amount), (Direction::Receive, 50.0));
    assert_eq!((entries[1].direction, entries[1].amount), (Direction::Pay, 50.0));
}

#[test]
fn removing_a_bill_drops_its_items() {
    let mut ledger = Ledger::new(SplitMode::ItemBased);
    let first_bill = ledger.bills()[0].id;
    let second_bill = ledger.add_bill().unwrap();
    assert_eq!(ledger.bills()[1].name(), "Bill 2");
    let extra = ledger.add_item(Some(second_bill));
    ledger.update_item_name(extra, "Cake");
    ledger.update_item_price(extra, 12.0);

    assert!(ledger.remove_bill(second_bill));
    assert!(ledger.assigned_item(extra).is_none());
    assert!(!ledger.remove_bill(first_bill));
    assert_eq!(ledger.bills().len(), 1);
}

#[test]
fn import_skips_rows_without_values() {
    let mut ledger = Ledger::new(SplitMode::PerHead);
    let count = ImportService::import(
        &mut ledger,
        ImportTarget::People,
        "John,300\nJane\nMike,200",
    )
    .unwrap();
    assert_eq!(count, 2);
    let names: Vec<&str> = ledger.people().iter().map(|person| person.name()).collect();
    assert_eq!(names, vec!["John", "Mike"]);
    assert_eq!(ledger.total_contributions(), 500.0);
}
