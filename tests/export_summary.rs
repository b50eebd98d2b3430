use billsplit_core::{
    core::services::ExportService,
    currency::CurrencyFormat,
    domain::SplitMode,
    ledger::Ledger,
};
use insta::assert_snapshot;

#[test]
fn summary_for_shared_and_solo_items() {
    let mut ledger = Ledger::new(SplitMode::ItemBased);
    let asha = ledger.people()[0].id;
    ledger.update_person_name(asha, "Asha");
    ledger.update_person_contribution(asha, 160.0);
    let ben = ledger.add_person();
    ledger.update_person_name(ben, "Ben");

    let tea = ledger.assigned_items()[0].id;
    ledger.update_item_name(tea, "Tea");
    ledger.update_item_price(tea, 100.0);
    ledger.set_all_people(tea, true);

    let dessert = ledger.add_bill().unwrap();
    ledger.rename_bill(dessert, "Dessert");
    let cake = ledger.add_item(Some(dessert));
    ledger.update_item_name(cake, "Cake");
    ledger.update_item_price(cake, 60.0);
    ledger.set_item_person(cake, asha, true);

    let text = ExportService::person_summary(&ledger, asha, &CurrencyFormat::default()).unwrap();
    assert_snapshot!(text, @r###"
    Asha's Bill Summary

    Items:
    - Tea (₹50.00 - 100.00 divided by 2)
    - Cake (₹60.00)

    Items total: ₹110.00
    Amount Asha has paid: ₹160.00
    Amount to receive: ₹50.00
    "###);

    let text = ExportService::person_summary(&ledger, ben, &CurrencyFormat::default()).unwrap();
    assert_snapshot!(text, @r###"
    Ben's Bill Summary

    Items:
    - Tea (₹50.00 - 100.00 divided by 2)

    Items total: ₹50.00
    Amount Ben has paid: ₹0.00
    Amount to pay: ₹50.00
    "###);
}
