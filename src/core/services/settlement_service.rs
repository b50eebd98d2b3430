use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Person, SettlementEntry, SplitMode};
use crate::ledger::Ledger;

use super::validation_service::{ValidationService, SETTLEMENT_TOLERANCE};

#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    #[error("Contributions are off by {difference:.2} from the total")]
    ContributionMismatch { difference: f64 },
}

/// Computes who pays and who receives.
pub struct SettlementService;

impl SettlementService {
    /// Settles with the algorithm matching the ledger's mode.
    pub fn settle(ledger: &Ledger) -> Result<Vec<SettlementEntry>, SettlementError> {
        match ledger.mode() {
            SplitMode::PerHead => Self::equal_split(ledger),
            SplitMode::ItemBased => Ok(Self::per_item(ledger)),
        }
    }

    /// Everyone owes `total / valid people`. Refused unless contributions
    /// reconcile with the total.
    pub fn equal_split(ledger: &Ledger) -> Result<Vec<SettlementEntry>, SettlementError> {
        let Some(share) = ledger.per_head_share() else {
            return Ok(Vec::new());
        };
        let check = ValidationService::check_ledger(ledger);
        if !check.is_valid {
            tracing::warn!(difference = check.difference, "equal split refused");
            return Err(SettlementError::ContributionMismatch {
                difference: check.difference,
            });
        }
        let entries = settle_people(ledger.valid_people(), |_| share);
        tracing::info!(
            share,
            people = ledger.valid_people().count(),
            entries = entries.len(),
            "equal split settled"
        );
        Ok(entries)
    }

    /// Each item's price is divided among the people sharing it.
    pub fn per_item(ledger: &Ledger) -> Vec<SettlementEntry> {
        let obligations: HashMap<Uuid, f64> = Self::obligations(ledger).into_iter().collect();
        let entries = settle_people(ledger.valid_people(), |person| {
            obligations.get(&person.id).copied().unwrap_or(0.0)
        });
        tracing::info!(
            total = ledger.total(),
            entries = entries.len(),
            "per-item split settled"
        );
        entries
    }

    /// Accrued obligation of each valid person, in person order. People not
    /// sharing any item owe nothing.
    pub fn obligations(ledger: &Ledger) -> Vec<(Uuid, f64)> {
        let mut owed: Vec<(Uuid, f64)> = ledger
            .valid_people()
            .map(|person| (person.id, 0.0))
            .collect();
        for item in ledger.assigned_items().iter().filter(|item| item.is_assigned()) {
            let Some(share) = item.share_per_person() else {
                continue;
            };
            for (person_id, amount) in owed.iter_mut() {
                if item.includes(*person_id) {
                    *amount += share;
                }
            }
        }
        owed
    }
}

fn settle_people<'a>(
    people: impl Iterator<Item = &'a Person>,
    owed: impl Fn(&Person) -> f64,
) -> Vec<SettlementEntry> {
    people
        .map(|person| {
            SettlementEntry::from_difference(&person.name, person.contribution - owed(person))
        })
        .filter(|entry| entry.amount > SETTLEMENT_TOLERANCE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Identifiable};

    fn per_head(prices: &[f64], paid: &[(&str, f64)]) -> Ledger {
        let mut ledger = Ledger::new(SplitMode::PerHead);
        let first_item = ledger.line_items()[0].id();
        for (index, price) in prices.iter().enumerate() {
            let id = if index == 0 {
                first_item
            } else {
                ledger.add_item(None)
            };
            ledger.update_item_name(id, format!("Item {}", index + 1));
            ledger.update_item_price(id, *price);
        }
        let first_person = ledger.people()[0].id;
        for (index, (name, amount)) in paid.iter().enumerate() {
            let id = if index == 0 {
                first_person
            } else {
                ledger.add_person()
            };
            ledger.update_person_name(id, *name);
            ledger.update_person_contribution(id, *amount);
        }
        ledger
    }

    #[test]
    fn equal_split_fully_settled_yields_nothing() {
        let ledger = per_head(&[300.0], &[("A", 100.0), ("B", 100.0), ("C", 100.0)]);
        assert!(SettlementService::equal_split(&ledger).unwrap().is_empty());
    }

    #[test]
    fn equal_split_omits_people_who_paid_their_share() {
        let ledger = per_head(&[300.0], &[("A", 150.0), ("B", 100.0), ("C", 50.0)]);
        let entries = SettlementService::equal_split(&ledger).unwrap();
        assert_eq!(
            entries,
            vec![
                SettlementEntry {
                    name: "A".into(),
                    amount: 50.0,
                    direction: Direction::Receive
                },
                SettlementEntry {
                    name: "C".into(),
                    amount: 50.0,
                    direction: Direction::Pay
                },
            ]
        );
    }

    #[test]
    fn equal_split_refuses_mismatched_contributions() {
        let ledger = per_head(&[300.0], &[("A", 100.0), ("B", 100.0)]);
        let err = SettlementService::equal_split(&ledger).unwrap_err();
        assert_eq!(err, SettlementError::ContributionMismatch { difference: 100.0 });
        assert_eq!(err.to_string(), "Contributions are off by 100.00 from the total");
    }

    #[test]
    fn equal_split_without_valid_people_is_empty() {
        let ledger = per_head(&[0.0], &[("", 0.0)]);
        assert!(SettlementService::equal_split(&ledger).unwrap().is_empty());
    }

    #[test]
    fn equal_split_with_priced_items_but_no_named_people_is_empty() {
        let ledger = per_head(&[300.0], &[("", 0.0)]);
        assert_eq!(SettlementService::equal_split(&ledger), Ok(Vec::new()));
    }

    #[test]
    fn per_item_prorates_shared_items() {
        let mut ledger = Ledger::new(SplitMode::ItemBased);
        let a = ledger.people()[0].id;
        ledger.update_person_name(a, "A");
        ledger.update_person_contribution(a, 160.0);
        let b = ledger.add_person();
        ledger.update_person_name(b, "B");

        let tea = ledger.assigned_items()[0].id;
        ledger.update_item_name(tea, "Tea");
        ledger.update_item_price(tea, 100.0);
        ledger.set_all_people(tea, true);
        let coffee = ledger.add_item(None);
        ledger.update_item_name(coffee, "Coffee");
        ledger.update_item_price(coffee, 60.0);
        ledger.set_item_person(coffee, a, true);

        assert_eq!(SettlementService::obligations(&ledger), vec![(a, 110.0), (b, 50.0)]);
        let entries = SettlementService::per_item(&ledger);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].direction, Direction::Receive);
        assert_eq!(entries[0].amount, 50.0);
        assert_eq!(entries[1].name, "B");
        assert_eq!(entries[1].direction, Direction::Pay);
        assert_eq!(entries[1].amount, 50.0);
    }

    #[test]
    fn per_item_settles_despite_mismatch() {
        let mut ledger = Ledger::new(SplitMode::ItemBased);
        let a = ledger.people()[0].id;
        ledger.update_person_name(a, "A");
        let item = ledger.assigned_items()[0].id;
        ledger.update_item_name(item, "Cake");
        ledger.update_item_price(item, 30.0);
        ledger.set_item_person(item, a, true);

        assert!(!ValidationService::check_ledger(&ledger).is_valid);
        let entries = SettlementService::settle(&ledger).unwrap();
        assert_eq!(entries[0].direction, Direction::Pay);
        assert_eq!(entries[0].amount, 30.0);
    }

    #[test]
    fn unassigned_people_owe_nothing() {
        let mut ledger = Ledger::new(SplitMode::ItemBased);
        let a = ledger.people()[0].id;
        ledger.update_person_name(a, "A");
        ledger.update_person_contribution(a, 20.0);
        let item = ledger.assigned_items()[0].id;
        ledger.update_item_name(item, "Soup");
        ledger.update_item_price(item, 20.0);

        assert_eq!(SettlementService::obligations(&ledger), vec![(a, 0.0)]);
        let entries = SettlementService::per_item(&ledger);
        assert_eq!(entries[0].direction, Direction::Receive);
        assert_eq!(entries[0].amount, 20.0);
    }
}
