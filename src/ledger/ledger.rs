use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::sanitize_amount;
use crate::domain::{
    AssignedItem, Bill, Identifiable, Item, ItemShare, LineItem, NamedEntity, Person,
    PersonStatement, SplitMode,
};

/// Item collection, shaped by the active split mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ItemSheet {
    /// Per-head mode: flat items, no bills.
    Shared { items: Vec<Item> },
    /// Item-based mode: items grouped in bills and assigned to people.
    Itemized {
        bills: Vec<Bill>,
        items: Vec<AssignedItem>,
    },
}

impl ItemSheet {
    fn initial(mode: SplitMode) -> Self {
        match mode {
            SplitMode::PerHead => ItemSheet::Shared {
                items: vec![Item::blank()],
            },
            SplitMode::ItemBased => {
                let bill = Bill::numbered(1);
                let item = AssignedItem::blank(bill.id);
                ItemSheet::Itemized {
                    bills: vec![bill],
                    items: vec![item],
                }
            }
        }
    }
}

/// Working set of a single session.
///
/// Every collection keeps at least one editable row. Removals that would
/// empty a collection are ignored, as are updates addressed to unknown ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    people: Vec<Person>,
    sheet: ItemSheet,
}

impl Ledger {
    pub fn new(mode: SplitMode) -> Self {
        Self {
            people: vec![Person::blank()],
            sheet: ItemSheet::initial(mode),
        }
    }

    pub fn mode(&self) -> SplitMode {
        match self.sheet {
            ItemSheet::Shared { .. } => SplitMode::PerHead,
            ItemSheet::Itemized { .. } => SplitMode::ItemBased,
        }
    }

    pub fn sheet(&self) -> &ItemSheet {
        &self.sheet
    }

    // ---- people -------------------------------------------------------------

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, id: Uuid) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn valid_people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.iter().filter(|person| person.is_valid())
    }

    pub fn has_valid_people(&self) -> bool {
        self.valid_people().next().is_some()
    }

    pub fn add_person(&mut self) -> Uuid {
        let person = Person::blank();
        let id = person.id;
        self.people.push(person);
        id
    }

    pub fn update_person_name(&mut self, id: Uuid, name: impl Into<String>) {
        if let Some(person) = self.people.iter_mut().find(|person| person.id == id) {
            person.name = name.into();
        }
    }

    pub fn update_person_contribution(&mut self, id: Uuid, contribution: f64) {
        if let Some(person) = self.people.iter_mut().find(|person| person.id == id) {
            person.contribution = sanitize_amount(contribution);
        }
    }

    /// Removes a person and scrubs them from every item assignment.
    /// Returns `false` when the person is unknown or is the last row.
    pub fn remove_person(&mut self, id: Uuid) -> bool {
        if self.people.len() <= 1 || self.person(id).is_none() {
            return false;
        }
        self.people.retain(|person| person.id != id);
        if let ItemSheet::Itemized { items, .. } = &mut self.sheet {
            for item in items.iter_mut() {
                item.included_people.remove(&id);
            }
        }
        true
    }

    /// Replaces the whole People collection. An empty batch is ignored.
    pub fn replace_people(&mut self, people: Vec<Person>) -> bool {
        if people.is_empty() {
            return false;
        }
        self.people = people;
        self.retain_known_assignments();
        true
    }

    /// Drops people without a name, keeping at least one row.
    pub fn prune_invalid_people(&mut self) {
        if !self.has_valid_people() {
            return;
        }
        self.people.retain(Person::is_valid);
        self.retain_known_assignments();
    }

    fn retain_known_assignments(&mut self) {
        let known: Vec<Uuid> = self.people.iter().map(|person| person.id).collect();
        if let ItemSheet::Itemized { items, .. } = &mut self.sheet {
            for item in items.iter_mut() {
                item.included_people.retain(|id| known.contains(id));
            }
        }
    }

    // ---- bills --------------------------------------------------------------

    /// Bills of the current sheet; always empty in per-head mode.
    pub fn bills(&self) -> &[Bill] {
        match &self.sheet {
            ItemSheet::Shared { .. } => &[],
            ItemSheet::Itemized { bills, .. } => bills,
        }
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        self.bills().iter().find(|bill| bill.id == id)
    }

    pub fn add_bill(&mut self) -> Option<Uuid> {
        let ItemSheet::Itemized { bills, .. } = &mut self.sheet else {
            return None;
        };
        let bill = Bill::numbered(bills.len() + 1);
        let id = bill.id;
        bills.push(bill);
        Some(id)
    }

    pub fn rename_bill(&mut self, id: Uuid, name: impl Into<String>) {
        if let ItemSheet::Itemized { bills, .. } = &mut self.sheet {
            if let Some(bill) = bills.iter_mut().find(|bill| bill.id == id) {
                bill.name = name.into();
            }
        }
    }

    /// Removes a bill together with its items. The last bill is never removed.
    pub fn remove_bill(&mut self, id: Uuid) -> bool {
        let ItemSheet::Itemized { bills, items } = &mut self.sheet else {
            return false;
        };
        if bills.len() <= 1 || !bills.iter().any(|bill| bill.id == id) {
            return false;
        }
        bills.retain(|bill| bill.id != id);
        items.retain(|item| item.bill_id != id);
        if items.is_empty() {
            items.push(AssignedItem::blank(bills[0].id));
        }
        true
    }

    // ---- items --------------------------------------------------------------

    /// All items regardless of variant, in insertion order.
    pub fn line_items(&self) -> Vec<&dyn LineItem> {
        match &self.sheet {
            ItemSheet::Shared { items } => items.iter().map(|item| item as &dyn LineItem).collect(),
            ItemSheet::Itemized { items, .. } => {
                items.iter().map(|item| item as &dyn LineItem).collect()
            }
        }
    }

    /// Assignable items; empty in per-head mode.
    pub fn assigned_items(&self) -> &[AssignedItem] {
        match &self.sheet {
            ItemSheet::Shared { .. } => &[],
            ItemSheet::Itemized { items, .. } => items,
        }
    }

    pub fn assigned_item(&self, id: Uuid) -> Option<&AssignedItem> {
        self.assigned_items().iter().find(|item| item.id == id)
    }

    pub fn item_count(&self) -> usize {
        match &self.sheet {
            ItemSheet::Shared { items } => items.len(),
            ItemSheet::Itemized { items, .. } => items.len(),
        }
    }

    pub fn has_valid_items(&self) -> bool {
        self.line_items().iter().any(|item| item.is_valid())
    }

    /// True when at least one valid item is shared by somebody.
    pub fn has_assigned_items(&self) -> bool {
        self.assigned_items().iter().any(AssignedItem::is_assigned)
    }

    /// Appends a blank item. In item-based mode it joins `bill`, falling back
    /// to the first bill when `bill` is absent or unknown.
    pub fn add_item(&mut self, bill: Option<Uuid>) -> Uuid {
        match &mut self.sheet {
            ItemSheet::Shared { items } => {
                let item = Item::blank();
                let id = item.id;
                items.push(item);
                id
            }
            ItemSheet::Itemized { bills, items } => {
                let bill_id = bill
                    .filter(|id| bills.iter().any(|bill| bill.id == *id))
                    .unwrap_or(bills[0].id);
                let item = AssignedItem::blank(bill_id);
                let id = item.id;
                items.push(item);
                id
            }
        }
    }

    pub fn update_item_name(&mut self, id: Uuid, name: impl Into<String>) {
        let name = name.into();
        match &mut self.sheet {
            ItemSheet::Shared { items } => {
                if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                    item.name = name;
                }
            }
            ItemSheet::Itemized { items, .. } => {
                if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                    item.name = name;
                }
            }
        }
    }

    pub fn update_item_price(&mut self, id: Uuid, price: f64) {
        let price = sanitize_amount(price);
        match &mut self.sheet {
            ItemSheet::Shared { items } => {
                if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                    item.price = price;
                }
            }
            ItemSheet::Itemized { items, .. } => {
                if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                    item.price = price;
                }
            }
        }
    }

    pub fn remove_item(&mut self, id: Uuid) -> bool {
        match &mut self.sheet {
            ItemSheet::Shared { items } => remove_keeping_one(items, id),
            ItemSheet::Itemized { items, .. } => remove_keeping_one(items, id),
        }
    }

    /// Includes or excludes one person from an item.
    pub fn set_item_person(&mut self, item_id: Uuid, person_id: Uuid, included: bool) {
        if self.person(person_id).is_none() {
            return;
        }
        let ItemSheet::Itemized { items, .. } = &mut self.sheet else {
            return;
        };
        if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
            if included {
                item.included_people.insert(person_id);
            } else {
                item.included_people.remove(&person_id);
            }
        }
    }

    /// Assigns every valid person to an item, or clears its assignment.
    pub fn set_all_people(&mut self, item_id: Uuid, included: bool) {
        let everyone: Vec<Uuid> = self.valid_people().map(|person| person.id).collect();
        let ItemSheet::Itemized { items, .. } = &mut self.sheet else {
            return;
        };
        if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
            item.included_people.clear();
            if included {
                item.included_people.extend(everyone);
            }
        }
    }

    /// Replaces every item with `rows` of `(name, price)`. Item-based rows join
    /// the first bill with nobody assigned. An empty batch is ignored.
    pub fn replace_items(&mut self, rows: Vec<(String, f64)>) -> bool {
        if rows.is_empty() {
            return false;
        }
        match &mut self.sheet {
            ItemSheet::Shared { items } => {
                *items = rows
                    .into_iter()
                    .map(|(name, price)| Item::new(name, price))
                    .collect();
            }
            ItemSheet::Itemized { bills, items } => {
                let bill_id = bills[0].id;
                *items = rows
                    .into_iter()
                    .map(|(name, price)| AssignedItem::new(name, price, bill_id))
                    .collect();
            }
        }
        true
    }

    /// Drops unnamed or unpriced items, keeping at least one row.
    pub fn prune_invalid_items(&mut self) {
        if !self.has_valid_items() {
            return;
        }
        match &mut self.sheet {
            ItemSheet::Shared { items } => items.retain(|item| item.is_valid()),
            ItemSheet::Itemized { items, .. } => items.retain(|item| item.is_valid()),
        }
    }

    // ---- derived queries ----------------------------------------------------

    /// Sum of valid item prices.
    pub fn total(&self) -> f64 {
        self.line_items()
            .iter()
            .filter(|item| item.is_valid())
            .map(|item| item.price())
            .sum()
    }

    /// Sum of every person's contribution, named or not.
    pub fn total_contributions(&self) -> f64 {
        self.people.iter().map(|person| person.contribution).sum()
    }

    pub fn has_user_input(&self) -> bool {
        let items = self
            .line_items()
            .iter()
            .any(|item| item.has_name() || item.price() > 0.0);
        let people = self
            .people
            .iter()
            .any(|person| person.has_name() || person.contribution > 0.0);
        let bills = self.bills().iter().any(Bill::is_renamed);
        items || people || bills
    }

    /// Equal share of the total per valid person.
    pub fn per_head_share(&self) -> Option<f64> {
        let count = self.valid_people().count();
        (count > 0).then(|| self.total() / count as f64)
    }

    /// Valid items of one bill, in order.
    pub fn items_for_bill(&self, bill_id: Uuid) -> Vec<&AssignedItem> {
        self.assigned_items()
            .iter()
            .filter(|item| item.bill_id == bill_id && item.is_valid())
            .collect()
    }

    /// Names of the people sharing an item, in person order.
    pub fn assigned_names(&self, item_id: Uuid) -> Vec<&str> {
        let Some(item) = self.assigned_item(item_id) else {
            return Vec::new();
        };
        self.people
            .iter()
            .filter(|person| item.includes(person.id))
            .map(|person| person.name())
            .collect()
    }

    /// Valid items shared by a valid person, each with that person's cost.
    pub fn person_item_breakdown(&self, person_id: Uuid) -> Vec<ItemShare> {
        if !self.valid_people().any(|person| person.id == person_id) {
            return Vec::new();
        }
        self.assigned_items()
            .iter()
            .filter(|item| item.is_valid() && item.includes(person_id))
            .map(|item| {
                let split_count = item.included_people.len().max(1);
                ItemShare {
                    item_name: item.name.clone(),
                    bill_name: self
                        .bill(item.bill_id)
                        .map(|bill| bill.name.clone())
                        .unwrap_or_else(|| "Unknown Bill".to_string()),
                    total_cost: item.price,
                    personal_cost: item.price / split_count as f64,
                    split_count,
                }
            })
            .collect()
    }

    /// Breakdown plus totals for one valid person.
    pub fn person_statement(&self, person_id: Uuid) -> Option<PersonStatement> {
        let person = self
            .valid_people()
            .find(|person| person.id == person_id)?;
        let shares = self.person_item_breakdown(person_id);
        let items_total = shares.iter().map(|share| share.personal_cost).sum();
        Some(PersonStatement {
            name: person.name.clone(),
            shares,
            items_total,
            amount_paid: person.contribution,
        })
    }
}

fn remove_keeping_one<T: Identifiable>(rows: &mut Vec<T>, id: Uuid) -> bool {
    if rows.len() <= 1 || !rows.iter().any(|row| row.id() == id) {
        return false;
    }
    rows.retain(|row| row.id() != id);
    true
}
