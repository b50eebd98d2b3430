use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Behaviour shared by both item variants.
pub trait LineItem: Identifiable + NamedEntity {
    fn price(&self) -> f64;

    /// Only named items with a positive price count toward totals.
    fn is_valid(&self) -> bool {
        self.has_name() && self.price() > 0.0
    }
}

/// A flat line item used when the total is split per head.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price: sanitize_amount(price),
        }
    }

    pub fn blank() -> Self {
        Self::new("", 0.0)
    }
}

/// A line item that belongs to a bill and is shared by a chosen set of people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignedItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub bill_id: Uuid,
    #[serde(default)]
    pub included_people: BTreeSet<Uuid>,
}

impl AssignedItem {
    pub fn new(name: impl Into<String>, price: f64, bill_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price: sanitize_amount(price),
            bill_id,
            included_people: BTreeSet::new(),
        }
    }

    pub fn blank(bill_id: Uuid) -> Self {
        Self::new("", 0.0, bill_id)
    }

    pub fn with_people(mut self, people: impl IntoIterator<Item = Uuid>) -> Self {
        self.included_people.extend(people);
        self
    }

    pub fn includes(&self, person_id: Uuid) -> bool {
        self.included_people.contains(&person_id)
    }

    /// Valid and shared by at least one person, so it can be settled.
    pub fn is_assigned(&self) -> bool {
        self.is_valid() && !self.included_people.is_empty()
    }

    /// Cost carried by each included person, if anyone is included.
    pub fn share_per_person(&self) -> Option<f64> {
        let count = self.included_people.len();
        (count > 0).then(|| self.price / count as f64)
    }
}

impl Identifiable for Item {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Item {
    fn name(&self) -> &str {
        &self.name
    }
}

impl LineItem for Item {
    fn price(&self) -> f64 {
        self.price
    }
}

impl Displayable for Item {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.name, self.price)
    }
}

impl Identifiable for AssignedItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for AssignedItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl LineItem for AssignedItem {
    fn price(&self) -> f64 {
        self.price
    }
}

impl Displayable for AssignedItem {
    fn display_label(&self) -> String {
        format!(
            "{} ({:.2}, {} sharing)",
            self.name,
            self.price,
            self.included_people.len()
        )
    }
}
