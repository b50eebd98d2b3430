//! Derived settlement records. None of these are persisted; they are rebuilt
//! from the ledger on every request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::format_amount;

/// Whether a person owes money or is owed money.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Pay,
    Receive,
}

impl Direction {
    /// Non-negative differences (paid minus owed) receive, negative ones pay.
    pub fn from_difference(difference: f64) -> Self {
        if difference >= 0.0 {
            Direction::Receive
        } else {
            Direction::Pay
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Pay => "pay",
            Direction::Receive => "receive",
        };
        f.write_str(label)
    }
}

/// One pay/receive obligation produced by settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementEntry {
    pub name: String,
    pub amount: f64,
    pub direction: Direction,
}

impl SettlementEntry {
    pub fn from_difference(name: impl Into<String>, difference: f64) -> Self {
        Self {
            name: name.into(),
            amount: difference.abs(),
            direction: Direction::from_difference(difference),
        }
    }
}

/// One line of a person's item breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemShare {
    pub item_name: String,
    pub bill_name: String,
    pub total_cost: f64,
    pub personal_cost: f64,
    pub split_count: usize,
}

impl ItemShare {
    /// Human-readable split note, present only for shared items.
    pub fn split_info(&self) -> Option<String> {
        (self.split_count > 1).then(|| {
            format!(
                "{} divided by {}",
                format_amount(self.total_cost),
                self.split_count
            )
        })
    }
}

/// Everything needed to explain one person's position.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonStatement {
    pub name: String,
    pub shares: Vec<ItemShare>,
    pub items_total: f64,
    pub amount_paid: f64,
}

impl PersonStatement {
    /// Amount paid minus the cost of the items assigned to this person.
    pub fn difference(&self) -> f64 {
        self.amount_paid - self.items_total
    }

    pub fn direction(&self) -> Direction {
        Direction::from_difference(self.difference())
    }
}
