//! The in-memory ledger: bills, items, and people for one splitting session.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::{ItemSheet, Ledger};
