pub mod bill;
pub mod common;
pub mod item;
pub mod person;
pub mod settlement;

pub use bill::Bill;
pub use common::{Displayable, Identifiable, NamedEntity, SplitMode};
pub use item::{AssignedItem, Item, LineItem};
pub use person::Person;
pub use settlement::{Direction, ItemShare, PersonStatement, SettlementEntry};
