use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A participant in the split together with what they actually paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub contribution: f64,
}

impl Person {
    pub fn new(name: impl Into<String>, contribution: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contribution: sanitize_amount(contribution),
        }
    }

    /// An editable row with no name and nothing paid.
    pub fn blank() -> Self {
        Self::new("", 0.0)
    }

    pub fn is_valid(&self) -> bool {
        self.has_name()
    }
}

impl Identifiable for Person {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Person {
    fn display_label(&self) -> String {
        format!("{} (paid {:.2})", self.name, self.contribution)
    }
}
