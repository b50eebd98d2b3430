use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Groups assignable items in item-based mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub name: String,
    /// Name generated at creation time, used to tell edited bills apart.
    pub default_name: String,
}

impl Bill {
    /// Creates the `position`-th bill (1-based) with its generated label.
    pub fn numbered(position: usize) -> Self {
        let name = format!("Bill {position}");
        Self {
            id: Uuid::new_v4(),
            name: name.clone(),
            default_name: name,
        }
    }

    pub fn is_renamed(&self) -> bool {
        self.name != self.default_name
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Bill {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}
