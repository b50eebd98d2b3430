use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;

    /// Records only take part in totals once they carry a non-blank name.
    fn has_name(&self) -> bool {
        !self.name().trim().is_empty()
    }
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// The two ways a group can split its cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// Everyone owes the same share of the total.
    #[default]
    PerHead,
    /// Each item is divided among the people who consumed it.
    ItemBased,
}

impl SplitMode {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "per-head" | "perhead" | "equal" => Some(SplitMode::PerHead),
            "item-based" | "itembased" | "items" | "individual-items" => {
                Some(SplitMode::ItemBased)
            }
            _ => None,
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SplitMode::PerHead => "per-head",
            SplitMode::ItemBased => "item-based",
        };
        f.write_str(label)
    }
}

/// Clamps user-entered money to a finite, non-negative value.
pub(crate) fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use serde;
pub use uuid;
