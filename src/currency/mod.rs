//! Money formatting for display and text export.
//!
//! Arithmetic stays in plain `f64`; rounding only happens here, at the edge.

use serde::{Deserialize, Serialize};

/// Symbol used when no configuration overrides it.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Rounds to cents with halves going away from zero.
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0.00".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a value with exactly two decimals and no symbol.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round_cents(value))
}

/// Currency presentation preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Formats a value as `<symbol><amount>`, e.g. `₹12.50`.
    pub fn money(&self, value: f64) -> String {
        format!("{}{}", self.symbol, format_amount(value))
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}
