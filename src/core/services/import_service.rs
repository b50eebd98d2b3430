//! Two-column `name,value` text import for people and items.

use std::fmt;

use thiserror::Error;

use crate::domain::Person;
use crate::ledger::Ledger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("No {target} rows found. Expected `name,value` per line.")]
    NoRows { target: ImportTarget },
}

/// Collection an import replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    People,
    Items,
}

impl ImportTarget {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "people" | "person" => Some(ImportTarget::People),
            "items" | "item" => Some(ImportTarget::Items),
            _ => None,
        }
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportTarget::People => f.write_str("people"),
            ImportTarget::Items => f.write_str("items"),
        }
    }
}

pub struct ImportService;

impl ImportService {
    /// Splits text into `(name, value)` rows. Lines with fewer than two
    /// fields or a blank name are skipped; unparsable values become `0`.
    pub fn parse_rows(text: &str) -> Vec<(String, f64)> {
        text.trim()
            .lines()
            .filter_map(|line| {
                let cells: Vec<&str> = line.split(',').map(str::trim).collect();
                if cells.len() < 2 || cells[0].is_empty() {
                    return None;
                }
                Some((cells[0].to_string(), parse_leading_decimal(cells[1])))
            })
            .collect()
    }

    /// Replaces the target collection with the parsed rows. Nothing changes
    /// when no row survives parsing.
    pub fn import(
        ledger: &mut Ledger,
        target: ImportTarget,
        text: &str,
    ) -> Result<usize, ImportError> {
        let rows = Self::parse_rows(text);
        let count = rows.len();
        let replaced = match target {
            ImportTarget::People => ledger.replace_people(
                rows.into_iter()
                    .map(|(name, contribution)| Person::new(name, contribution))
                    .collect(),
            ),
            ImportTarget::Items => ledger.replace_items(rows),
        };
        if !replaced {
            tracing::warn!(%target, "import produced no rows");
            return Err(ImportError::NoRows { target });
        }
        tracing::info!(%target, count, "imported rows");
        Ok(count)
    }
}

/// Reads a decimal, falling back to the longest numeric prefix, e.g.
/// `"12.5kg"` is `12.5` and `"2.5E2"` is `250`.
fn parse_leading_decimal(raw: &str) -> f64 {
    if let Ok(value) = raw.parse::<f64>() {
        if value.is_finite() {
            return value;
        }
    }
    let end = numeric_prefix_len(raw.as_bytes());
    raw[..end].parse::<f64>().unwrap_or(0.0)
}

/// Length of `[+-]digits[.digits][(e|E)[+-]digits]`, or 0 without a digit.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_end = digits_from(end);
    let mut seen_digit = integer_end > end;
    end = integer_end;
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        seen_digit |= fraction_end > end + 1;
        end = fraction_end;
    }
    if !seen_digit {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }
    end
}
