use serde::{Deserialize, Serialize};

use crate::currency::format_amount;
use crate::domain::SplitMode;
use crate::ledger::Ledger;

/// Differences up to one cent are treated as settled.
pub const SETTLEMENT_TOLERANCE: f64 = 0.01;

/// Whether declared contributions reconcile with the computed total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionCheck {
    pub is_valid: bool,
    pub difference: f64,
    pub message: String,
}

pub struct ValidationService;

impl ValidationService {
    pub fn check(total: f64, contributions: f64, mode: SplitMode) -> ContributionCheck {
        let difference = (total - contributions).abs();
        let message = if total > contributions {
            format!("Missing {} in contributions", format_amount(total - contributions))
        } else if total < contributions {
            format!("Excess {} in contributions", format_amount(contributions - total))
        } else {
            match mode {
                SplitMode::PerHead => "Contributions match total!".to_string(),
                SplitMode::ItemBased => "Contributions match items total!".to_string(),
            }
        };
        ContributionCheck {
            is_valid: difference < SETTLEMENT_TOLERANCE,
            difference,
            message,
        }
    }

    /// Checks the ledger's current total against its contributions.
    pub fn check_ledger(ledger: &Ledger) -> ContributionCheck {
        Self::check(ledger.total(), ledger.total_contributions(), ledger.mode())
    }

    /// Prompt shown before settling an item-based split that does not reconcile.
    pub fn mismatch_prompt(total: f64, contributions: f64) -> String {
        format!(
            "Items total ({}) and contributions ({}) don't match. Do you want to continue anyway?",
            format_amount(total),
            format_amount(contributions)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_reports_missing_amount() {
        let check = ValidationService::check(300.0, 250.0, SplitMode::PerHead);
        assert!(!check.is_valid);
        assert_eq!(check.difference, 50.0);
        assert_eq!(check.message, "Missing 50.00 in contributions");
    }

    #[test]
    fn overage_reports_excess_amount() {
        let check = ValidationService::check(100.0, 112.5, SplitMode::ItemBased);
        assert!(!check.is_valid);
        assert_eq!(check.message, "Excess 12.50 in contributions");
    }

    #[test]
    fn exact_match_wording_depends_on_mode() {
        let per_head = ValidationService::check(90.0, 90.0, SplitMode::PerHead);
        assert!(per_head.is_valid);
        assert_eq!(per_head.message, "Contributions match total!");
        let itemized = ValidationService::check(90.0, 90.0, SplitMode::ItemBased);
        assert_eq!(itemized.message, "Contributions match items total!");
    }

    #[test]
    fn sub_cent_gap_is_still_valid() {
        let check = ValidationService::check(0.1 + 0.2, 0.3, SplitMode::PerHead);
        assert!(check.is_valid);
        assert!(!ValidationService::check(10.0, 9.98, SplitMode::PerHead).is_valid);
    }

    #[test]
    fn mismatch_prompt_lists_both_figures() {
        assert_eq!(
            ValidationService::mismatch_prompt(120.0, 100.0),
            "Items total (120.00) and contributions (100.00) don't match. Do you want to continue anyway?"
        );
    }
}
