//! Plain-text "copy summary" rendering and the clipboard hand-off.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::currency::CurrencyFormat;
use crate::domain::PersonStatement;
use crate::ledger::Ledger;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No named person with id {0}")]
    UnknownPerson(Uuid),
    #[error("Failed to copy text: {0}")]
    Clipboard(String),
}

/// Destination for exported text, typically the system clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Collects everything written to it; handy for tests and headless runs.
impl ClipboardSink for Vec<String> {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        self.push(text.to_string());
        Ok(())
    }
}

/// Transient "copied" flag that clears itself after a fixed interval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyIndicator {
    until: Option<DateTime<Utc>>,
}

impl CopyIndicator {
    pub fn arm(&mut self, now: DateTime<Utc>, feedback_ms: u64) {
        let span = i64::try_from(feedback_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX);
        self.until = Some(
            now.checked_add_signed(span)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn clear(&mut self) {
        self.until = None;
    }
}

pub struct ExportService;

impl ExportService {
    /// Renders the summary block for one valid person.
    pub fn person_summary(
        ledger: &Ledger,
        person_id: Uuid,
        currency: &CurrencyFormat,
    ) -> Result<String, ExportError> {
        let statement = ledger
            .person_statement(person_id)
            .ok_or(ExportError::UnknownPerson(person_id))?;
        Ok(Self::render(&statement, currency))
    }

    pub fn render(statement: &PersonStatement, currency: &CurrencyFormat) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{}'s Bill Summary", statement.name);
        text.push('\n');
        text.push_str("Items:\n");
        for share in &statement.shares {
            let _ = write!(
                text,
                "- {} ({}",
                share.item_name,
                currency.money(share.personal_cost)
            );
            if let Some(info) = share.split_info() {
                let _ = write!(text, " - {info}");
            }
            text.push_str(")\n");
        }
        let _ = writeln!(text, "\nItems total: {}", currency.money(statement.items_total));
        let _ = writeln!(
            text,
            "Amount {} has paid: {}",
            statement.name,
            currency.money(statement.amount_paid)
        );
        let _ = writeln!(
            text,
            "Amount to {}: {}",
            statement.direction(),
            currency.money(statement.difference().abs())
        );
        text
    }

    /// Sends a person's summary to `sink`. Failures are logged and returned
    /// but never touch the ledger.
    pub fn copy_person_summary(
        ledger: &Ledger,
        person_id: Uuid,
        currency: &CurrencyFormat,
        sink: &mut dyn ClipboardSink,
    ) -> Result<String, ExportError> {
        let text = Self::person_summary(ledger, person_id, currency)?;
        if let Err(err) = sink.write_text(&text) {
            tracing::error!(%err, "failed to copy person summary");
            return Err(err);
        }
        tracing::debug!(%person_id, bytes = text.len(), "copied person summary");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SplitMode;

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ExportError> {
            Err(ExportError::Clipboard("permission denied".into()))
        }
    }

    fn ledger_with_shared_tea() -> (Ledger, Uuid) {
        let mut ledger = Ledger::new(SplitMode::ItemBased);
        let asha = ledger.people()[0].id;
        ledger.update_person_name(asha, "Asha");
        ledger.update_person_contribution(asha, 80.0);
        let ben = ledger.add_person();
        ledger.update_person_name(ben, "Ben");
        let tea = ledger.assigned_items()[0].id;
        ledger.update_item_name(tea, "Tea");
        ledger.update_item_price(tea, 100.0);
        ledger.set_all_people(tea, true);
        (ledger, asha)
    }

    #[test]
    fn summary_lists_shares_and_balance() {
        let (ledger, asha) = ledger_with_shared_tea();
        let text =
            ExportService::person_summary(&ledger, asha, &CurrencyFormat::new("$")).unwrap();
        assert_eq!(
            text,
            "Asha's Bill Summary\n\nItems:\n- Tea ($50.00 - 100.00 divided by 2)\n\n\
             Items total: $50.00\nAmount Asha has paid: $80.00\nAmount to receive: $30.00\n"
        );
    }

    #[test]
    fn unknown_person_is_rejected() {
        let (ledger, _) = ledger_with_shared_tea();
        let err = ExportService::person_summary(&ledger, Uuid::new_v4(), &CurrencyFormat::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::UnknownPerson(_)));
    }

    #[test]
    fn clipboard_failure_is_reported() {
        let (ledger, asha) = ledger_with_shared_tea();
        let before = ledger.clone();
        let err = ExportService::copy_person_summary(
            &ledger,
            asha,
            &CurrencyFormat::default(),
            &mut BrokenClipboard,
        )
        .unwrap_err();
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(ledger, before);
    }

    #[test]
    fn indicator_expires_after_interval() {
        let now = Utc::now();
        let mut indicator = CopyIndicator::default();
        assert!(!indicator.is_active(now));
        indicator.arm(now, 2000);
        assert!(indicator.is_active(now + Duration::milliseconds(1999)));
        assert!(!indicator.is_active(now + Duration::milliseconds(2000)));
        indicator.clear();
        assert!(!indicator.is_active(now));
    }

    #[test]
    fn oversized_feedback_interval_keeps_indicator_on() {
        let now = Utc::now();
        let mut indicator = CopyIndicator::default();
        indicator.arm(now, u64::MAX);
        assert!(indicator.is_active(now));
        assert!(indicator.is_active(now + Duration::days(365)));
    }
}
