//! Screen state machine for the guided split.
//!
//! Per-head: `mode-selection → items → people → results`.
//! Item-based: `mode-selection → people → bill → assign-items → results`.
//! `results` is not terminal; it can jump back to any editing screen or reset.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::core::services::{
    ClipboardSink, ContributionCheck, CopyIndicator, ExportError, ExportService, ImportService,
    ImportTarget, SettlementError, SettlementService, ValidationService,
};
use crate::currency::CurrencyFormat;
use crate::domain::{SettlementEntry, SplitMode};
use crate::errors::LedgerError;
use crate::ledger::Ledger;

/// Prompt shown before a reset that would discard entered data.
pub const HOME_PROMPT: &str = "Your progress will be lost. Are you sure you want to go home?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    ModeSelection,
    Items,
    People,
    Bill,
    AssignItems,
    Results,
}

impl Screen {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mode" | "mode-selection" => Some(Screen::ModeSelection),
            "items" => Some(Screen::Items),
            "people" => Some(Screen::People),
            "bill" | "bills" => Some(Screen::Bill),
            "assign" | "assign-items" => Some(Screen::AssignItems),
            "results" => Some(Screen::Results),
            _ => None,
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(
            self,
            Screen::Items | Screen::People | Screen::Bill | Screen::AssignItems
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Screen::ModeSelection => "mode-selection",
            Screen::Items => "items",
            Screen::People => "people",
            Screen::Bill => "bill",
            Screen::AssignItems => "assign-items",
            Screen::Results => "results",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("`{action}` is not available on the {screen} screen")]
    NotAvailable { screen: Screen, action: &'static str },
    #[error("The {target} screen is not part of the {mode} flow")]
    NotInFlow { target: Screen, mode: SplitMode },
    #[error("Add at least one item with a name and a price")]
    NoValidItems,
    #[error("Add at least one person with a name")]
    NoValidPeople,
    #[error("Assign at least one item to somebody")]
    NoAssignedItems,
    #[error("Settlement cancelled")]
    Declined,
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

/// Decides prompts raised at transition boundaries.
pub trait ConfirmationGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationGate for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Screen reached by a forward step, ignoring guards.
pub fn next_screen(mode: SplitMode, screen: Screen) -> Option<Screen> {
    match (mode, screen) {
        (SplitMode::PerHead, Screen::Items) => Some(Screen::People),
        (SplitMode::PerHead, Screen::People) => Some(Screen::Results),
        (SplitMode::ItemBased, Screen::People) => Some(Screen::Bill),
        (SplitMode::ItemBased, Screen::Bill) => Some(Screen::AssignItems),
        (SplitMode::ItemBased, Screen::AssignItems) => Some(Screen::Results),
        _ => None,
    }
}

/// Screen reached by a backward step.
pub fn previous_screen(mode: SplitMode, screen: Screen) -> Screen {
    match (mode, screen) {
        (SplitMode::PerHead, Screen::People) => Screen::Items,
        (SplitMode::PerHead, Screen::Results) => Screen::People,
        (SplitMode::ItemBased, Screen::Bill) => Screen::People,
        (SplitMode::ItemBased, Screen::AssignItems) => Screen::Bill,
        (SplitMode::ItemBased, Screen::Results) => Screen::AssignItems,
        _ => Screen::ModeSelection,
    }
}

/// Editing screens that belong to a mode's flow.
pub fn editing_screens(mode: SplitMode) -> &'static [Screen] {
    match mode {
        SplitMode::PerHead => &[Screen::Items, Screen::People],
        SplitMode::ItemBased => &[Screen::People, Screen::Bill, Screen::AssignItems],
    }
}

/// One user's splitting session: mode, active screen, ledger, and results.
#[derive(Debug, Clone)]
pub struct Session {
    mode: SplitMode,
    screen: Screen,
    ledger: Ledger,
    results: Vec<SettlementEntry>,
    copy_indicator: CopyIndicator,
    currency: CurrencyFormat,
    copy_feedback_ms: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            mode: SplitMode::default(),
            screen: Screen::ModeSelection,
            ledger: Ledger::new(SplitMode::default()),
            results: Vec::new(),
            copy_indicator: CopyIndicator::default(),
            currency: config.currency_format(),
            copy_feedback_ms: config.copy_feedback_ms,
        }
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn results(&self) -> &[SettlementEntry] {
        &self.results
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn apply_config(&mut self, config: &Config) {
        self.currency = config.currency_format();
        self.copy_feedback_ms = config.copy_feedback_ms;
    }

    /// Live contribution check for the current ledger.
    pub fn check(&self) -> ContributionCheck {
        ValidationService::check_ledger(&self.ledger)
    }

    /// `(step, steps)` for progress indicators; step 0 is mode selection.
    pub fn progress(&self) -> (usize, usize) {
        let steps = match self.mode {
            SplitMode::PerHead => 3,
            SplitMode::ItemBased => 4,
        };
        let step = match (self.mode, self.screen) {
            (_, Screen::ModeSelection) => 0,
            (SplitMode::PerHead, Screen::Items) => 1,
            (SplitMode::PerHead, Screen::People) => 2,
            (SplitMode::PerHead, _) => 3,
            (SplitMode::ItemBased, Screen::People) => 1,
            (SplitMode::ItemBased, Screen::Bill) => 2,
            (SplitMode::ItemBased, Screen::AssignItems) => 3,
            (SplitMode::ItemBased, _) => 4,
        };
        (step, steps)
    }

    /// Starts a fresh split in `mode`, discarding any entered data.
    pub fn select_mode(&mut self, mode: SplitMode) -> Result<Screen, TransitionError> {
        if self.screen != Screen::ModeSelection {
            return Err(TransitionError::NotAvailable {
                screen: self.screen,
                action: "mode",
            });
        }
        self.mode = mode;
        self.ledger = Ledger::new(mode);
        self.results.clear();
        self.copy_indicator.clear();
        self.screen = match mode {
            SplitMode::PerHead => Screen::Items,
            SplitMode::ItemBased => Screen::People,
        };
        tracing::info!(%mode, screen = %self.screen, "mode selected");
        Ok(self.screen)
    }

    /// Mutable ledger access, granted only on editing screens. Stored
    /// results are discarded because they no longer reflect the ledger.
    pub fn ledger_mut(&mut self) -> Result<&mut Ledger, TransitionError> {
        if !self.screen.is_editing() {
            return Err(TransitionError::NotAvailable {
                screen: self.screen,
                action: "edit",
            });
        }
        self.results.clear();
        Ok(&mut self.ledger)
    }

    /// Replaces people or items from pasted `name,value` text.
    pub fn import(&mut self, target: ImportTarget, text: &str) -> Result<usize, LedgerError> {
        let ledger = self.ledger_mut()?;
        Ok(ImportService::import(ledger, target, text)?)
    }

    /// Moves forward if the current screen's guard passes. Entering
    /// `results` runs settlement; an item-based mismatch needs `gate` to agree.
    pub fn advance(&mut self, gate: &mut dyn ConfirmationGate) -> Result<Screen, TransitionError> {
        let Some(target) = next_screen(self.mode, self.screen) else {
            return Err(TransitionError::NotAvailable {
                screen: self.screen,
                action: "next",
            });
        };
        match (self.mode, self.screen) {
            (SplitMode::PerHead, Screen::Items) | (SplitMode::ItemBased, Screen::Bill) => {
                if !self.ledger.has_valid_items() {
                    return Err(TransitionError::NoValidItems);
                }
                self.ledger.prune_invalid_items();
            }
            (SplitMode::ItemBased, Screen::People) => {
                if !self.ledger.has_valid_people() {
                    return Err(TransitionError::NoValidPeople);
                }
                self.ledger.prune_invalid_people();
            }
            (SplitMode::PerHead, Screen::People) => {
                if !self.ledger.has_valid_people() {
                    return Err(TransitionError::NoValidPeople);
                }
                self.results = SettlementService::equal_split(&self.ledger)?;
            }
            (SplitMode::ItemBased, Screen::AssignItems) => {
                if !self.ledger.has_assigned_items() {
                    return Err(TransitionError::NoAssignedItems);
                }
                let check = self.check();
                if !check.is_valid {
                    let prompt = ValidationService::mismatch_prompt(
                        self.ledger.total(),
                        self.ledger.total_contributions(),
                    );
                    if !gate.confirm(&prompt) {
                        tracing::info!("item-based settlement declined at mismatch prompt");
                        return Err(TransitionError::Declined);
                    }
                }
                self.results = SettlementService::per_item(&self.ledger);
            }
            _ => {}
        }
        tracing::info!(from = %self.screen, to = %target, "advanced");
        self.screen = target;
        Ok(target)
    }

    /// Steps back one screen; a no-op on mode selection.
    pub fn back(&mut self) -> Screen {
        if self.screen != Screen::ModeSelection {
            let target = previous_screen(self.mode, self.screen);
            tracing::debug!(from = %self.screen, to = %target, "went back");
            self.screen = target;
        }
        self.screen
    }

    /// Jumps from `results` straight to one of the mode's editing screens.
    pub fn edit(&mut self, target: Screen) -> Result<Screen, TransitionError> {
        if self.screen != Screen::Results {
            return Err(TransitionError::NotAvailable {
                screen: self.screen,
                action: "edit",
            });
        }
        if !editing_screens(self.mode).contains(&target) {
            return Err(TransitionError::NotInFlow {
                target,
                mode: self.mode,
            });
        }
        self.screen = target;
        Ok(target)
    }

    /// Restores the initial state: mode selection, per-head, blank rows.
    pub fn reset(&mut self) {
        self.mode = SplitMode::default();
        self.screen = Screen::ModeSelection;
        self.ledger = Ledger::new(self.mode);
        self.results.clear();
        self.copy_indicator.clear();
        tracing::info!("session reset");
    }

    /// Resets after confirming with `gate` when there is data to lose.
    /// Returns whether the reset happened.
    pub fn go_home(&mut self, gate: &mut dyn ConfirmationGate) -> bool {
        if self.ledger.has_user_input() && !gate.confirm(HOME_PROMPT) {
            return false;
        }
        self.reset();
        true
    }

    pub fn person_summary(&self, person_id: Uuid) -> Result<String, ExportError> {
        ExportService::person_summary(&self.ledger, person_id, &self.currency)
    }

    /// Copies a person's summary and arms the copied indicator on success.
    pub fn copy_person_summary(
        &mut self,
        person_id: Uuid,
        sink: &mut dyn ClipboardSink,
        now: DateTime<Utc>,
    ) -> Result<String, ExportError> {
        let text =
            ExportService::copy_person_summary(&self.ledger, person_id, &self.currency, sink)?;
        self.copy_indicator.arm(now, self.copy_feedback_ms);
        Ok(text)
    }

    pub fn copy_indicator_active(&self, now: DateTime<Utc>) -> bool {
        self.copy_indicator.is_active(now)
    }
}
