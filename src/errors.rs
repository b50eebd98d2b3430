use thiserror::Error;

use crate::config::ConfigError;
use crate::core::services::{ExportError, ImportError, SettlementError};
use crate::core::wizard::TransitionError;

/// Error type that captures the failures surfaced by the library.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
