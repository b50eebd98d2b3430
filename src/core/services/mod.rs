pub mod export_service;
pub mod import_service;
pub mod settlement_service;
pub mod validation_service;

pub use export_service::{ClipboardSink, CopyIndicator, ExportError, ExportService};
pub use import_service::{ImportError, ImportService, ImportTarget};
pub use settlement_service::{SettlementError, SettlementService};
pub use validation_service::{ContributionCheck, ValidationService, SETTLEMENT_TOLERANCE};
