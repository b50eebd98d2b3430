#![doc(test(attr(deny(warnings))))]

//! Billsplit Core provides the ledger, validation, settlement, and wizard
//! primitives behind a guided bill-splitting calculator.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Billsplit Core tracing initialized.");
    });
}
